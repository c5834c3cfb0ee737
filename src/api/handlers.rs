use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{self, normalize_item, EngineError, EngineOptions};
use crate::error::{AppError, AppResult};
use crate::models::{
    Context, Occasion, Outfit, RawClothingItem, SavedOutfit, Season, SkippedItem, WeatherCondition,
};

use super::state::StoredItem;
use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub category: String,
    pub subtype: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<String>,
    #[serde(default)]
    pub occasion_tags: Vec<String>,
    pub warmth_level: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: Uuid,
    pub category: String,
    pub subtype: Option<String>,
    pub colors: Vec<String>,
    pub seasons: Vec<String>,
    pub occasion_tags: Vec<String>,
    pub warmth_level: Option<u8>,
    pub created_at: DateTime<Utc>,
}

impl From<&StoredItem> for ItemResponse {
    fn from(stored: &StoredItem) -> Self {
        Self {
            id: stored.record.id.unwrap_or_default(),
            category: stored.record.category.clone().unwrap_or_default(),
            subtype: stored.record.subtype.clone(),
            colors: stored.record.colors.clone(),
            seasons: stored.record.seasons.clone(),
            occasion_tags: stored.record.occasion_tags.clone(),
            warmth_level: stored.record.warmth_level,
            created_at: stored.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveOutfitRequest {
    pub name: String,
    pub items: Vec<Uuid>,
    pub occasion: Option<Occasion>,
    pub season: Option<Season>,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub occasion: Option<Occasion>,
    pub season: Option<Season>,
    pub temperature_c: Option<f64>,
    pub condition: Option<WeatherCondition>,
    pub location: Option<String>,
    pub max_results: Option<usize>,
    pub max_skeletons: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    /// The fully resolved context the engine ran with, echoed for display.
    pub context: Context,
    pub outfits: Vec<Outfit>,
    pub truncated: bool,
    pub invalid_items: Vec<SkippedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Add a wardrobe item
///
/// The record is validated through the normalizer before storage so bad
/// categories are rejected at entry, but it is stored raw; normalization
/// defaults are applied per recommendation call.
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<ItemResponse>)> {
    let record = RawClothingItem {
        id: Some(Uuid::new_v4()),
        category: Some(request.category),
        subtype: request.subtype,
        colors: request.colors,
        seasons: request.seasons,
        occasion_tags: request.occasion_tags,
        warmth_level: request.warmth_level,
    };

    normalize_item(&record).map_err(|e| AppError::InvalidInput(e.reason))?;

    let stored = StoredItem {
        record,
        created_at: Utc::now(),
    };
    let response = ItemResponse::from(&stored);

    let mut inner = state.inner.write().await;
    inner.items.insert(response.id, stored);

    Ok((StatusCode::CREATED, Json(response)))
}

/// List wardrobe items, newest first
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<ItemResponse>> {
    let inner = state.inner.read().await;
    let mut items: Vec<ItemResponse> = inner.items.values().map(ItemResponse::from).collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
    Json(items)
}

/// Remove a wardrobe item. Category edits are delete + recreate; there is
/// no update route by design of the item invariants.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let mut inner = state.inner.write().await;
    if inner.items.remove(&id).is_none() {
        return Err(AppError::NotFound(format!("no item with id {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Save a named outfit (e.g. a favorited recommendation)
pub async fn create_outfit(
    State(state): State<AppState>,
    Json(request): Json<SaveOutfitRequest>,
) -> AppResult<(StatusCode, Json<SavedOutfit>)> {
    if request.items.is_empty() {
        return Err(AppError::InvalidInput(
            "an outfit needs at least one item".to_string(),
        ));
    }

    let mut inner = state.inner.write().await;
    if let Some(missing) = request.items.iter().find(|id| !inner.items.contains_key(id)) {
        return Err(AppError::NotFound(format!("no item with id {}", missing)));
    }

    let outfit = SavedOutfit {
        id: Uuid::new_v4(),
        name: request.name,
        items: request.items,
        occasion: request.occasion,
        season: request.season,
        is_favorite: request.is_favorite,
        created_at: Utc::now(),
    };
    inner.outfits.insert(outfit.id, outfit.clone());

    Ok((StatusCode::CREATED, Json(outfit)))
}

/// List saved outfits, newest first
pub async fn list_outfits(State(state): State<AppState>) -> Json<Vec<SavedOutfit>> {
    let inner = state.inner.read().await;
    let mut outfits: Vec<SavedOutfit> = inner.outfits.values().cloned().collect();
    outfits.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
    Json(outfits)
}

/// Recommend outfits for the current wardrobe and context
///
/// Conditions come either from explicit `temperature_c`/`condition` query
/// parameters or from the weather provider via `location`. An undersized
/// wardrobe yields an advisory empty list, not an error.
pub async fn recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    let (temperature_c, condition) = match (query.temperature_c, query.location.as_deref()) {
        (Some(temperature_c), _) => (
            temperature_c,
            query.condition.unwrap_or(WeatherCondition::Clear),
        ),
        (None, Some(location)) => {
            let provider = state.weather.as_ref().ok_or_else(|| {
                AppError::InvalidInput(
                    "no weather provider configured; pass temperature_c explicitly".to_string(),
                )
            })?;
            let observation = provider.current(location).await?;
            tracing::info!(
                provider = provider.name(),
                location,
                temperature_c = observation.temperature_c,
                "Resolved weather for recommendation"
            );
            (
                observation.temperature_c,
                query.condition.unwrap_or(observation.condition),
            )
        }
        (None, None) => {
            return Err(AppError::InvalidInput(
                "provide temperature_c (and optionally condition), or a location".to_string(),
            ));
        }
    };

    let context = Context {
        temperature_c,
        condition,
        occasion: query.occasion,
        season: query
            .season
            .unwrap_or_else(|| Season::from_date(Utc::now().date_naive())),
    };

    let mut options = EngineOptions::default();
    if let Some(max_results) = query.max_results {
        options.max_results = max_results;
    }
    if let Some(max_skeletons) = query.max_skeletons {
        options.max_skeletons = max_skeletons;
    }

    let catalog: Vec<RawClothingItem> = {
        let inner = state.inner.read().await;
        inner.items.values().map(|s| s.record.clone()).collect()
    };

    match engine::recommend(&catalog, &context, &options) {
        Ok(result) => {
            tracing::info!(
                outfits = result.outfits.len(),
                truncated = result.truncated,
                skipped = result.invalid_items.len(),
                "Recommendation request served"
            );
            Ok(Json(RecommendationsResponse {
                context,
                outfits: result.outfits,
                truncated: result.truncated,
                invalid_items: result.invalid_items,
                message: None,
            }))
        }
        // Too few items is advice, not failure: return an empty list with
        // the minimum-count hint.
        Err(err @ EngineError::InsufficientWardrobe { .. }) => Ok(Json(RecommendationsResponse {
            context,
            outfits: Vec::new(),
            truncated: false,
            invalid_items: Vec::new(),
            message: Some(err.to_string()),
        })),
    }
}
