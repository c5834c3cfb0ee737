use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{RawClothingItem, SavedOutfit};
use crate::services::WeatherProvider;

/// A wardrobe record as stored: the raw item plus bookkeeping. Records are
/// kept raw and normalized per recommendation call, matching the item
/// store contract.
#[derive(Debug, Clone)]
pub struct StoredItem {
    pub record: RawClothingItem,
    pub created_at: DateTime<Utc>,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    /// Weather Source collaborator; `None` means recommendation requests
    /// must carry explicit conditions.
    pub weather: Option<Arc<dyn WeatherProvider>>,
}

/// Inner state that can be modified
#[derive(Default)]
pub struct AppStateInner {
    pub items: HashMap<Uuid, StoredItem>,
    pub outfits: HashMap<Uuid, SavedOutfit>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new empty application state without a weather provider
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner::default())),
            weather: None,
        }
    }

    /// Attaches a weather provider for location-based recommendations
    pub fn with_weather(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        self.weather = Some(provider);
        self
    }
}
