use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ClothingItem, Occasion, Season};

/// Per-axis breakdown of an outfit score, kept for explainability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub color_harmony: f64,
    pub category_coverage: f64,
    pub occasion_fit: f64,
}

/// A candidate outfit under evaluation. Holds read-only references into the
/// normalized catalog for the duration of one recommendation call; it is
/// never persisted by the engine.
#[derive(Debug, Clone)]
pub struct OutfitCandidate<'a> {
    pub items: Vec<&'a ClothingItem>,
    pub score: f64,
    pub rationale: ScoreBreakdown,
}

impl<'a> OutfitCandidate<'a> {
    pub fn new(items: Vec<&'a ClothingItem>) -> Self {
        Self {
            items,
            score: 0.0,
            rationale: ScoreBreakdown::default(),
        }
    }

    /// Sorted item ids; identical multisets of items produce identical
    /// signatures, which drives deduplication and deterministic tie-breaks.
    pub fn signature(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.items.iter().map(|i| i.id).collect();
        ids.sort();
        ids
    }
}

/// A scored outfit as returned to the caller, detached from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outfit {
    pub items: Vec<ClothingItem>,
    pub score: f64,
    pub rationale: ScoreBreakdown,
}

impl From<OutfitCandidate<'_>> for Outfit {
    fn from(candidate: OutfitCandidate<'_>) -> Self {
        Self {
            items: candidate.items.into_iter().cloned().collect(),
            score: candidate.score,
            rationale: candidate.rationale,
        }
    }
}

/// An item rejected by the normalizer, reported alongside the results
/// rather than failing the whole call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedItem {
    pub id: Option<Uuid>,
    pub reason: String,
}

/// Result of one recommendation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    /// Ranked best-first, at most `max_results` entries.
    pub outfits: Vec<Outfit>,
    /// True when candidate enumeration was capped and some combinations
    /// were never considered.
    pub truncated: bool,
    /// Items skipped during normalization, with ids where known.
    pub invalid_items: Vec<SkippedItem>,
}

/// A user-saved outfit, e.g. a favorited recommendation. Stored by item id
/// so later item edits show through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedOutfit {
    pub id: Uuid,
    pub name: String,
    pub items: Vec<Uuid>,
    pub occasion: Option<Occasion>,
    pub season: Option<Season>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
}
