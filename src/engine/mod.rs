//! Outfit composition and recommendation engine.
//!
//! Pure computation over a caller-supplied catalog: raw records are
//! normalized, outfit skeletons are enumerated under the weather and
//! occasion filters, and candidates are scored and ranked. The engine does
//! no I/O and keeps no cross-request state; weather, identity and storage
//! lookups happen in the surrounding service before invocation.

pub mod color;
pub mod generate;
pub mod normalize;
pub mod score;

pub use color::ColorAffinityTable;
pub use generate::{generate_candidates, Generated};
pub use normalize::{normalize_item, InvalidItemError};
pub use score::{rank, score_candidate, ScoringWeights};

use crate::models::{Context, Outfit, RawClothingItem, Recommendation, SkippedItem};

/// Whole-call failure: no retry will help, the wardrobe itself is too
/// small for the requested context.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error(
        "wardrobe too small: {tops} top(s) and {bottoms} bottom(s) match the current \
         filters; add at least {minimum_needed} more item(s) to get recommendations"
    )]
    InsufficientWardrobe {
        tops: usize,
        bottoms: usize,
        minimum_needed: usize,
    },
}

/// Tunables for one recommendation call. Defaults follow the engine
/// contract: five results, two hundred skeletons, the curated color table
/// and the standard axis weights.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub max_results: usize,
    pub max_skeletons: usize,
    pub weights: ScoringWeights,
    pub colors: ColorAffinityTable,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_results: 5,
            max_skeletons: 200,
            weights: ScoringWeights::default(),
            colors: ColorAffinityTable::default(),
        }
    }
}

/// Runs the full pipeline: normalize, generate, score, rank.
///
/// Invalid items are skipped and reported per item rather than aborting the
/// call; the only whole-call failure is an insufficient wardrobe. Output is
/// deterministic for identical inputs, including the rationale values.
pub fn recommend(
    catalog: &[RawClothingItem],
    context: &Context,
    options: &EngineOptions,
) -> Result<Recommendation, EngineError> {
    let mut items = Vec::with_capacity(catalog.len());
    let mut invalid_items = Vec::new();
    for raw in catalog {
        match normalize_item(raw) {
            Ok(item) => items.push(item),
            Err(err) => {
                tracing::warn!(item_id = ?err.id, reason = %err.reason, "Skipping invalid item");
                invalid_items.push(SkippedItem {
                    id: err.id,
                    reason: err.reason,
                });
            }
        }
    }

    let generated = generate_candidates(&items, context, options)?;
    let truncated = generated.truncated;
    let ranked = rank(generated.candidates, context, options);

    tracing::debug!(
        outfits = ranked.len(),
        truncated,
        skipped = invalid_items.len(),
        "Recommendation computed"
    );

    Ok(Recommendation {
        outfits: ranked.into_iter().map(Outfit::from).collect(),
        truncated,
        invalid_items,
    })
}
