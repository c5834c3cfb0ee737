use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::color::ColorAffinityTable;
use super::EngineOptions;
use crate::models::{Category, Context, OutfitCandidate, ScoreBreakdown};

/// Relative weight of each scoring axis. Weights are policy, not behavior,
/// so they are carried as tunable configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub color_harmony: f64,
    pub category_coverage: f64,
    pub occasion_fit: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            color_harmony: 0.5,
            category_coverage: 0.2,
            occasion_fit: 0.3,
        }
    }
}

impl ScoringWeights {
    pub fn combine(&self, breakdown: &ScoreBreakdown) -> f64 {
        self.color_harmony * breakdown.color_harmony
            + self.category_coverage * breakdown.category_coverage
            + self.occasion_fit * breakdown.occasion_fit
    }
}

/// Scores every candidate, sorts best-first with deterministic tie-breaks
/// and keeps the top `max_results`. Pure over (candidates, context, table);
/// two identical calls rank identically.
pub fn rank<'a>(
    mut candidates: Vec<OutfitCandidate<'a>>,
    context: &Context,
    options: &EngineOptions,
) -> Vec<OutfitCandidate<'a>> {
    for candidate in &mut candidates {
        candidate.rationale = score_candidate(candidate, context, &options.colors);
        candidate.score = options.weights.combine(&candidate.rationale);
    }

    // Ties prefer simpler outfits, then the lexicographically smaller
    // sorted id sequence, so repeated calls reproduce the same order.
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.items.len().cmp(&b.items.len()))
            .then_with(|| a.signature().cmp(&b.signature()))
    });
    candidates.truncate(options.max_results);
    candidates
}

/// Computes the per-axis breakdown for one candidate.
pub fn score_candidate(
    candidate: &OutfitCandidate<'_>,
    context: &Context,
    colors: &ColorAffinityTable,
) -> ScoreBreakdown {
    ScoreBreakdown {
        color_harmony: color_harmony(candidate, colors),
        category_coverage: category_coverage(candidate, context),
        occasion_fit: occasion_fit(candidate, context),
    }
}

/// Mean pairwise affinity over the distinct dominant colors in the outfit.
/// A single-color outfit scores 1.0 by convention: there are no pairs to
/// penalize.
fn color_harmony(candidate: &OutfitCandidate<'_>, colors: &ColorAffinityTable) -> f64 {
    let palette: BTreeSet<&str> = candidate
        .items
        .iter()
        .map(|i| i.dominant_color())
        .collect();
    let palette: Vec<&str> = palette.into_iter().collect();
    if palette.len() < 2 {
        return 1.0;
    }

    let mut total = 0.0;
    let mut pairs = 0u32;
    for (index, a) in palette.iter().enumerate() {
        for b in &palette[index + 1..] {
            total += colors.affinity(a, b);
            pairs += 1;
        }
    }
    total / f64::from(pairs)
}

/// Fraction of weather-required categories present: both mandatory slots,
/// plus outerwear when it is cold and footwear when it is wet.
fn category_coverage(candidate: &OutfitCandidate<'_>, context: &Context) -> f64 {
    let mut required = vec![Category::Top, Category::Bottom];
    if context.requires_outerwear() {
        required.push(Category::Outerwear);
    }
    if context.requires_weatherproof_footwear() {
        required.push(Category::Footwear);
    }

    let present = required
        .iter()
        .filter(|required_category| {
            candidate
                .items
                .iter()
                .any(|i| i.category == **required_category)
        })
        .count();
    present as f64 / required.len() as f64
}

/// Fraction of items explicitly tagged for the requested occasion. Items
/// with an unconstrained tag set earn half credit, so explicitly tagged
/// outfits outrank generically tagged ones. Without a requested occasion
/// the axis does not discriminate and scores full.
fn occasion_fit(candidate: &OutfitCandidate<'_>, context: &Context) -> f64 {
    let Some(occasion) = context.occasion else {
        return 1.0;
    };
    if candidate.items.is_empty() {
        return 0.0;
    }

    let total: f64 = candidate
        .items
        .iter()
        .map(|i| {
            if i.tagged_for(occasion) {
                1.0
            } else if i.occasion_tags.is_empty() {
                0.5
            } else {
                0.0
            }
        })
        .sum();
    total / candidate.items.len() as f64
}
