use std::collections::BTreeSet;

use uuid::Uuid;

use crate::models::{Category, ClothingItem, Occasion, RawClothingItem, Season};

/// Color token used when a record carries no colors at all.
const FALLBACK_COLOR: &str = "neutral";

/// Common color names mapped onto the hue buckets the affinity table keys
/// on. Unknown names pass through lowercased; unknown pairs score neutral
/// downstream anyway.
const COLOR_SYNONYMS: &[(&str, &str)] = &[
    ("grey", "gray"),
    ("charcoal", "gray"),
    ("denim", "blue"),
    ("navy blue", "navy"),
    ("khaki", "beige"),
    ("tan", "beige"),
    ("cream", "white"),
    ("off-white", "white"),
    ("ivory", "white"),
    ("burgundy", "red"),
    ("maroon", "red"),
];

/// The only hard validation failure in the pipeline: a record whose
/// category is missing or outside the enumerated set. Everything else
/// degrades to permissive defaults, because partial tagging is expected
/// from manual entry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid item{}: {reason}", .id.map(|id| format!(" {}", id)).unwrap_or_default())]
pub struct InvalidItemError {
    pub id: Option<Uuid>,
    pub reason: String,
}

/// Converts one raw record into the canonical [`ClothingItem`] shape.
/// Pure function over the record; no side effects.
pub fn normalize_item(raw: &RawClothingItem) -> Result<ClothingItem, InvalidItemError> {
    let category_label = raw.category.as_deref().ok_or_else(|| InvalidItemError {
        id: raw.id,
        reason: "missing category".to_string(),
    })?;

    let category: Category = category_label.parse().map_err(|_| InvalidItemError {
        id: raw.id,
        reason: format!("unknown category '{}'", category_label),
    })?;

    let mut colors: Vec<String> = raw
        .colors
        .iter()
        .map(|c| canonical_color(c))
        .filter(|c| !c.is_empty())
        .collect();
    if colors.is_empty() {
        colors.push(FALLBACK_COLOR.to_string());
    }

    // Unknown season/occasion labels are dropped rather than rejected; an
    // empty set means unconstrained.
    let seasons: BTreeSet<Season> = raw
        .seasons
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    let occasion_tags: BTreeSet<Occasion> = raw
        .occasion_tags
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let warmth_level = raw
        .warmth_level
        .map(|w| w.min(crate::models::MAX_WARMTH_LEVEL))
        .unwrap_or_else(|| category.default_warmth());

    // Id-less records get a content-derived id so repeated normalization
    // of the same catalog reproduces the same ids (and the same ranking).
    let id = raw.id.unwrap_or_else(|| {
        let fingerprint = format!(
            "{}|{}|{}|{:?}|{:?}|{}",
            category,
            raw.subtype.as_deref().unwrap_or(""),
            colors.join(","),
            seasons,
            occasion_tags,
            warmth_level
        );
        Uuid::new_v5(&Uuid::NAMESPACE_OID, fingerprint.as_bytes())
    });

    Ok(ClothingItem {
        id,
        category,
        subtype: raw.subtype.clone(),
        colors,
        seasons,
        occasion_tags,
        warmth_level,
    })
}

/// Lowercases, trims and hue-buckets a raw color name.
pub fn canonical_color(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();
    for (synonym, bucket) in COLOR_SYNONYMS {
        if lowered == *synonym {
            return (*bucket).to_string();
        }
    }
    lowered
}
