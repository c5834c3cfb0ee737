use std::collections::HashSet;

use uuid::Uuid;

use super::color::{ColorAffinityTable, NEUTRAL_AFFINITY};
use super::{EngineError, EngineOptions};
use crate::models::{
    Category, ClothingItem, Context, OutfitCandidate, MAX_WARMTH_LEVEL, REQUIRED_OUTERWEAR_WARMTH,
};

/// At most this many accessories are attached to any skeleton.
const ACCESSORY_CAP: usize = 2;
/// Footwear below this warmth (sandals and the like) is not considered
/// weatherproof for rain or snow.
const WEATHERPROOF_FOOTWEAR_WARMTH: u8 = 1;

/// Outfit skeletons plus whether enumeration was capped.
#[derive(Debug)]
pub struct Generated<'a> {
    pub candidates: Vec<OutfitCandidate<'a>>,
    pub truncated: bool,
}

/// Enumerates plausible outfit skeletons from the normalized catalog under
/// the context filter. Work is bounded by `options.max_skeletons` no matter
/// how large the catalog is; when the cap bites, the result says so instead
/// of dropping combinations silently.
pub fn generate_candidates<'a>(
    catalog: &'a [ClothingItem],
    context: &Context,
    options: &EngineOptions,
) -> Result<Generated<'a>, EngineError> {
    let mut tops = Vec::new();
    let mut bottoms = Vec::new();
    let mut outerwear = Vec::new();
    let mut footwear = Vec::new();
    let mut accessories = Vec::new();

    for item in catalog {
        if !passes_weather(item, context) || !passes_occasion(item, context) {
            continue;
        }
        match item.category {
            Category::Top => tops.push(item),
            Category::Bottom => bottoms.push(item),
            Category::Outerwear => outerwear.push(item),
            Category::Footwear => footwear.push(item),
            Category::Accessory => accessories.push(item),
        }
    }

    if tops.is_empty() || bottoms.is_empty() {
        let missing = usize::from(tops.is_empty()) + usize::from(bottoms.is_empty());
        return Err(EngineError::InsufficientWardrobe {
            tops: tops.len(),
            bottoms: bottoms.len(),
            minimum_needed: missing,
        });
    }

    let max_skeletons = options.max_skeletons.max(1);
    let mut truncated = false;
    if tops.len() * bottoms.len() > max_skeletons {
        let cap = per_category_cap(max_skeletons);
        shortlist(&mut tops, context, cap);
        shortlist(&mut bottoms, context, cap);
        truncated = true;
        tracing::debug!(
            tops = tops.len(),
            bottoms = bottoms.len(),
            max_skeletons,
            "Skeleton enumeration truncated"
        );
    }

    // Cold weather asks for insulating outerwear; if the wardrobe only has
    // lighter pieces, attach the best of those rather than nothing.
    let required_outerwear: Vec<&ClothingItem> = {
        let insulating: Vec<&ClothingItem> = outerwear
            .iter()
            .copied()
            .filter(|o| o.warmth_level >= REQUIRED_OUTERWEAR_WARMTH)
            .collect();
        if insulating.is_empty() {
            outerwear.clone()
        } else {
            insulating
        }
    };

    // Rain and snow restrict footwear to weatherproof pieces, waived when
    // none exist in the filtered wardrobe.
    let footwear_pool: Vec<&ClothingItem> = if context.requires_weatherproof_footwear() {
        let weatherproof: Vec<&ClothingItem> = footwear
            .iter()
            .copied()
            .filter(|f| f.warmth_level >= WEATHERPROOF_FOOTWEAR_WARMTH)
            .collect();
        if weatherproof.is_empty() {
            footwear
        } else {
            weatherproof
        }
    } else {
        footwear
    };

    let mut seen: HashSet<Vec<Uuid>> = HashSet::new();
    let mut candidates = Vec::new();

    for top in &tops {
        for bottom in &bottoms {
            let mut items: Vec<&ClothingItem> = vec![*top, *bottom];

            // The engine prefers fewer items: outerwear is attached only
            // when the temperature band demands it.
            if context.requires_outerwear() {
                if let Some(layer) = best_match(&required_outerwear, &items, &options.colors) {
                    items.push(layer);
                }
            }

            if let Some(shoes) = best_match(&footwear_pool, &items, &options.colors) {
                items.push(shoes);
            }

            attach_accessories(&mut items, &accessories, &options.colors);

            let candidate = OutfitCandidate::new(items);
            if seen.insert(candidate.signature()) {
                candidates.push(candidate);
            }
        }
    }

    Ok(Generated {
        candidates,
        truncated,
    })
}

/// Season and temperature gating for a single item.
fn passes_weather(item: &ClothingItem, context: &Context) -> bool {
    if !item.suits_season(context.season) {
        return false;
    }
    if context.excludes_heavy_items()
        && item.warmth_level == MAX_WARMTH_LEVEL
        && item.category != Category::Accessory
    {
        return false;
    }
    true
}

fn passes_occasion(item: &ClothingItem, context: &Context) -> bool {
    match context.occasion {
        Some(occasion) => item.suits_occasion(occasion),
        None => true,
    }
}

/// Largest K with K * K <= cap, so a top-K-per-category shortlist keeps the
/// Top x Bottom product under the cap.
fn per_category_cap(cap: usize) -> usize {
    let mut k = 1;
    while (k + 1) * (k + 1) <= cap {
        k += 1;
    }
    k
}

/// Keeps the top `cap` items by cheap pre-score (count of matching season
/// and occasion tags), breaking ties by id for reproducibility.
fn shortlist<'a>(items: &mut Vec<&'a ClothingItem>, context: &Context, cap: usize) {
    items.sort_by(|a, b| {
        pre_score(b, context)
            .cmp(&pre_score(a, context))
            .then_with(|| a.id.cmp(&b.id))
    });
    items.truncate(cap);
}

fn pre_score(item: &ClothingItem, context: &Context) -> usize {
    let mut score = 0;
    if item.seasons.contains(&context.season) {
        score += 1;
    }
    if let Some(occasion) = context.occasion {
        if item.tagged_for(occasion) {
            score += 1;
        }
    }
    score
}

/// Mean color affinity between a candidate attachment and the items already
/// chosen. Dominant colors only; full palettes are the scorer's business.
fn color_fit(item: &ClothingItem, chosen: &[&ClothingItem], table: &ColorAffinityTable) -> f64 {
    if chosen.is_empty() {
        return NEUTRAL_AFFINITY;
    }
    let total: f64 = chosen
        .iter()
        .map(|c| table.affinity(item.dominant_color(), c.dominant_color()))
        .sum();
    total / chosen.len() as f64
}

/// Best-fitting item from the pool, ties broken by id.
fn best_match<'a>(
    pool: &[&'a ClothingItem],
    chosen: &[&ClothingItem],
    table: &ColorAffinityTable,
) -> Option<&'a ClothingItem> {
    pool.iter()
        .copied()
        .max_by(|a, b| {
            color_fit(a, chosen, table)
                .total_cmp(&color_fit(b, chosen, table))
                .then_with(|| b.id.cmp(&a.id))
        })
}

/// Greedily attaches accessories that at least match the outfit neutrally;
/// clashing accessories are left out entirely.
fn attach_accessories<'a>(
    items: &mut Vec<&'a ClothingItem>,
    accessories: &[&'a ClothingItem],
    table: &ColorAffinityTable,
) {
    for _ in 0..ACCESSORY_CAP {
        let chosen_ids: HashSet<Uuid> = items.iter().map(|i| i.id).collect();
        let remaining: Vec<&ClothingItem> = accessories
            .iter()
            .copied()
            .filter(|a| !chosen_ids.contains(&a.id))
            .collect();
        match best_match(&remaining, items, table) {
            Some(accessory) if color_fit(accessory, items, table) >= NEUTRAL_AFFINITY => {
                items.push(accessory);
            }
            _ => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{item, uuid_from};
    use crate::models::{Occasion, Season, WeatherCondition};

    fn context(temperature_c: f64) -> Context {
        Context {
            temperature_c,
            condition: WeatherCondition::Clear,
            occasion: None,
            season: Season::Fall,
        }
    }

    #[test]
    fn test_mandatory_categories_enforced() {
        let catalog = vec![item(1, Category::Top, "navy")];
        let err = generate_candidates(&catalog, &context(18.0), &EngineOptions::default())
            .unwrap_err();
        match err {
            EngineError::InsufficientWardrobe {
                tops,
                bottoms,
                minimum_needed,
            } => {
                assert_eq!(tops, 1);
                assert_eq!(bottoms, 0);
                assert_eq!(minimum_needed, 1);
            }
        }
    }

    #[test]
    fn test_pair_enumeration_and_dedup() {
        let catalog = vec![
            item(1, Category::Top, "navy"),
            item(2, Category::Top, "white"),
            item(3, Category::Bottom, "gray"),
            item(4, Category::Bottom, "black"),
        ];
        let generated =
            generate_candidates(&catalog, &context(18.0), &EngineOptions::default()).unwrap();
        assert_eq!(generated.candidates.len(), 4);
        assert!(!generated.truncated);
    }

    #[test]
    fn test_cold_weather_attaches_outerwear() {
        let catalog = vec![
            item(1, Category::Top, "white"),
            item(2, Category::Bottom, "gray"),
            {
                let mut coat = item(3, Category::Outerwear, "black");
                coat.warmth_level = 3;
                coat
            },
        ];
        let generated =
            generate_candidates(&catalog, &context(2.0), &EngineOptions::default()).unwrap();
        for candidate in &generated.candidates {
            assert!(candidate
                .items
                .iter()
                .any(|i| i.category == Category::Outerwear));
        }
    }

    #[test]
    fn test_mild_weather_omits_outerwear() {
        let catalog = vec![
            item(1, Category::Top, "white"),
            item(2, Category::Bottom, "gray"),
            item(3, Category::Outerwear, "black"),
        ];
        let generated =
            generate_candidates(&catalog, &context(18.0), &EngineOptions::default()).unwrap();
        for candidate in &generated.candidates {
            assert!(candidate
                .items
                .iter()
                .all(|i| i.category != Category::Outerwear));
        }
    }

    #[test]
    fn test_hot_weather_excludes_heavy_items() {
        let mut parka_top = item(1, Category::Top, "white");
        parka_top.warmth_level = 3;
        let catalog = vec![
            parka_top,
            item(2, Category::Top, "navy"),
            item(3, Category::Bottom, "gray"),
        ];
        let generated =
            generate_candidates(&catalog, &context(30.0), &EngineOptions::default()).unwrap();
        assert_eq!(generated.candidates.len(), 1);
        assert_eq!(generated.candidates[0].items[0].id, uuid_from(2));
    }

    #[test]
    fn test_season_filter_respects_empty_set() {
        let mut winter_top = item(1, Category::Top, "white");
        winter_top.seasons.insert(Season::Winter);
        let all_season_top = item(2, Category::Top, "navy");
        let catalog = vec![winter_top, all_season_top, item(3, Category::Bottom, "gray")];
        // Context season is Fall, so the winter-only top drops out.
        let generated =
            generate_candidates(&catalog, &context(18.0), &EngineOptions::default()).unwrap();
        assert_eq!(generated.candidates.len(), 1);
        assert_eq!(generated.candidates[0].items[0].id, uuid_from(2));
    }

    #[test]
    fn test_occasion_filter_keeps_unconstrained_items() {
        let mut athletic_top = item(1, Category::Top, "white");
        athletic_top.occasion_tags.insert(Occasion::Athletic);
        let untagged_top = item(2, Category::Top, "navy");
        let mut business_bottom = item(3, Category::Bottom, "gray");
        business_bottom.occasion_tags.insert(Occasion::Business);

        let mut ctx = context(18.0);
        ctx.occasion = Some(Occasion::Business);
        let catalog = vec![athletic_top, untagged_top, business_bottom];
        let generated = generate_candidates(&catalog, &ctx, &EngineOptions::default()).unwrap();
        assert_eq!(generated.candidates.len(), 1);
        assert_eq!(generated.candidates[0].items[0].id, uuid_from(2));
    }

    #[test]
    fn test_rainy_weather_prefers_weatherproof_footwear() {
        let mut sandals = item(3, Category::Footwear, "brown");
        sandals.warmth_level = 0;
        let boots = item(4, Category::Footwear, "black");
        let catalog = vec![
            item(1, Category::Top, "white"),
            item(2, Category::Bottom, "gray"),
            sandals,
            boots,
        ];
        let mut ctx = context(15.0);
        ctx.condition = WeatherCondition::Rain;
        let generated = generate_candidates(&catalog, &ctx, &EngineOptions::default()).unwrap();
        for candidate in &generated.candidates {
            let shoes = candidate
                .items
                .iter()
                .find(|i| i.category == Category::Footwear)
                .expect("rainy outfits should include footwear");
            assert_eq!(shoes.id, uuid_from(4));
        }
    }

    #[test]
    fn test_rain_requirement_waived_without_capable_footwear() {
        let mut sandals = item(3, Category::Footwear, "brown");
        sandals.warmth_level = 0;
        let catalog = vec![
            item(1, Category::Top, "white"),
            item(2, Category::Bottom, "gray"),
            sandals,
        ];
        let mut ctx = context(15.0);
        ctx.condition = WeatherCondition::Rain;
        // No weatherproof footwear exists, so the sandals still attach.
        let generated = generate_candidates(&catalog, &ctx, &EngineOptions::default()).unwrap();
        assert!(generated.candidates[0]
            .items
            .iter()
            .any(|i| i.id == uuid_from(3)));
    }

    #[test]
    fn test_clashing_accessory_is_left_out() {
        let mut scarf = item(3, Category::Accessory, "pink");
        scarf.warmth_level = 0;
        let catalog = vec![
            item(1, Category::Top, "red"),
            item(2, Category::Bottom, "red"),
            scarf,
        ];
        let generated =
            generate_candidates(&catalog, &context(18.0), &EngineOptions::default()).unwrap();
        assert_eq!(generated.candidates[0].items.len(), 2);
    }

    #[test]
    fn test_accessory_cap() {
        let catalog = vec![
            item(1, Category::Top, "navy"),
            item(2, Category::Bottom, "navy"),
            item(3, Category::Accessory, "navy"),
            item(4, Category::Accessory, "navy"),
            item(5, Category::Accessory, "navy"),
        ];
        let generated =
            generate_candidates(&catalog, &context(18.0), &EngineOptions::default()).unwrap();
        let accessory_count = generated.candidates[0]
            .items
            .iter()
            .filter(|i| i.category == Category::Accessory)
            .count();
        assert_eq!(accessory_count, ACCESSORY_CAP);
    }

    #[test]
    fn test_truncation_flag_and_bound() {
        let mut catalog = Vec::new();
        for i in 0..50 {
            catalog.push(item(i, Category::Top, "navy"));
        }
        for i in 50..100 {
            catalog.push(item(i, Category::Bottom, "gray"));
        }
        let generated =
            generate_candidates(&catalog, &context(18.0), &EngineOptions::default()).unwrap();
        assert!(generated.truncated);
        assert!(generated.candidates.len() <= 200);
    }

    #[test]
    fn test_per_category_cap() {
        assert_eq!(per_category_cap(200), 14);
        assert_eq!(per_category_cap(1), 1);
        assert_eq!(per_category_cap(4), 2);
    }
}
