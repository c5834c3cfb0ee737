use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum warmth level; 0 = minimal coverage, 3 = heavy insulation.
pub const MAX_WARMTH_LEVEL: u8 = 3;

/// Garment category. Every item has exactly one, and it is immutable once
/// set: changing a category is a delete + recreate at the store layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Outerwear,
    Footwear,
    Accessory,
}

impl Category {
    /// Warmth level assumed when a record does not carry one.
    pub fn default_warmth(self) -> u8 {
        match self {
            Category::Outerwear => 2,
            Category::Top | Category::Bottom | Category::Footwear => 1,
            Category::Accessory => 0,
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Category::Top),
            "bottom" => Ok(Category::Bottom),
            "outerwear" => Ok(Category::Outerwear),
            "footwear" => Ok(Category::Footwear),
            "accessory" => Ok(Category::Accessory),
            _ => Err(()),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Outerwear => "outerwear",
            Category::Footwear => "footwear",
            Category::Accessory => "accessory",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Meteorological season for a date (northern hemisphere).
    pub fn from_date(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }
}

impl FromStr for Season {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            _ => Err(()),
        }
    }
}

/// Occasion label an item (or a recommendation request) is suited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    Casual,
    Business,
    Formal,
    Athletic,
}

impl FromStr for Occasion {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "casual" => Ok(Occasion::Casual),
            "business" | "work" => Ok(Occasion::Business),
            "formal" => Ok(Occasion::Formal),
            "athletic" | "sport" => Ok(Occasion::Athletic),
            _ => Err(()),
        }
    }
}

/// A wardrobe item as it arrives from manual entry or the item store.
/// Only `category` is required; everything else is filled in by the
/// normalizer with permissive defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawClothingItem {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub category: Option<String>,
    /// Descriptive label within the category, e.g. "blouse". Display only.
    #[serde(default)]
    pub subtype: Option<String>,
    /// Raw color names; first entry is the dominant color.
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<String>,
    #[serde(default)]
    pub occasion_tags: Vec<String>,
    #[serde(default)]
    pub warmth_level: Option<u8>,
}

/// Canonical item shape produced by the normalizer. Invariants: `colors` is
/// never empty, `warmth_level <= MAX_WARMTH_LEVEL`, and empty `seasons` /
/// `occasion_tags` mean "unconstrained".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClothingItem {
    pub id: Uuid,
    pub category: Category,
    pub subtype: Option<String>,
    pub colors: Vec<String>,
    pub seasons: BTreeSet<Season>,
    pub occasion_tags: BTreeSet<Occasion>,
    pub warmth_level: u8,
}

impl ClothingItem {
    /// The first color token, used for compatibility scoring.
    pub fn dominant_color(&self) -> &str {
        &self.colors[0]
    }

    /// An item with an empty season set suits all seasons.
    pub fn suits_season(&self, season: Season) -> bool {
        self.seasons.is_empty() || self.seasons.contains(&season)
    }

    /// An item with an empty tag set suits any occasion.
    pub fn suits_occasion(&self, occasion: Occasion) -> bool {
        self.occasion_tags.is_empty() || self.occasion_tags.contains(&occasion)
    }

    /// Whether the item explicitly carries the given occasion tag (as
    /// opposed to merely being unconstrained).
    pub fn tagged_for(&self, occasion: Occasion) -> bool {
        self.occasion_tags.contains(&occasion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!("Outerwear".parse::<Category>(), Ok(Category::Outerwear));
        assert_eq!(" top ".parse::<Category>(), Ok(Category::Top));
        assert!("jacket".parse::<Category>().is_err());
    }

    #[test]
    fn test_default_warmth_per_category() {
        assert_eq!(Category::Outerwear.default_warmth(), 2);
        assert_eq!(Category::Footwear.default_warmth(), 1);
        assert_eq!(Category::Top.default_warmth(), 1);
        assert_eq!(Category::Bottom.default_warmth(), 1);
        assert_eq!(Category::Accessory.default_warmth(), 0);
    }

    #[test]
    fn test_season_from_date() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(Season::from_date(date(2024, 1, 15)), Season::Winter);
        assert_eq!(Season::from_date(date(2024, 4, 1)), Season::Spring);
        assert_eq!(Season::from_date(date(2024, 7, 31)), Season::Summer);
        assert_eq!(Season::from_date(date(2024, 10, 10)), Season::Fall);
        assert_eq!(Season::from_date(date(2024, 12, 1)), Season::Winter);
    }

    #[test]
    fn test_season_accepts_autumn_alias() {
        assert_eq!("autumn".parse::<Season>(), Ok(Season::Fall));
    }

    #[test]
    fn test_occasion_aliases() {
        assert_eq!("work".parse::<Occasion>(), Ok(Occasion::Business));
        assert_eq!("sport".parse::<Occasion>(), Ok(Occasion::Athletic));
    }

    #[test]
    fn test_category_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Category::Outerwear).unwrap(),
            "\"outerwear\""
        );
        let parsed: Category = serde_json::from_str("\"footwear\"").unwrap();
        assert_eq!(parsed, Category::Footwear);
    }
}
