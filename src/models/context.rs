use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{Occasion, Season};

/// Temperature below which an outfit must carry insulating outerwear.
pub const OUTERWEAR_REQUIRED_BELOW_C: f64 = 10.0;
/// Temperature above which heavy (warmth 3) non-accessories are excluded.
pub const HEAVY_EXCLUDED_ABOVE_C: f64 = 25.0;
/// Minimum outerwear warmth that satisfies the cold-weather requirement.
pub const REQUIRED_OUTERWEAR_WARMTH: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Clear,
    Rain,
    Snow,
    Wind,
    Extreme,
}

impl FromStr for WeatherCondition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clear" => Ok(WeatherCondition::Clear),
            "rain" => Ok(WeatherCondition::Rain),
            "snow" => Ok(WeatherCondition::Snow),
            "wind" => Ok(WeatherCondition::Wind),
            "extreme" => Ok(WeatherCondition::Extreme),
            _ => Err(()),
        }
    }
}

/// The query side of a recommendation call: current weather, the occasion
/// being dressed for (if any) and the season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub temperature_c: f64,
    pub condition: WeatherCondition,
    pub occasion: Option<Occasion>,
    pub season: Season,
}

impl Context {
    /// Cold enough that every outfit must include insulating outerwear.
    pub fn requires_outerwear(&self) -> bool {
        self.temperature_c < OUTERWEAR_REQUIRED_BELOW_C
    }

    /// Warm enough that heavy items are excluded (accessories exempt).
    pub fn excludes_heavy_items(&self) -> bool {
        self.temperature_c > HEAVY_EXCLUDED_ABOVE_C
    }

    /// Wet conditions call for weatherproof footwear when the wardrobe has
    /// any; the generator waives the requirement when it does not.
    pub fn requires_weatherproof_footwear(&self) -> bool {
        matches!(self.condition, WeatherCondition::Rain | WeatherCondition::Snow)
    }
}
