mod context;
mod item;
mod outfit;

pub use context::{
    Context, WeatherCondition, HEAVY_EXCLUDED_ABOVE_C, OUTERWEAR_REQUIRED_BELOW_C,
    REQUIRED_OUTERWEAR_WARMTH,
};
pub use item::{Category, ClothingItem, Occasion, RawClothingItem, Season, MAX_WARMTH_LEVEL};
pub use outfit::{
    Outfit, OutfitCandidate, Recommendation, SavedOutfit, ScoreBreakdown, SkippedItem,
};
