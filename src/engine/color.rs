use std::collections::HashMap;

/// Compatibility assumed for any pair without a curated entry.
pub const NEUTRAL_AFFINITY: f64 = 0.6;
/// Compatibility assigned to curated clashing pairs.
pub const CLASH_AFFINITY: f64 = 0.05;

/// Color pairs that read as clashing regardless of the rest of the outfit.
/// Everything not listed here falls back to [`NEUTRAL_AFFINITY`].
const CLASHING_PAIRS: &[(&str, &str)] = &[
    ("red", "pink"),
    ("red", "orange"),
    ("orange", "pink"),
    ("orange", "green"),
    ("purple", "yellow"),
    ("brown", "gray"),
];

/// Symmetric lookup of compatibility between two color tokens, in [0, 1].
/// Identical tokens always score 1.0. The table is a plain value so callers
/// can tune or extend the curated pairs without touching the scorer.
#[derive(Debug, Clone)]
pub struct ColorAffinityTable {
    overrides: HashMap<(String, String), f64>,
}

impl Default for ColorAffinityTable {
    fn default() -> Self {
        let mut table = Self {
            overrides: HashMap::new(),
        };
        for (a, b) in CLASHING_PAIRS {
            table.set(a, b, CLASH_AFFINITY);
        }
        table
    }
}

impl ColorAffinityTable {
    /// Sets the affinity for an unordered pair, clamped to [0, 1].
    pub fn set(&mut self, a: &str, b: &str, affinity: f64) {
        self.overrides.insert(pair_key(a, b), affinity.clamp(0.0, 1.0));
    }

    pub fn affinity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        self.overrides
            .get(&pair_key(a, b))
            .copied()
            .unwrap_or(NEUTRAL_AFFINITY)
    }
}

/// Canonical unordered key so lookups are symmetric.
fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_colors_score_one() {
        let table = ColorAffinityTable::default();
        assert_eq!(table.affinity("navy", "navy"), 1.0);
    }

    #[test]
    fn test_unknown_pair_is_neutral() {
        let table = ColorAffinityTable::default();
        assert_eq!(table.affinity("navy", "gray"), NEUTRAL_AFFINITY);
        assert_eq!(table.affinity("teal", "beige"), NEUTRAL_AFFINITY);
    }

    #[test]
    fn test_clashing_pair_is_symmetric() {
        let table = ColorAffinityTable::default();
        assert_eq!(table.affinity("red", "pink"), CLASH_AFFINITY);
        assert_eq!(table.affinity("pink", "red"), CLASH_AFFINITY);
    }

    #[test]
    fn test_set_clamps_to_unit_interval() {
        let mut table = ColorAffinityTable::default();
        table.set("navy", "white", 1.5);
        assert_eq!(table.affinity("navy", "white"), 1.0);
        table.set("navy", "white", -0.2);
        assert_eq!(table.affinity("white", "navy"), 0.0);
    }
}
