//! Typed solver configuration, folded once from the caller's free-form
//! `ConstraintRule` parameter maps.
//!
//! The source passes rule parameters as free-form maps; in this
//! implementation they are normalized at the boundary into `SolverConfig`
//! with enumerated fields and documented defaults, and the free-form map
//! never crosses into the model builder.

use crate::domain::ConstraintRule;

#[derive(Debug, Clone, Copy)]
pub struct ObjectiveWeights {
    pub regularity: i64,
    pub preferences: i64,
    pub equity: i64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            regularity: 10,
            preferences: 5,
            equity: 8,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    pub min_rest_hours: i64,
    pub min_free_weekends_per_2weeks: i64,
    pub weights: ObjectiveWeights,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_rest_hours: 11,
            min_free_weekends_per_2weeks: 1,
            weights: ObjectiveWeights::default(),
        }
    }
}

impl SolverConfig {
    /// Builds a `SolverConfig` from the caller's rule list, applying
    /// defaults for any rule that is missing or `is_active = false`.
    pub fn from_rules(rules: &[ConstraintRule]) -> Self {
        let mut config = SolverConfig::default();

        for rule in rules {
            if !rule.is_active {
                continue;
            }
            match rule.name.as_str() {
                "min_rest_hours" => {
                    if let Some(hours) = rule.parameter.get("hours").and_then(|v| v.as_i64()) {
                        config.min_rest_hours = hours;
                    }
                }
                "weekend_rest" => {
                    if let Some(n) = rule
                        .parameter
                        .get("min_free_weekends_per_2weeks")
                        .and_then(|v| v.as_i64())
                    {
                        config.min_free_weekends_per_2weeks = n;
                    }
                }
                "shift_regularity" => {
                    if let Some(w) = rule.parameter.get("weight").and_then(|v| v.as_i64()) {
                        config.weights.regularity = w;
                    }
                }
                "respect_preferences" => {
                    if let Some(w) = rule.parameter.get("weight").and_then(|v| v.as_i64()) {
                        config.weights.preferences = w;
                    }
                }
                "night_weekend_equity" => {
                    if let Some(w) = rule.parameter.get("weight").and_then(|v| v.as_i64()) {
                        config.weights.equity = w;
                    }
                }
                _ => {}
            }
        }

        config
    }
}
