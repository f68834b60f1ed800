//! MET coefficient table for calorie estimation.
//!
//! The per-category policy is canonical here: each of the three fixed
//! workout categories carries one MET coefficient. Coefficients can be
//! overridden via the `[calories]` section of the config file.

use crate::config::CaloriesConfig;
use crate::types::Category;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default table - built once and reused across all operations
static DEFAULT_METS: Lazy<MetTable> = Lazy::new(MetTable::default);

/// Get a reference to the cached default MET table
pub fn default_met_table() -> &'static MetTable {
    &DEFAULT_METS
}

/// MET coefficients keyed by workout category
#[derive(Clone, Debug, PartialEq)]
pub struct MetTable {
    coefficients: HashMap<Category, f64>,
}

impl Default for MetTable {
    fn default() -> Self {
        let mut coefficients = HashMap::new();
        coefficients.insert(Category::WarmUp, 3.0);
        coefficients.insert(Category::Workout, 6.0);
        coefficients.insert(Category::CoolDown, 2.5);
        Self { coefficients }
    }
}

impl MetTable {
    /// Build a table applying any per-category overrides from the config
    pub fn from_config(config: &CaloriesConfig) -> Self {
        let mut coefficients = HashMap::new();
        coefficients.insert(Category::WarmUp, config.warm_up_met);
        coefficients.insert(Category::Workout, config.workout_met);
        coefficients.insert(Category::CoolDown, config.cool_down_met);
        Self { coefficients }
    }

    /// Coefficient for a category. Every category always has one; the
    /// constructor guarantees all three keys exist.
    pub fn coefficient(&self, category: Category) -> f64 {
        self.coefficients
            .get(&category)
            .copied()
            .unwrap_or_else(|| MetTable::default().coefficients[&category])
    }

    /// Validate the table for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for category in Category::ALL {
            match self.coefficients.get(&category) {
                None => errors.push(format!("No MET coefficient for category '{}'", category)),
                Some(met) if *met <= 0.0 || !met.is_finite() => errors.push(format!(
                    "MET coefficient for '{}' must be a positive number, got {}",
                    category, met
                )),
                Some(_) => {}
            }
        }

        errors
    }
}
