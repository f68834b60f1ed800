//! Core domain types for the Fitlog workout tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout categories (fixed, closed set)
//! - Gender (as used by the BMR formula)
//! - The user profile with its derived metrics
//! - Individual workout entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Category
// ============================================================================

/// Workout category. The set is fixed; no other categories ever exist.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Warm-up")]
    WarmUp,
    #[serde(rename = "Workout")]
    Workout,
    #[serde(rename = "Cool-down")]
    CoolDown,
}

impl Category {
    /// All categories, in display order. Also the ordering used by
    /// summaries and reports.
    pub const ALL: [Category; 3] = [Category::WarmUp, Category::Workout, Category::CoolDown];

    /// Canonical display name
    pub fn name(self) -> &'static str {
        match self {
            Category::WarmUp => "Warm-up",
            Category::Workout => "Workout",
            Category::CoolDown => "Cool-down",
        }
    }

    /// Parse a raw category string. Only the three canonical names are
    /// accepted; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Warm-up" => Some(Category::WarmUp),
            "Workout" => Some(Category::Workout),
            "Cool-down" => Some(Category::CoolDown),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Gender
// ============================================================================

/// Gender as consumed by the BMR formula.
///
/// Input is free text; it is normalized by its leading character. Anything
/// not starting with `m`/`M` uses the non-male BMR constant.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// Normalize a raw gender string. Returns `None` only for empty input.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let first = raw.trim().chars().next()?;
        if first.eq_ignore_ascii_case(&'m') {
            Some(Gender::M)
        } else {
            Some(Gender::F)
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Profile
// ============================================================================

/// A user's biometric profile with derived metrics.
///
/// At most one profile is live at a time (see [`crate::ProfileStore`]).
/// `bmi` and `bmr` are recomputed on every save and stored rounded to two
/// decimal places.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub registration_id: String,
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub bmr: f64,
}

/// Raw form-field input for saving a profile.
///
/// All fields arrive as strings from the web/CLI layer; validation and
/// type coercion happen in [`crate::ProfileStore::save_profile`].
#[derive(Clone, Debug, Default)]
pub struct ProfileInput {
    pub name: String,
    pub registration_id: String,
    pub age: String,
    pub gender: String,
    pub height_cm: String,
    pub weight_kg: String,
}

// ============================================================================
// Workout Entry
// ============================================================================

/// A single logged workout. Immutable once created; there is no edit or
/// remove operation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutEntry {
    pub id: Uuid,
    pub category: Category,
    pub exercise_name: String,
    pub duration_minutes: u32,
    pub calories: f64,
    pub logged_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_canonical_names() {
        assert_eq!(Category::parse("Warm-up"), Some(Category::WarmUp));
        assert_eq!(Category::parse("Workout"), Some(Category::Workout));
        assert_eq!(Category::parse("Cool-down"), Some(Category::CoolDown));
    }

    #[test]
    fn test_category_parse_rejects_everything_else() {
        assert_eq!(Category::parse("warm-up"), None);
        assert_eq!(Category::parse("Cardio"), None);
        assert_eq!(Category::parse(""), None);
        assert_eq!(Category::parse("Warm-up "), None);
    }

    #[test]
    fn test_category_roundtrips_through_display() {
        for cat in Category::ALL {
            assert_eq!(Category::parse(cat.name()), Some(cat));
        }
    }

    #[test]
    fn test_gender_normalization() {
        assert_eq!(Gender::from_raw("M"), Some(Gender::M));
        assert_eq!(Gender::from_raw("male"), Some(Gender::M));
        assert_eq!(Gender::from_raw("F"), Some(Gender::F));
        assert_eq!(Gender::from_raw("female"), Some(Gender::F));
        // Anything not starting with 'm' gets the non-male formula
        assert_eq!(Gender::from_raw("other"), Some(Gender::F));
        assert_eq!(Gender::from_raw(""), None);
        assert_eq!(Gender::from_raw("   "), None);
    }
}
