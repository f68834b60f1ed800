//! Profile Store: the single biometric profile slot and its operations.
//!
//! Save is all-or-nothing: invalid input leaves the stored profile
//! untouched, valid input fully replaces it (no partial merge) and
//! recomputes the derived BMI/BMR metrics.

use crate::metrics;
use crate::types::{Gender, Profile, ProfileInput};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Holds at most one user profile at a time
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileStore {
    current: Option<Profile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw form input and replace the stored profile.
    ///
    /// On any invalid field, returns [`Error::Validation`] naming every
    /// offending field and leaves the slot unchanged. On success the slot
    /// is fully overwritten and a snapshot of the new profile is returned.
    pub fn save_profile(&mut self, input: &ProfileInput) -> Result<Profile> {
        let profile = validate_profile_input(input)?;
        self.current = Some(profile.clone());
        tracing::info!(
            "Saved profile for {:?} (bmi={}, bmr={})",
            profile.name,
            profile.bmi,
            profile.bmr
        );
        Ok(profile)
    }

    /// The current profile snapshot, or `None` if none has been saved
    pub fn profile(&self) -> Option<&Profile> {
        self.current.as_ref()
    }

    /// Weight of the saved profile, if any. Used as the effective weight
    /// for calorie estimates.
    pub fn weight_kg(&self) -> Option<f64> {
        self.current.as_ref().map(|p| p.weight_kg)
    }
}

/// Per-field validation with explicit positivity checks.
///
/// Each problem is collected so the error message names every offending
/// field, not just the first one.
fn validate_profile_input(input: &ProfileInput) -> Result<Profile> {
    let mut problems = Vec::new();

    let name = input.name.trim();
    if name.is_empty() {
        problems.push("name (must not be empty)");
    }

    let registration_id = input.registration_id.trim();
    if registration_id.is_empty() {
        problems.push("registration_id (must not be empty)");
    }

    let age = match input.age.trim().parse::<u32>() {
        Ok(age) if age > 0 => Some(age),
        _ => {
            problems.push("age (must be a positive integer)");
            None
        }
    };

    let gender = match Gender::from_raw(&input.gender) {
        Some(gender) => Some(gender),
        None => {
            problems.push("gender (must not be empty)");
            None
        }
    };

    let height_cm = match input.height_cm.trim().parse::<f64>() {
        Ok(h) if h > 0.0 && h.is_finite() => Some(h),
        _ => {
            problems.push("height (must be a positive number)");
            None
        }
    };

    let weight_kg = match input.weight_kg.trim().parse::<f64>() {
        Ok(w) if w > 0.0 && w.is_finite() => Some(w),
        _ => {
            problems.push("weight (must be a positive number)");
            None
        }
    };

    if !problems.is_empty() {
        return Err(Error::Validation(problems.join(", ")));
    }

    // All four are Some by construction once problems is empty
    let (age, gender, height_cm, weight_kg) = match (age, gender, height_cm, weight_kg) {
        (Some(a), Some(g), Some(h), Some(w)) => (a, g, h, w),
        _ => return Err(Error::Other("profile validation inconsistency".into())),
    };

    Ok(Profile {
        name: name.to_string(),
        registration_id: registration_id.to_string(),
        age,
        gender,
        height_cm,
        weight_kg,
        bmi: metrics::bmi(weight_kg, height_cm),
        bmr: metrics::bmr(gender, weight_kg, height_cm, age),
    })
}
