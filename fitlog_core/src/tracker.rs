//! Tracker: explicit owned state for the Profile Store and Session Log.
//!
//! The original application kept both structures as process-wide mutable
//! globals; here they live in one context value handed to each operation,
//! which also makes the single-lock wrapping in the web layer trivial.

use crate::log::{LifetimeTotals, SessionLog, Summary};
use crate::mets::MetTable;
use crate::profile::ProfileStore;
use crate::report::{self, Report};
use crate::types::{Category, Profile, ProfileInput, WorkoutEntry};
use crate::{metrics, Config, Error, Result};
use chrono::Utc;
use uuid::Uuid;

/// Owns the profile slot and the session log and exposes the four core
/// operations plus report assembly
#[derive(Clone, Debug)]
pub struct Tracker {
    profiles: ProfileStore,
    log: SessionLog,
    mets: MetTable,
    default_weight_kg: f64,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(MetTable::default(), metrics::DEFAULT_WEIGHT_KG)
    }
}

impl Tracker {
    pub fn new(mets: MetTable, default_weight_kg: f64) -> Self {
        Self {
            profiles: ProfileStore::new(),
            log: SessionLog::new(),
            mets,
            default_weight_kg,
        }
    }

    /// Build a tracker from config plus previously persisted state
    pub fn from_parts(config: &Config, profiles: ProfileStore, log: SessionLog) -> Self {
        Self {
            profiles,
            log,
            mets: MetTable::from_config(&config.calories),
            default_weight_kg: config.calories.default_weight_kg,
        }
    }

    /// Validate and store a new profile, fully replacing any previous one
    pub fn save_profile(&mut self, input: &ProfileInput) -> Result<Profile> {
        self.profiles.save_profile(input)
    }

    /// The current profile snapshot, or `None` if none has been saved
    pub fn profile(&self) -> Option<&Profile> {
        self.profiles.profile()
    }

    /// Validate inputs, estimate calories and append an immutable entry.
    ///
    /// The effective weight is the saved profile's weight when present,
    /// else the configured default. Nothing is recorded on any failure.
    pub fn add_entry(
        &mut self,
        category_raw: &str,
        exercise_name: &str,
        duration_raw: &str,
    ) -> Result<WorkoutEntry> {
        let category = Category::parse(category_raw)
            .ok_or_else(|| Error::InvalidCategory(category_raw.to_string()))?;

        let exercise_name = exercise_name.trim();
        if exercise_name.is_empty() {
            return Err(Error::Validation("exercise (must not be empty)".into()));
        }

        let duration_minutes = match duration_raw.trim().parse::<u32>() {
            Ok(d) if d > 0 => d,
            _ => {
                return Err(Error::Validation(
                    "duration (must be a positive integer)".into(),
                ))
            }
        };

        let weight_kg = self
            .profiles
            .weight_kg()
            .unwrap_or(self.default_weight_kg);
        let met = self.mets.coefficient(category);
        let calories = metrics::calories_burned(met, weight_kg, duration_minutes);

        let entry = WorkoutEntry {
            id: Uuid::new_v4(),
            category,
            exercise_name: exercise_name.to_string(),
            duration_minutes,
            calories,
            logged_at: Utc::now(),
        };

        tracing::info!(
            "Logged {} min of {:?} in {} ({:.1} kcal)",
            duration_minutes,
            entry.exercise_name,
            category,
            calories
        );

        self.log.append(entry.clone());
        Ok(entry)
    }

    /// Per-category entries plus running totals; `None` when empty
    pub fn summarize(&self) -> Option<Summary> {
        self.log.summarize()
    }

    /// Lifetime minutes and per-category chart breakdowns; `None` when
    /// nothing is logged
    pub fn lifetime_totals(&self) -> Option<LifetimeTotals> {
        self.log.lifetime_totals()
    }

    /// Assemble the structured report content. Fails with
    /// [`Error::MissingProfile`] when no profile has been saved.
    pub fn export_report(&self) -> Result<Report> {
        let profile = self.profiles.profile().ok_or(Error::MissingProfile)?;
        Ok(report::assemble(profile, &self.log))
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn profile_store(&self) -> &ProfileStore {
        &self.profiles
    }
}
