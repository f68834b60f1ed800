//! Report assembly for the export operation.
//!
//! This module only assembles the report's structured content; rendering
//! to an actual PDF is delegated to an external document writer.

use crate::log::SessionLog;
use crate::types::{Category, Gender, Profile};
use chrono::NaiveDate;
use serde::Serialize;

/// One workout row of the report table
#[derive(Clone, Debug, Serialize)]
pub struct ReportRow {
    pub category: Category,
    pub exercise_name: String,
    pub duration_minutes: u32,
    pub calories: f64,
    /// Date-only portion of the entry timestamp
    pub date: NaiveDate,
}

/// Structured report content: profile header plus the full entry table
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub name: String,
    pub registration_id: String,
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub bmr: f64,
    pub total_workouts: usize,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Suggested download filename, spaces replaced by underscores
    pub fn suggested_filename(&self) -> String {
        format!("{}_weekly_report.pdf", self.name.replace(' ', "_"))
    }
}

/// Assemble a report from the profile header and all logged entries,
/// per-category then chronological
pub fn assemble(profile: &Profile, log: &SessionLog) -> Report {
    let rows: Vec<ReportRow> = log
        .all_entries()
        .map(|entry| ReportRow {
            category: entry.category,
            exercise_name: entry.exercise_name.clone(),
            duration_minutes: entry.duration_minutes,
            calories: entry.calories,
            date: entry.logged_at.date_naive(),
        })
        .collect();

    Report {
        name: profile.name.clone(),
        registration_id: profile.registration_id.clone(),
        age: profile.age,
        gender: profile.gender,
        height_cm: profile.height_cm,
        weight_kg: profile.weight_kg,
        bmi: profile.bmi,
        bmr: profile.bmr,
        total_workouts: rows.len(),
        rows,
    }
}
