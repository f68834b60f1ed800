//! Entry history loading.
//!
//! Rebuilds the session log at startup from the live journal and the CSV
//! archive, deduplicated by entry id and sorted oldest-first so that
//! per-category insertion order stays chronological.

use crate::types::{Category, WorkoutEntry};
use crate::Result;
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// CSV row format for reading archived entries
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    category: String,
    exercise: String,
    duration_minutes: u32,
    calories: f64,
    logged_at: String,
}

impl TryFrom<CsvRow> for WorkoutEntry {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| crate::Error::Other(format!("Invalid UUID: {}", e)))?;

        let category = Category::parse(&row.category)
            .ok_or_else(|| crate::Error::InvalidCategory(row.category.clone()))?;

        let logged_at = DateTime::parse_from_rfc3339(&row.logged_at)
            .map_err(|e| crate::Error::Other(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        Ok(WorkoutEntry {
            id,
            category,
            exercise_name: row.exercise,
            duration_minutes: row.duration_minutes,
            calories: row.calories,
            logged_at,
        })
    }
}

/// Load all entries from the journal and the CSV archive.
///
/// Returns entries sorted by `logged_at` (oldest first), deduplicated by
/// id when an entry appears in both files.
pub fn load_entries(journal_path: &Path, csv_path: &Path) -> Result<Vec<WorkoutEntry>> {
    let mut entries = Vec::new();
    let mut seen_ids = HashSet::new();

    if journal_path.exists() {
        for entry in crate::journal::read_entries(journal_path)? {
            seen_ids.insert(entry.id);
            entries.push(entry);
        }
        tracing::debug!("Loaded {} entries from journal", entries.len());
    }

    if csv_path.exists() {
        let mut csv_count = 0;
        for entry in load_entries_from_csv(csv_path)? {
            if seen_ids.insert(entry.id) {
                entries.push(entry);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} entries from CSV archive", csv_count);
    }

    // Oldest first: per-category insertion order = chronological order
    entries.sort_by(|a, b| a.logged_at.cmp(&b.logged_at));

    tracing::info!("Loaded {} total entries", entries.len());

    Ok(entries)
}

/// Load all entries from a CSV archive file
fn load_entries_from_csv(path: &Path) -> Result<Vec<WorkoutEntry>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut entries = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match WorkoutEntry::try_from(row) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!("Failed to parse CSV row: {}", e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
            }
        }
    }

    Ok(entries)
}
