//! CSV archiving for journaled entries.
//!
//! Rolls the JSONL journal into an append-only CSV archive atomically so
//! entries are never lost mid-rollup.

use crate::{Result, WorkoutEntry};
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    category: String,
    exercise: String,
    duration_minutes: u32,
    calories: f64,
    logged_at: String,
}

impl From<&WorkoutEntry> for CsvRow {
    fn from(entry: &WorkoutEntry) -> Self {
        CsvRow {
            id: entry.id.to_string(),
            category: entry.category.name().to_string(),
            exercise: entry.exercise_name.clone(),
            duration_minutes: entry.duration_minutes,
            calories: entry.calories,
            logged_at: entry.logged_at.to_rfc3339(),
        }
    }
}

/// Roll up journal entries into CSV and archive the journal atomically
///
/// The CSV is fsynced before the journal is renamed to `.processed`, so a
/// crash in between duplicates nothing and loses nothing. Processed
/// journals are kept around for manual recovery until cleaned up.
pub fn journal_to_csv_and_archive(journal_path: &Path, csv_path: &Path) -> Result<usize> {
    let entries = crate::journal::read_entries(journal_path)?;

    if entries.is_empty() {
        tracing::info!("No entries in journal to roll up");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(csv_path)?;

    // Only write headers when the archive is brand new
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for entry in &entries {
        writer.serialize(CsvRow::from(entry))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} entries to CSV archive", entries.len());

    let processed_path = journal_path.with_extension("jsonl.processed");
    std::fs::rename(journal_path, &processed_path)?;

    tracing::info!("Archived journal to {:?}", processed_path);

    Ok(entries.len())
}

/// Remove all `.processed` journal files in the given directory
pub fn cleanup_processed_journals(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(extension) = path.extension() {
            if extension == "processed" {
                std::fs::remove_file(&path)?;
                tracing::debug!("Removed processed journal: {:?}", path);
                count += 1;
            }
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed journal files", count);
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{EntrySink, JsonlJournal};
    use crate::types::Category;
    use chrono::Utc;
    use std::fs::File;
    use uuid::Uuid;

    fn create_test_entry(exercise: &str) -> WorkoutEntry {
        WorkoutEntry {
            id: Uuid::new_v4(),
            category: Category::WarmUp,
            exercise_name: exercise.into(),
            duration_minutes: 5,
            calories: 15.75,
            logged_at: Utc::now(),
        }
    }

    #[test]
    fn test_rollup_creates_csv_and_archives_journal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("entries.jsonl");
        let csv_path = temp_dir.path().join("entries.csv");

        let mut journal = JsonlJournal::new(&journal_path);
        for i in 0..3 {
            journal.append(&create_test_entry(&format!("Exercise {}", i))).unwrap();
        }

        let count = journal_to_csv_and_archive(&journal_path, &csv_path).unwrap();
        assert_eq!(count, 3);

        assert!(csv_path.exists());
        assert!(!journal_path.exists());
        assert!(journal_path.with_extension("jsonl.processed").exists());
    }

    #[test]
    fn test_rollup_appends_to_existing_csv() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("entries.jsonl");
        let csv_path = temp_dir.path().join("entries.csv");

        let mut journal = JsonlJournal::new(&journal_path);
        journal.append(&create_test_entry("Jumping Jacks")).unwrap();
        assert_eq!(journal_to_csv_and_archive(&journal_path, &csv_path).unwrap(), 1);

        let mut journal = JsonlJournal::new(&journal_path);
        journal.append(&create_test_entry("Yoga")).unwrap();
        assert_eq!(journal_to_csv_and_archive(&journal_path, &csv_path).unwrap(), 1);

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.into_records().count(), 2);
    }

    #[test]
    fn test_empty_journal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("empty.jsonl");
        let csv_path = temp_dir.path().join("entries.csv");

        File::create(&journal_path).unwrap();

        let count = journal_to_csv_and_archive(&journal_path, &csv_path).unwrap();
        assert_eq!(count, 0);
        assert!(!csv_path.exists());
    }

    #[test]
    fn test_cleanup_processed_journals() {
        let temp_dir = tempfile::tempdir().unwrap();

        File::create(temp_dir.path().join("a.jsonl.processed")).unwrap();
        File::create(temp_dir.path().join("b.jsonl.processed")).unwrap();
        File::create(temp_dir.path().join("keep.jsonl")).unwrap();

        let count = cleanup_processed_journals(temp_dir.path()).unwrap();
        assert_eq!(count, 2);

        assert!(!temp_dir.path().join("a.jsonl.processed").exists());
        assert!(temp_dir.path().join("keep.jsonl").exists());
    }
}
