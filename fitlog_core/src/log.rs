//! Session Log: per-category, append-only workout sequences.
//!
//! Invariants:
//! - All three category keys always exist, even when empty
//! - Within a category, insertion order is chronological order and is
//!   what display numbering relies on
//! - Entries are never updated or deleted

use crate::types::{Category, WorkoutEntry};
use serde::Serialize;
use std::collections::HashMap;

/// The append-only log of workout entries, keyed by category
#[derive(Clone, Debug)]
pub struct SessionLog {
    entries: HashMap<Category, Vec<WorkoutEntry>>,
}

impl Default for SessionLog {
    fn default() -> Self {
        let mut entries = HashMap::new();
        for category in Category::ALL {
            entries.insert(category, Vec::new());
        }
        Self { entries }
    }
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from persisted entries. Entries are appended in the
    /// order given, so callers should pass them sorted by `logged_at`.
    pub fn from_entries(entries: impl IntoIterator<Item = WorkoutEntry>) -> Self {
        let mut log = Self::new();
        for entry in entries {
            log.append(entry);
        }
        log
    }

    /// Append an entry to its category's sequence
    pub fn append(&mut self, entry: WorkoutEntry) {
        // All three keys exist from construction
        self.entries.entry(entry.category).or_default().push(entry);
    }

    /// Entries for one category, in insertion order
    pub fn entries(&self, category: Category) -> &[WorkoutEntry] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All entries in category order (Warm-up, Workout, Cool-down), each
    /// category chronological
    pub fn all_entries(&self) -> impl Iterator<Item = &WorkoutEntry> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.entries(category).iter())
    }

    pub fn entry_count(&self) -> usize {
        Category::ALL
            .into_iter()
            .map(|category| self.entries(category).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Per-category entry sequences plus running totals across all
    /// categories. `None` when every category is empty, so presentation
    /// layers can show a placeholder instead of zeros formatted as data.
    pub fn summarize(&self) -> Option<Summary> {
        if self.is_empty() {
            return None;
        }

        let categories = Category::ALL
            .into_iter()
            .map(|category| CategorySummary {
                category,
                entries: self.entries(category).to_vec(),
            })
            .collect();

        let total_duration_minutes = self
            .all_entries()
            .map(|e| u64::from(e.duration_minutes))
            .sum();
        let total_calories = self.all_entries().map(|e| e.calories).sum();

        Some(Summary {
            categories,
            total_duration_minutes,
            total_calories,
        })
    }

    /// Total minutes logged plus per-category breakdowns suitable for
    /// charting. `None` when nothing has been logged.
    pub fn lifetime_totals(&self) -> Option<LifetimeTotals> {
        if self.is_empty() {
            return None;
        }

        let per_category: Vec<CategoryTotals> = Category::ALL
            .into_iter()
            .map(|category| {
                let entries = self.entries(category);
                CategoryTotals {
                    category,
                    total_minutes: entries.iter().map(|e| u64::from(e.duration_minutes)).sum(),
                    total_calories: entries.iter().map(|e| e.calories).sum(),
                }
            })
            .collect();

        let total_minutes = per_category.iter().map(|c| c.total_minutes).sum();

        Some(LifetimeTotals {
            total_minutes,
            per_category,
        })
    }
}

/// One category's slice of a [`Summary`]
#[derive(Clone, Debug, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub entries: Vec<WorkoutEntry>,
}

/// Everything the summary view needs: ordered entries per category plus
/// running totals across all of them
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub categories: Vec<CategorySummary>,
    pub total_duration_minutes: u64,
    pub total_calories: f64,
}

/// Per-category totals for bar/pie breakdowns
#[derive(Clone, Debug, Serialize)]
pub struct CategoryTotals {
    pub category: Category,
    pub total_minutes: u64,
    pub total_calories: f64,
}

/// Lifetime aggregate across all categories
#[derive(Clone, Debug, Serialize)]
pub struct LifetimeTotals {
    pub total_minutes: u64,
    pub per_category: Vec<CategoryTotals>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn entry(category: Category, exercise: &str, minutes: u32, calories: f64) -> WorkoutEntry {
        WorkoutEntry {
            id: Uuid::new_v4(),
            category,
            exercise_name: exercise.into(),
            duration_minutes: minutes,
            calories,
            logged_at: Utc::now(),
        }
    }

    #[test]
    fn test_all_categories_exist_when_empty() {
        let log = SessionLog::new();
        for category in Category::ALL {
            assert!(log.entries(category).is_empty());
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_fresh_log_summarizes_to_none() {
        let log = SessionLog::new();
        assert!(log.summarize().is_none());
        assert!(log.lifetime_totals().is_none());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut log = SessionLog::new();
        log.append(entry(Category::Workout, "Running", 10, 50.0));
        log.append(entry(Category::Workout, "Cycling", 20, 80.0));
        log.append(entry(Category::WarmUp, "Jumping Jacks", 5, 15.0));

        let workout = log.entries(Category::Workout);
        assert_eq!(workout[0].exercise_name, "Running");
        assert_eq!(workout[1].exercise_name, "Cycling");
    }

    #[test]
    fn test_summary_totals_span_categories() {
        let mut log = SessionLog::new();
        log.append(entry(Category::WarmUp, "Jumping Jacks", 5, 15.75));
        log.append(entry(Category::Workout, "Running", 10, 73.5));
        log.append(entry(Category::CoolDown, "Yoga", 15, 30.0));

        let summary = log.summarize().unwrap();
        assert_eq!(summary.total_duration_minutes, 30);
        assert!((summary.total_calories - 119.25).abs() < 1e-9);
        assert_eq!(summary.categories.len(), 3);
        assert_eq!(summary.categories[0].category, Category::WarmUp);
    }

    #[test]
    fn test_lifetime_totals_per_category() {
        let mut log = SessionLog::new();
        log.append(entry(Category::Workout, "Running", 10, 73.5));
        log.append(entry(Category::Workout, "Cycling", 20, 100.0));

        let totals = log.lifetime_totals().unwrap();
        assert_eq!(totals.total_minutes, 30);

        let workout = totals
            .per_category
            .iter()
            .find(|c| c.category == Category::Workout)
            .unwrap();
        assert_eq!(workout.total_minutes, 30);

        let warm_up = totals
            .per_category
            .iter()
            .find(|c| c.category == Category::WarmUp)
            .unwrap();
        assert_eq!(warm_up.total_minutes, 0);
    }

    #[test]
    fn test_all_entries_category_then_chronological() {
        let mut log = SessionLog::new();
        log.append(entry(Category::CoolDown, "Yoga", 5, 10.0));
        log.append(entry(Category::WarmUp, "Jumping Jacks", 5, 15.0));
        log.append(entry(Category::WarmUp, "Stretch", 3, 9.0));

        let names: Vec<_> = log.all_entries().map(|e| e.exercise_name.as_str()).collect();
        assert_eq!(names, vec!["Jumping Jacks", "Stretch", "Yoga"]);
    }

    #[test]
    fn test_from_entries_rebuilds_in_order() {
        let entries = vec![
            entry(Category::Workout, "Running", 10, 73.5),
            entry(Category::Workout, "Cycling", 20, 100.0),
        ];
        let log = SessionLog::from_entries(entries);
        assert_eq!(log.entry_count(), 2);
        assert_eq!(log.entries(Category::Workout)[0].exercise_name, "Running");
    }
}
