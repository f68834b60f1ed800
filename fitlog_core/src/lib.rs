#![forbid(unsafe_code)]

//! Core domain model and business logic for the Fitlog workout tracker.
//!
//! This crate provides:
//! - Domain types (profile, workout entries, categories)
//! - Derived-metric formulas (BMI, BMR, MET-based calorie estimates)
//! - Profile store and session log operations
//! - Report assembly
//! - Persistence (journal, CSV archive, profile state)

pub mod types;
pub mod error;
pub mod metrics;
pub mod mets;
pub mod config;
pub mod logging;
pub mod profile;
pub mod state;
pub mod log;
pub mod journal;
pub mod archive;
pub mod history;
pub mod report;
pub mod tracker;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use metrics::DEFAULT_WEIGHT_KG;
pub use mets::{default_met_table, MetTable};
pub use profile::ProfileStore;
pub use log::{CategorySummary, CategoryTotals, LifetimeTotals, SessionLog, Summary};
pub use journal::{EntrySink, JsonlJournal};
pub use history::load_entries;
pub use report::{Report, ReportRow};
pub use tracker::Tracker;
