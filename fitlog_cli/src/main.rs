use clap::{Parser, Subcommand};
use fitlog_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Workout tracking and fitness metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save or inspect the user profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Log a workout entry
    Add {
        /// Category: Warm-up, Workout or Cool-down
        category: String,
        /// Exercise name
        exercise: String,
        /// Duration in minutes
        duration: String,
    },

    /// Show logged workouts with running totals
    Summary,

    /// Show lifetime totals per category
    Progress,

    /// Assemble the fitness report (requires a saved profile)
    Report,

    /// Roll up journaled entries to the CSV archive
    Rollup {
        /// Clean up processed journal files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Save a new profile, replacing any previous one
    Set {
        #[arg(long)]
        name: String,
        #[arg(long)]
        regn_id: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        height: String,
        #[arg(long)]
        weight: String,
    },
    /// Show the saved profile
    Show,
}

/// Resolved file locations under the data directory
struct Paths {
    journal: PathBuf,
    csv: PathBuf,
    profile: PathBuf,
}

impl Paths {
    fn new(data_dir: &std::path::Path) -> Self {
        Self {
            journal: data_dir.join("journal").join("entries.jsonl"),
            csv: data_dir.join("entries.csv"),
            profile: data_dir.join("profile.json"),
        }
    }
}

fn main() -> Result<()> {
    fitlog_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = Paths::new(&data_dir);

    match cli.command {
        Commands::Profile { command } => match command {
            ProfileCommands::Set {
                name,
                regn_id,
                age,
                gender,
                height,
                weight,
            } => cmd_profile_set(
                &paths,
                ProfileInput {
                    name,
                    registration_id: regn_id,
                    age,
                    gender,
                    height_cm: height,
                    weight_kg: weight,
                },
            ),
            ProfileCommands::Show => cmd_profile_show(&paths),
        },
        Commands::Add {
            category,
            exercise,
            duration,
        } => cmd_add(&config, &paths, &category, &exercise, &duration),
        Commands::Summary => cmd_summary(&config, &paths),
        Commands::Progress => cmd_progress(&config, &paths),
        Commands::Report => cmd_report(&config, &paths),
        Commands::Rollup { cleanup } => cmd_rollup(&paths, cleanup),
    }
}

/// Rebuild a tracker from the persisted profile and entry history
fn load_tracker(config: &Config, paths: &Paths) -> Result<Tracker> {
    let mets = MetTable::from_config(&config.calories);
    let errors = mets.validate();
    if !errors.is_empty() {
        eprintln!("MET table errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Config("Invalid MET table".into()));
    }

    let profiles = ProfileStore::load(&paths.profile)?;
    let entries = load_entries(&paths.journal, &paths.csv)?;
    tracing::debug!("Rebuilt session log with {} entries", entries.len());
    Ok(Tracker::from_parts(config, profiles, SessionLog::from_entries(entries)))
}

fn cmd_profile_set(paths: &Paths, input: ProfileInput) -> Result<()> {
    let mut store = ProfileStore::load(&paths.profile)?;
    let profile = store.save_profile(&input)?;
    store.save(&paths.profile)?;

    println!("✓ Profile saved for {}", profile.name);
    println!("  BMI: {:.2}", profile.bmi);
    println!("  BMR: {:.2} kcal/day", profile.bmr);
    Ok(())
}

fn cmd_profile_show(paths: &Paths) -> Result<()> {
    let store = ProfileStore::load(&paths.profile)?;
    match store.profile() {
        Some(profile) => {
            println!("{} (#{})", profile.name, profile.registration_id);
            println!("  Age: {}  Gender: {}", profile.age, profile.gender);
            println!(
                "  Height: {} cm  Weight: {} kg",
                profile.height_cm, profile.weight_kg
            );
            println!("  BMI: {:.2}  BMR: {:.2} kcal/day", profile.bmi, profile.bmr);
        }
        None => println!("No profile saved."),
    }
    Ok(())
}

fn cmd_add(
    config: &Config,
    paths: &Paths,
    category: &str,
    exercise: &str,
    duration: &str,
) -> Result<()> {
    let mut tracker = load_tracker(config, paths)?;
    let entry = tracker.add_entry(category, exercise, duration)?;

    let mut journal = JsonlJournal::new(&paths.journal);
    journal.append(&entry)?;

    println!(
        "✓ Logged {} - {} min ({:.1} kcal) in {}",
        entry.exercise_name, entry.duration_minutes, entry.calories, entry.category
    );
    Ok(())
}

fn cmd_summary(config: &Config, paths: &Paths) -> Result<()> {
    let tracker = load_tracker(config, paths)?;

    match tracker.summarize() {
        Some(summary) => {
            for category in &summary.categories {
                for entry in &category.entries {
                    println!(
                        "{} - {} min ({:.1} kcal)",
                        entry.exercise_name, entry.duration_minutes, entry.calories
                    );
                }
            }
            println!("Total Calories: {:.1} kcal", summary.total_calories);
            println!("Total Duration: {} minutes", summary.total_duration_minutes);
        }
        None => println!("No workouts logged yet."),
    }
    Ok(())
}

fn cmd_progress(config: &Config, paths: &Paths) -> Result<()> {
    let tracker = load_tracker(config, paths)?;

    match tracker.lifetime_totals() {
        Some(totals) => {
            println!("LIFETIME TOTAL: {} minutes", totals.total_minutes);
            for category in &totals.per_category {
                println!(
                    "  {}: {} min ({:.1} kcal)",
                    category.category, category.total_minutes, category.total_calories
                );
            }
        }
        None => println!("No workout data logged yet."),
    }
    Ok(())
}

fn cmd_report(config: &Config, paths: &Paths) -> Result<()> {
    let tracker = load_tracker(config, paths)?;
    let report = tracker.export_report()?;

    println!("Weekly Fitness Report");
    println!("─────────────────────────────────────────");
    println!("Name: {} (#{})", report.name, report.registration_id);
    println!("Age: {}  Gender: {}", report.age, report.gender);
    println!(
        "Height: {} cm  Weight: {} kg",
        report.height_cm, report.weight_kg
    );
    println!("BMI: {:.2}  BMR: {:.2} kcal/day", report.bmi, report.bmr);
    println!("Total Workouts: {}", report.total_workouts);

    if !report.rows.is_empty() {
        println!();
        for row in &report.rows {
            println!(
                "  {} | {} | {} min | {:.1} kcal | {}",
                row.category, row.exercise_name, row.duration_minutes, row.calories, row.date
            );
        }
    }

    println!();
    println!("Suggested filename: {}", report.suggested_filename());
    Ok(())
}

fn cmd_rollup(paths: &Paths, cleanup: bool) -> Result<()> {
    if !paths.journal.exists() {
        println!("No journal file found - nothing to roll up.");
        return Ok(());
    }

    let count = fitlog_core::archive::journal_to_csv_and_archive(&paths.journal, &paths.csv)?;

    println!("✓ Rolled up {} entries to CSV", count);
    println!("  CSV: {}", paths.csv.display());

    if cleanup {
        if let Some(journal_dir) = paths.journal.parent() {
            let cleaned = fitlog_core::archive::cleanup_processed_journals(journal_dir)?;
            if cleaned > 0 {
                println!("✓ Cleaned up {} processed journal files", cleaned);
            }
        }
    }

    Ok(())
}
