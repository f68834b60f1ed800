//! HTTP server binary for the Fitlog workout tracker.

mod app;

use app::AppState;
use clap::Parser;
use fitlog_core::{
    load_entries, Config, Error, MetTable, ProfileStore, Result, SessionLog, Tracker,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;

#[derive(Parser)]
#[command(name = "fitlog-server")]
#[command(about = "Workout tracking HTTP server", long_about = None)]
struct Cli {
    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    /// Override data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fitlog_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    let mets = MetTable::from_config(&config.calories);
    let errors = mets.validate();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("MET table error: {}", error);
        }
        return Err(Error::Config("Invalid MET table".into()));
    }

    // Rebuild state from whatever previous runs persisted
    let journal_path = data_dir.join("journal").join("entries.jsonl");
    let csv_path = data_dir.join("entries.csv");
    let profile_path = data_dir.join("profile.json");

    let profiles = ProfileStore::load(&profile_path)?;
    let entries = load_entries(&journal_path, &csv_path)?;
    tracing::info!("Rebuilt session log with {} entries", entries.len());

    let tracker = Tracker::from_parts(&config, profiles, SessionLog::from_entries(entries));

    let state = AppState {
        tracker: Arc::new(Mutex::new(tracker)),
        journal_path,
        profile_path,
    };

    let router = app::router(state).layer(TraceLayer::new_for_http());

    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", config.server.bind_addr, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
