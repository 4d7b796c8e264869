use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

mod commands;
mod config;
mod display;
mod error;
mod favorites;
mod models;
mod playlist;
mod storage;


use crate::commands::{Command, Outcome};
use crate::config::load_config;
use crate::display::ConsoleFavoritesView;
use crate::favorites::FavoritesStore;
use crate::models::Catalog;
use crate::playlist::SelectionConfig;
use crate::storage::FileStorage;

#[derive(Parser)]
#[command(name = "song-selector")]
#[command(about = "Pick weighted-random songs by duration or topic and manage favorites")]
#[command(version)]
struct Args {
    /// Path to the song catalog JSON file (overrides SONG_CATALOG)
    #[arg(long = "catalog")]
    catalog_file: Option<String>,

    /// Path to the favorites storage file (overrides SONG_STORAGE)
    #[arg(long = "storage")]
    storage_file: Option<String>,

    /// Path to a selection configuration JSON file
    #[arg(short = 'c', long = "config")]
    config_file: Option<String>,

    /// Verbose mode - log selection attempts
    #[arg(short = 'v', long = "verbose", conflicts_with = "quiet")]
    verbose: bool,

    /// Quiet mode - only log errors
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

fn init_logging(args: &Args) {
    let default_filter = if args.quiet {
        "error"
    } else if args.verbose {
        "song_selector=debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args);

    let config =
        load_config()?.with_overrides(args.catalog_file.clone(), args.storage_file.clone());
    let catalog_path = config.catalog_path;

    let catalog = Catalog::load_from_file(&catalog_path)
        .with_context(|| format!("Failed to load song catalog '{catalog_path}'"))?;
    if catalog.is_empty() {
        tracing::warn!("Song catalog '{}' contains no songs", catalog_path);
    }
    tracing::info!("Loaded {} songs from {}", catalog.len(), catalog_path);

    let selection_config = match &args.config_file {
        Some(path) => SelectionConfig::load_from_file(path)
            .with_context(|| format!("Failed to load selection configuration '{path}'"))?,
        None => SelectionConfig::default(),
    };

    let mut favorites = FavoritesStore::load(FileStorage::new(&config.storage_path));
    favorites.subscribe(Box::new(ConsoleFavoritesView));

    let mut rng = rand::thread_rng();
    let outcome = commands::run(
        &args.command,
        &catalog,
        &selection_config,
        &mut favorites,
        &mut rng,
    )?;
    match &outcome {
        Outcome::Rendered(text) => println!("{text}"),
        Outcome::Changed(_) => {}
        Outcome::NoSelection(e) => eprintln!("✗ {e}"),
    }
    Ok(outcome.exit_code())
}
