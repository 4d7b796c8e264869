use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Subcommand;
use rand::Rng;

use crate::display;
use crate::error::SelectionError;
use crate::favorites::{FavoriteChange, FavoritesStore};
use crate::models::Catalog;
use crate::playlist::utils::parse_duration;
use crate::playlist::{SelectionConfig, SelectionGenerator};
use crate::storage::Storage;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// 3-4 songs whose total time lies within a range
    Random {
        /// Minimum total time (m:ss or seconds)
        #[arg(long, value_parser = parse_duration)]
        min: u32,
        /// Maximum total time (m:ss or seconds)
        #[arg(long, value_parser = parse_duration)]
        max: u32,
    },
    /// 3-4 songs on one topic
    Topic { topic: String },
    /// 3-4 songs shorter than 1:45
    Short,
    /// 3-4 songs of about two minutes
    TwoMinute,
    /// 3-4 songs each lasting within a range
    Range {
        /// Minimum song length (m:ss or seconds)
        #[arg(long, value_parser = parse_duration)]
        min: u32,
        /// Maximum song length (m:ss or seconds)
        #[arg(long, value_parser = parse_duration)]
        max: u32,
    },
    /// List the topics in the catalog
    Topics,
    /// Show the full catalog
    List,
    /// Show favorite songs
    Favorites,
    /// Add a song to favorites, or remove it if already there
    Toggle { id: String },
    /// Remove a song from favorites
    Remove { id: String },
}

/// What one command produced
#[derive(Debug)]
pub enum Outcome {
    /// Text for stdout
    Rendered(String),
    /// Favorites were mutated; listeners have already refreshed the display
    Changed(FavoriteChange),
    /// The request matched nothing; favorites were not touched
    NoSelection(SelectionError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::NoSelection(_))
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_failure() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Run one command against the catalog and the favorites store.
///
/// Selection failures are reported as [`Outcome::NoSelection`]; `Err` is kept for
/// requests that cannot be carried out at all, such as toggling an unknown id.
pub fn run<S, R>(
    command: &Command,
    catalog: &Catalog,
    config: &SelectionConfig,
    favorites: &mut FavoritesStore<S>,
    rng: &mut R,
) -> Result<Outcome>
where
    S: Storage,
    R: Rng + ?Sized,
{
    let generator = SelectionGenerator::new(catalog, config, favorites.favorites());
    let selection = match command {
        Command::Random { min, max } => generator.generate_random_selection(*min, *max, rng),
        Command::Topic { topic } => generator.generate_topic_songs(topic, rng),
        Command::Short => generator.generate_short_songs(rng),
        Command::TwoMinute => generator.generate_two_minute_songs(rng),
        Command::Range { min, max } => generator.generate_time_range_songs(*min, *max, rng),
        Command::Topics => return Ok(Outcome::Rendered(display::render_topics(catalog))),
        Command::List => {
            return Ok(Outcome::Rendered(display::render_catalog(
                catalog,
                favorites.favorites(),
            )));
        }
        Command::Favorites => {
            return Ok(Outcome::Rendered(display::render_favorites(
                catalog,
                favorites.favorites(),
            )));
        }
        Command::Toggle { id } => {
            if catalog.find(id).is_none() {
                bail!("No song with id '{}' in the catalog", id);
            }
            return Ok(Outcome::Changed(favorites.toggle(id)));
        }
        Command::Remove { id } => {
            if !favorites.is_favorite(id) {
                tracing::info!("'{}' is not a favorite", id);
            }
            return Ok(Outcome::Changed(favorites.remove(id)));
        }
    };

    Ok(match selection {
        Ok(selection) => {
            Outcome::Rendered(display::render_selection(&selection, favorites.favorites()))
        }
        Err(e) => Outcome::NoSelection(e),
    })
}
