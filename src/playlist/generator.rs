use rand::Rng;
use tracing::{debug, info};

use super::filters::SongFilters;
use super::sampler::{WeightPolicy, WeightedSampler};
use super::utils::format_seconds;
use super::{DurationRange, Selection, SelectionConfig};
use crate::error::SelectionError;
use crate::favorites::FavoriteSet;
use crate::models::{Catalog, Song};

/// Builds song selections from the catalog using the configured weighting
pub struct SelectionGenerator<'a> {
    catalog: &'a Catalog,
    config: &'a SelectionConfig,
    favorites: &'a FavoriteSet,
}

impl<'a> SelectionGenerator<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a SelectionConfig, favorites: &'a FavoriteSet) -> Self {
        Self {
            catalog,
            config,
            favorites,
        }
    }

    /// Search the whole catalog for 3-4 songs whose total time lies within `[min_seconds, max_seconds]`.
    ///
    /// Each attempt draws a fresh count and a fresh weighted sample; the first one in range
    /// wins. Exhausting the attempt budget is reported as [`SelectionError::NoCombinationFound`].
    pub fn generate_random_selection<R: Rng + ?Sized>(
        &self,
        min_seconds: u32,
        max_seconds: u32,
        rng: &mut R,
    ) -> Result<Selection<'a>, SelectionError> {
        let candidates: Vec<&'a Song> = self.catalog.songs().iter().collect();
        if candidates.is_empty() {
            return Err(SelectionError::EmptyCandidateSet {
                criterion: "the catalog".to_string(),
            });
        }

        for attempt in 1..=self.config.max_attempts {
            let count = self.random_count(rng);
            let songs = self.sample(&candidates, count, rng);
            // Short draws mean the catalog cannot supply `count` songs at all
            if songs.len() < count {
                continue;
            }

            let selection = Selection::new(songs);
            let total = selection.total_seconds();
            if total >= min_seconds && total <= max_seconds {
                info!(
                    "Found {:?} totalling {} after {} attempts",
                    selection.ids(),
                    selection.total_time(),
                    attempt
                );
                return Ok(selection);
            }
            debug!(
                "Attempt {}: {} songs totalling {} outside {}-{}",
                attempt,
                count,
                format_seconds(total),
                format_seconds(min_seconds),
                format_seconds(max_seconds)
            );
        }

        Err(SelectionError::NoCombinationFound {
            min_seconds,
            max_seconds,
        })
    }

    /// Weighted pick among songs with exactly this topic
    pub fn generate_topic_songs<R: Rng + ?Sized>(
        &self,
        topic: &str,
        rng: &mut R,
    ) -> Result<Selection<'a>, SelectionError> {
        let candidates =
            SongFilters::filter(self.catalog.songs(), |song| SongFilters::matches_topic(song, topic));
        self.select_from(candidates, format!("topic \"{topic}\""), rng)
    }

    /// Weighted pick among songs shorter than 1:45
    pub fn generate_short_songs<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Selection<'a>, SelectionError> {
        let candidates =
            SongFilters::filter(self.catalog.songs(), |song| SongFilters::is_short(song, self.config));
        let criterion = format!("under {}", format_seconds(self.config.short_max_seconds));
        self.select_from(candidates, criterion, rng)
    }

    /// Weighted pick among songs of about two minutes (1:45 to 2:14)
    pub fn generate_two_minute_songs<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Selection<'a>, SelectionError> {
        let candidates = SongFilters::filter(self.catalog.songs(), |song| {
            SongFilters::is_two_minute(song, self.config)
        });
        let range = self.config.two_minute_range;
        let criterion = format!(
            "durations from {} to {}",
            format_seconds(range.min_seconds),
            format_seconds(range.max_seconds)
        );
        self.select_from(candidates, criterion, rng)
    }

    /// Weighted pick among songs whose own duration lies in `[min_seconds, max_seconds]`
    pub fn generate_time_range_songs<R: Rng + ?Sized>(
        &self,
        min_seconds: u32,
        max_seconds: u32,
        rng: &mut R,
    ) -> Result<Selection<'a>, SelectionError> {
        let range = DurationRange::new(min_seconds, max_seconds);
        let candidates =
            SongFilters::filter(self.catalog.songs(), |song| SongFilters::matches_range(song, &range));
        let criterion = format!(
            "durations from {} to {}",
            format_seconds(min_seconds),
            format_seconds(max_seconds)
        );
        self.select_from(candidates, criterion, rng)
    }

    fn select_from<R: Rng + ?Sized>(
        &self,
        candidates: Vec<&'a Song>,
        criterion: String,
        rng: &mut R,
    ) -> Result<Selection<'a>, SelectionError> {
        if candidates.is_empty() {
            return Err(SelectionError::EmptyCandidateSet { criterion });
        }
        debug!("{} candidates for {}", candidates.len(), criterion);

        let count = self.random_count(rng);
        Ok(Selection::new(self.sample(&candidates, count, rng)))
    }

    fn sample<R: Rng + ?Sized>(&self, candidates: &[&'a Song], count: usize, rng: &mut R) -> Vec<&'a Song> {
        let policy = WeightPolicy::new(self.config, self.favorites);
        WeightedSampler::sample(candidates, count, |song| policy.weight(song), rng)
    }

    fn random_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.config.min_count..=self.config.max_count)
    }
}
