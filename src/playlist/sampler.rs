use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::{MAX_WEIGHT, SelectionConfig};
use crate::favorites::FavoriteSet;
use crate::models::Song;

/// Per-song weight multipliers: promoted songs first, then favorites, then everything else
pub struct WeightPolicy<'a> {
    config: &'a SelectionConfig,
    favorites: &'a FavoriteSet,
}

impl<'a> WeightPolicy<'a> {
    pub fn new(config: &'a SelectionConfig, favorites: &'a FavoriteSet) -> Self {
        Self { config, favorites }
    }

    pub fn weight(&self, song: &Song) -> u32 {
        if self.config.is_promoted(&song.id) {
            self.config.promoted_weight
        } else if self.favorites.contains(&song.id) {
            self.config.favorite_weight
        } else {
            1
        }
    }
}

/// Weighted sampling without replacement
pub struct WeightedSampler;

impl WeightedSampler {
    /// Draw up to `count` songs with distinct ids.
    ///
    /// Each candidate is repeated `weight(song)` times (clamped to `1..=MAX_WEIGHT`), the pool is
    /// shuffled, and the first `count` distinct ids win. Fewer songs come back when the
    /// candidates hold fewer distinct ids.
    pub fn sample<'a, R, W>(
        candidates: &[&'a Song],
        count: usize,
        weight: W,
        rng: &mut R,
    ) -> Vec<&'a Song>
    where
        R: Rng + ?Sized,
        W: Fn(&Song) -> u32,
    {
        let mut pool: Vec<&'a Song> = Vec::new();
        for &song in candidates {
            let copies = weight(song).clamp(1, MAX_WEIGHT) as usize;
            pool.extend(std::iter::repeat_n(song, copies));
        }
        pool.shuffle(rng);

        let mut selected = Vec::with_capacity(count);
        let mut selected_ids: HashSet<&str> = HashSet::new();
        for song in pool {
            if selected.len() >= count {
                break;
            }
            if selected_ids.insert(song.id.as_str()) {
                selected.push(song);
            }
        }
        selected
    }
}
