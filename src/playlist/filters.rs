use super::{DurationRange, SelectionConfig};
use crate::models::Song;

/// Song filtering functionality using static helper functions
pub struct SongFilters;

impl SongFilters {
    /// Exact, case-sensitive topic match
    pub fn matches_topic(song: &Song, topic: &str) -> bool {
        song.topic == topic
    }

    /// Strictly shorter than the configured short threshold (1:45 by default)
    pub fn is_short(song: &Song, config: &SelectionConfig) -> bool {
        song.seconds < config.short_max_seconds
    }

    /// Within the "about two minutes" bucket (1:45 to 2:14 by default)
    pub fn is_two_minute(song: &Song, config: &SelectionConfig) -> bool {
        config.two_minute_range.contains(song.seconds)
    }

    pub fn matches_range(song: &Song, range: &DurationRange) -> bool {
        range.contains(song.seconds)
    }

    /// Collect the songs accepted by `predicate`, keeping catalog order
    pub fn filter(songs: &[Song], predicate: impl Fn(&Song) -> bool) -> Vec<&Song> {
        songs.iter().filter(|song| predicate(song)).collect()
    }
}
