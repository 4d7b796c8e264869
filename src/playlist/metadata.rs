use super::utils::format_seconds;
use crate::models::Song;

/// Songs chosen for one request, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub songs: Vec<&'a Song>,
}

impl<'a> Selection<'a> {
    pub fn new(songs: Vec<&'a Song>) -> Self {
        Self { songs }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn total_seconds(&self) -> u32 {
        self.songs.iter().map(|song| song.seconds).sum()
    }

    /// Total running time as `m:ss`
    pub fn total_time(&self) -> String {
        format_seconds(self.total_seconds())
    }

    pub fn ids(&self) -> Vec<&str> {
        self.songs.iter().map(|song| song.id.as_str()).collect()
    }
}
