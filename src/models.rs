use serde::{Deserialize, Serialize};

/// A catalog entry as it appears in the songs file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub link: String,
    pub duration: String, // Display form, e.g. "1:45"
    pub seconds: u32,
    pub topic: String,
}

impl Default for Song {
    fn default() -> Self {
        Song {
            id: String::new(),
            title: "Unknown".to_string(),
            link: String::new(),
            duration: "0:00".to_string(),
            seconds: 0,
            topic: String::new(),
        }
    }
}

/// Read-only song list loaded once at start-up
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Load the catalog from a JSON array of songs
    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let songs: Vec<Song> = serde_json::from_str(&content)?;
        Ok(Self::new(songs))
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == id)
    }

    /// Distinct topics in the order they first appear
    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = Vec::new();
        for song in &self.songs {
            if !topics.contains(&song.topic.as_str()) {
                topics.push(&song.topic);
            }
        }
        topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str, topic: &str) -> Song {
        Song {
            id: id.to_string(),
            topic: topic.to_string(),
            ..Song::default()
        }
    }

    #[test]
    fn test_deserializes_catalog_record() {
        let json = r#"[{"id":"PL1","title":"Hallelujah","link":"https://example.org/pl1",
            "duration":"1:45","seconds":105,"topic":"praise"}]"#;
        let songs: Vec<Song> = serde_json::from_str(json).unwrap();

        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].id, "PL1");
        assert_eq!(songs[0].seconds, 105);
        assert_eq!(songs[0].duration, "1:45");
    }

    #[test]
    fn test_topics_are_distinct_in_first_seen_order() {
        let catalog = Catalog::new(vec![
            song("1", "praise"),
            song("2", "hope"),
            song("3", "praise"),
            song("4", "grace"),
        ]);

        assert_eq!(catalog.topics(), vec!["praise", "hope", "grace"]);
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::new(vec![song("S01", "hope"), song("S02", "grace")]);

        assert_eq!(catalog.find("S02").map(|s| s.topic.as_str()), Some("grace"));
        assert!(catalog.find("missing").is_none());
    }
}
