use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::StorageError;

/// Key/value persistence for small pieces of client state
#[cfg_attr(test, mockall::automock)]
pub trait Storage {
    /// Returns `Ok(None)` when the key has never been written
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Storage backed by a single JSON object file mapping keys to string values
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/song-selector/storage.json`, or the working directory if no data dir exists
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("song-selector")
            .join("storage.json")
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Sibling file the next write goes to before being renamed over `path`
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "storage.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Unparseable JSON is replaced; a file we cannot read is left alone
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StorageError::Json(e)) => {
                warn!("Replacing corrupt storage file {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&entries)?;
        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.path)?;
        debug!("Wrote key '{}' to {}", key, self.path.display());
        Ok(())
    }
}

/// Storage that lives only as long as the value itself
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. to simulate state left by an earlier session
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "song-selector-test-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("storage.json")
    }

    #[test]
    fn test_file_storage_missing_file_reads_as_absent() {
        let storage = FileStorage::new(temp_storage_path("missing"));
        assert!(storage.get_item("favoriteSongs").unwrap().is_none());
    }

    #[test]
    fn test_file_storage_round_trips_and_keeps_other_keys() {
        let path = temp_storage_path("roundtrip");
        let mut storage = FileStorage::new(&path);

        storage.set_item("theme", "dark").unwrap();
        storage.set_item("favoriteSongs", r#"["PL1"]"#).unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(
            reopened.get_item("favoriteSongs").unwrap().as_deref(),
            Some(r#"["PL1"]"#)
        );

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_storage_corrupt_file_is_an_error_on_read_but_overwritten_on_write() {
        let path = temp_storage_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        let mut storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get_item("favoriteSongs"),
            Err(StorageError::Json(_))
        ));

        storage.set_item("favoriteSongs", "[]").unwrap();
        assert_eq!(
            storage.get_item("favoriteSongs").unwrap().as_deref(),
            Some("[]")
        );

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_storage_unreadable_file_fails_write_and_is_left_intact() {
        let path = temp_storage_path("unreadable");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let original: &[u8] = b"\xff\xfe{\"theme\":\"dark\"}";
        std::fs::write(&path, original).unwrap();

        let mut storage = FileStorage::new(&path);
        assert!(matches!(
            storage.set_item("favoriteSongs", r#"["PL1"]"#),
            Err(StorageError::Io(_))
        ));
        assert_eq!(std::fs::read(&path).unwrap(), original);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_storage_write_leaves_no_temp_file() {
        let path = temp_storage_path("tmpfile");
        let mut storage = FileStorage::new(&path);

        storage.set_item("favoriteSongs", "[]").unwrap();
        storage.set_item("favoriteSongs", r#"["S01"]"#).unwrap();

        assert!(path.exists());
        assert!(!storage.tmp_path().exists());
        assert_eq!(
            storage.get_item("favoriteSongs").unwrap().as_deref(),
            Some(r#"["S01"]"#)
        );

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_memory_storage_with_item() {
        let storage = MemoryStorage::new().with_item("k", "v");
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        assert!(storage.get_item("other").unwrap().is_none());
    }
}
