use std::env::VarError;
use std::path::PathBuf;

use anyhow::Result;

use crate::storage::FileStorage;

/// Configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    pub catalog_path: String,
    pub storage_path: PathBuf,
}

impl Config {
    /// Command-line paths win over whatever the environment provided
    pub fn with_overrides(
        self,
        catalog_path: Option<String>,
        storage_path: Option<String>,
    ) -> Self {
        Self {
            catalog_path: catalog_path.unwrap_or(self.catalog_path),
            storage_path: storage_path.map(PathBuf::from).unwrap_or(self.storage_path),
        }
    }
}

/// Load configuration from `.env` and environment, falling back to defaults
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    config_from_env(|key| std::env::var(key))
}

fn config_from_env(var: impl Fn(&str) -> Result<String, VarError>) -> Result<Config> {
    let catalog_path = var("SONG_CATALOG").unwrap_or_else(|_| "songs.json".to_string());
    let storage_path = match var("SONG_STORAGE") {
        Ok(path) => PathBuf::from(path),
        Err(VarError::NotPresent) => FileStorage::default_path(),
        Err(e) => return Err(anyhow::anyhow!("SONG_STORAGE is not valid: {}", e)),
    };
    Ok(Config {
        catalog_path,
        storage_path,
    })
}
