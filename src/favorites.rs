use std::collections::HashSet;

use tracing::{debug, warn};

use crate::storage::Storage;

/// Storage key holding the JSON array of favorited song ids
pub const FAVORITES_KEY: &str = "favoriteSongs";

/// Set of favorited song ids that remembers insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    order: Vec<String>,
    lookup: HashSet<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Returns false if the id was already present
    fn insert(&mut self, id: &str) -> bool {
        if !self.lookup.insert(id.to_string()) {
            return false;
        }
        self.order.push(id.to_string());
        true
    }

    /// Returns false if the id was not present
    fn remove(&mut self, id: &str) -> bool {
        if !self.lookup.remove(id) {
            return false;
        }
        self.order.retain(|existing| existing != id);
        true
    }
}

impl<'a> FromIterator<&'a str> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = FavoriteSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// What a single favorites mutation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteChange {
    pub id: String,
    pub is_favorite: bool,
    pub count: usize,
}

/// Display side that must be refreshed after every favorites mutation
pub trait FavoritesListener {
    fn favorites_changed(&mut self, change: &FavoriteChange, favorites: &FavoriteSet);
}

/// Single source of truth for favorited songs, persisted through a [`Storage`]
pub struct FavoritesStore<S: Storage> {
    storage: S,
    favorites: FavoriteSet,
    listeners: Vec<Box<dyn FavoritesListener>>,
}

impl<S: Storage> FavoritesStore<S> {
    /// Read the persisted favorites. Missing or unreadable data yields an empty set.
    pub fn load(storage: S) -> Self {
        let favorites = Self::read_favorites(&storage);
        debug!("Loaded {} favorite songs", favorites.len());
        Self {
            storage,
            favorites,
            listeners: Vec::new(),
        }
    }

    fn read_favorites(storage: &S) -> FavoriteSet {
        let saved = match storage.get_item(FAVORITES_KEY) {
            Ok(Some(saved)) => saved,
            Ok(None) => return FavoriteSet::new(),
            Err(e) => {
                warn!("Could not read favorites, starting empty: {}", e);
                return FavoriteSet::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&saved) {
            Ok(ids) => ids.iter().map(String::as_str).collect(),
            Err(e) => {
                warn!("Stored favorites are corrupt, starting empty: {}", e);
                FavoriteSet::new()
            }
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn FavoritesListener>) {
        self.listeners.push(listener);
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// Add the id if absent, remove it if present
    pub fn toggle(&mut self, id: &str) -> FavoriteChange {
        if !self.favorites.remove(id) {
            self.favorites.insert(id);
        }
        self.commit(id)
    }

    /// Remove the id; absent ids leave the set unchanged
    pub fn remove(&mut self, id: &str) -> FavoriteChange {
        self.favorites.remove(id);
        self.commit(id)
    }

    #[cfg(test)]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn commit(&mut self, id: &str) -> FavoriteChange {
        self.persist();

        let change = FavoriteChange {
            id: id.to_string(),
            is_favorite: self.favorites.contains(id),
            count: self.favorites.len(),
        };
        for listener in &mut self.listeners {
            listener.favorites_changed(&change, &self.favorites);
        }
        change
    }

    // The in-memory set stays authoritative when the write fails
    fn persist(&mut self) {
        let ids: Vec<&str> = self.favorites.iter().collect();
        let serialized = match serde_json::to_string(&ids) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("Could not serialize favorites: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(FAVORITES_KEY, &serialized) {
            warn!("Could not persist favorites: {}", e);
        }
    }
}
