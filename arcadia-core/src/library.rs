use std::sync::Arc;

use crate::{
    error::Error,
    item::Item,
    storage::{Storage, FAVORITES_KEY, RECENTS_KEY},
};

pub const RECENTS_DISPLAY_LIMIT: usize = 10;

/// Recently opened and favorite items, persisted after every mutation.
///
/// The in-memory lists are authoritative for the session.  A failed write is
/// logged and the change is kept.
pub struct Library {
    recents: Vec<Arc<Item>>,
    favorites: Vec<Arc<Item>>,
    storage: Box<dyn Storage>,
}

impl Library {
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let recents = read_list(storage.as_ref(), RECENTS_KEY);
        let favorites = read_list(storage.as_ref(), FAVORITES_KEY);
        log::info!(
            "loaded library: {} recents, {} favorites",
            recents.len(),
            favorites.len()
        );
        Self {
            recents,
            favorites,
            storage,
        }
    }

    /// Append `item` unless an entry with the same identity already exists.
    /// Existing entries keep their position.
    pub fn record_opened(&mut self, item: &Arc<Item>) {
        if self.recents.iter().any(|recent| recent.same_as(item)) {
            return;
        }
        self.recents.push(item.clone());
        write_list(self.storage.as_mut(), RECENTS_KEY, &self.recents);
    }

    /// Most recent first, at most `RECENTS_DISPLAY_LIMIT` entries.
    pub fn recents_for_display(&self) -> Vec<Arc<Item>> {
        self.recents
            .iter()
            .rev()
            .take(RECENTS_DISPLAY_LIMIT)
            .cloned()
            .collect()
    }

    pub fn recents(&self) -> &[Arc<Item>] {
        &self.recents
    }

    pub fn is_favorite(&self, item: &Item) -> bool {
        self.favorites.iter().any(|favorite| favorite.same_as(item))
    }

    /// Returns whether `item` is a favorite after the toggle.
    pub fn toggle_favorite(&mut self, item: &Arc<Item>) -> bool {
        let is_favorite = match self.favorites.iter().position(|fav| fav.same_as(item)) {
            Some(index) => {
                self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(item.clone());
                true
            }
        };
        write_list(self.storage.as_mut(), FAVORITES_KEY, &self.favorites);
        is_favorite
    }

    pub fn favorites_for_display(&self) -> Vec<Arc<Item>> {
        self.favorites.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.recents.is_empty() && self.favorites.is_empty()
    }
}

fn read_list(storage: &dyn Storage, key: &str) -> Vec<Arc<Item>> {
    let value = match storage.get(key) {
        Ok(Some(value)) => value,
        Ok(None) => return Vec::new(),
        Err(err) => {
            log::error!("failed to read {}: {}", key, err);
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<Item>>(&value) {
        Ok(items) => items.into_iter().map(Arc::new).collect(),
        Err(err) => {
            log::warn!("discarding unreadable {}: {}", key, err);
            Vec::new()
        }
    }
}

fn write_list(storage: &mut dyn Storage, key: &str, items: &[Arc<Item>]) {
    let result = serde_json::to_string(items)
        .map_err(Error::from)
        .and_then(|value| storage.set(key, &value));
    if let Err(err) = result {
        log::error!("failed to save {}: {}", key, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{item::item, storage::MemoryStorage};

    fn names(items: &[Arc<Item>]) -> Vec<&str> {
        items.iter().map(|item| &*item.name).collect()
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, Error> {
            Err(Error::Timeout)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), Error> {
            Err(Error::Timeout)
        }
    }

    #[test]
    fn recording_twice_keeps_length_and_position() {
        let mut library = Library::load(Box::new(MemoryStorage::new()));
        let pong = Arc::new(item("Pong", "Arcade"));
        let doom = Arc::new(item("Doom", "PC"));
        library.record_opened(&pong);
        library.record_opened(&doom);
        library.record_opened(&pong);
        assert_eq!(names(library.recents()), ["Pong", "Doom"]);
        assert_eq!(names(&library.recents_for_display()), ["Doom", "Pong"]);
    }

    #[test]
    fn display_is_reverse_of_last_ten() {
        let mut library = Library::load(Box::new(MemoryStorage::new()));
        for i in 0..15 {
            library.record_opened(&Arc::new(item(&format!("Game {i}"), "NES")));
        }
        let shown = library.recents_for_display();
        assert_eq!(shown.len(), RECENTS_DISPLAY_LIMIT);
        let expected: Vec<_> = (5..15).rev().map(|i| format!("Game {i}")).collect();
        assert_eq!(names(&shown), expected);
        assert_eq!(library.recents().len(), 15);
    }

    #[test]
    fn toggling_twice_restores_membership() {
        let mut library = Library::load(Box::new(MemoryStorage::new()));
        let doom = Arc::new(item("Doom", "PC"));
        assert!(!library.is_favorite(&doom));
        assert!(library.toggle_favorite(&doom));
        assert!(library.is_favorite(&doom));
        assert!(!library.toggle_favorite(&doom));
        assert!(!library.is_favorite(&doom));
    }

    #[test]
    fn favorites_are_keyed_by_kind_and_name() {
        let mut library = Library::load(Box::new(MemoryStorage::new()));
        let tetris_gb = Arc::new(item("Tetris", "GB"));
        let tetris_nes = Arc::new(item("Tetris", "NES"));
        library.toggle_favorite(&tetris_gb);
        assert!(library.is_favorite(&tetris_gb));
        assert!(!library.is_favorite(&tetris_nes));
    }

    #[test]
    fn reload_reconstructs_lists() {
        let storage = MemoryStorage::new();
        let doom = Arc::new(item("Doom", "PC"));
        let pong = Arc::new(item("Pong", "Arcade"));
        {
            let mut library = Library::load(Box::new(storage.clone()));
            library.toggle_favorite(&doom);
            library.record_opened(&pong);
        }
        let library = Library::load(Box::new(storage));
        assert_eq!(names(&library.favorites_for_display()), ["Doom"]);
        assert_eq!(names(library.recents()), ["Pong"]);
    }

    #[test]
    fn corrupt_store_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(RECENTS_KEY, "not json").unwrap();
        let library = Library::load(Box::new(storage));
        assert!(library.is_empty());
    }

    #[test]
    fn write_failures_keep_in_memory_changes() {
        let mut library = Library::load(Box::new(FailingStorage));
        let pong = Arc::new(item("Pong", "Arcade"));
        library.record_opened(&pong);
        assert!(library.toggle_favorite(&pong));
        assert_eq!(library.recents().len(), 1);
        assert!(library.is_favorite(&pong));
    }
}
