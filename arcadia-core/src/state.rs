use std::{sync::Arc, time::Instant};

use crate::{
    catalog::Catalog,
    error::Error,
    item::Item,
    library::Library,
    loader::LoadKey,
    nav::Nav,
    promise::Promise,
    search::Search,
};

/// Everything the renderer projects from.  Owned and mutated only by the
/// router; the renderer reads it.
pub struct AppState {
    pub nav: Nav,
    pub location: String,
    pub route_prefix: String,
    pub catalog: Promise<Catalog, (), Error>,
    pub library: Library,
    pub search: Search,
    /// Player document on a game page, fallback document on the not-found
    /// page.
    pub content: Promise<Arc<str>, LoadKey, Error>,
    pub content_started: Option<Instant>,
    pub more_games: Vec<Arc<Item>>,
    pub share_notice_until: Option<Instant>,
    pub fullscreen: bool,
}

impl AppState {
    pub fn new(library: Library, route_prefix: String, location: String) -> Self {
        Self {
            nav: Nav::Home,
            location,
            route_prefix,
            catalog: Promise::Empty,
            library,
            search: Search::default(),
            content: Promise::Empty,
            content_started: None,
            more_games: Vec::new(),
            share_notice_until: None,
            fullscreen: false,
        }
    }

    /// The loaded catalog, or an empty one while loading or after a failed
    /// load.
    pub fn catalog(&self) -> &Catalog {
        self.catalog.resolved().unwrap_or(Catalog::empty())
    }

    pub fn is_share_notice_visible(&self) -> bool {
        self.share_notice_until.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{item::item, storage::MemoryStorage};

    #[test]
    fn catalog_is_empty_until_resolved() {
        let library = Library::load(Box::new(MemoryStorage::new()));
        let mut state = AppState::new(library, "games".into(), "/games/Home".into());
        assert!(state.catalog().is_empty());

        state.catalog.defer_default();
        assert!(state.catalog().is_empty());

        state.catalog.resolve(Catalog::new(vec![item("Doom", "PC")]));
        assert_eq!(state.catalog().len(), 1);

        state.catalog.reject(Error::Timeout);
        assert!(state.catalog().is_empty());
    }
}
