use std::sync::Arc;

use url::Url;

use crate::{item::Item, taxonomy};

/// The active view.  Exactly one is current at a time and it is always kept
/// in sync with the router's location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Nav {
    Home,
    Zone(Arc<str>),
    GamePage(Arc<Item>),
    NotFound,
}

impl Nav {
    pub fn title(&self) -> String {
        match self {
            Nav::Home => taxonomy::HOME.to_string(),
            Nav::Zone(zone) => zone.to_string(),
            Nav::GamePage(item) => item.name.to_string(),
            Nav::NotFound => "Not Found".to_string(),
        }
    }

    /// Sidebar entry highlighted for this view.
    pub fn active_zone(&self) -> Option<Arc<str>> {
        match self {
            Nav::Home => Some(taxonomy::HOME.into()),
            Nav::Zone(zone) => Some(zone.clone()),
            Nav::GamePage(item) => Some(
                taxonomy::display_name_of(&item.kind)
                    .map(Arc::from)
                    .unwrap_or_else(|| item.kind.clone()),
            ),
            Nav::NotFound => None,
        }
    }
}

/// A decoded addressable location, before it is resolved against the
/// catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Zone(String),
    Game { kind: String, name: String },
    Invalid,
}

impl Route {
    /// Parse either a bare path (`/games/PC`) or an absolute URL.  Paths
    /// outside `prefix` resolve to `Home`.
    pub fn parse(prefix: &str, location: &str) -> Self {
        let path = match Url::parse(location) {
            Ok(url) => url.path().to_owned(),
            Err(_) => location
                .split(&['?', '#'][..])
                .next()
                .unwrap_or_default()
                .to_owned(),
        };
        let mut segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        if segments.first() != Some(&prefix) {
            return Route::Home;
        }
        segments.remove(0);
        if segments.last() == Some(&"") {
            segments.pop();
        }
        let decoded: Option<Vec<String>> = segments
            .iter()
            .map(|segment| urlencoding::decode(segment).ok().map(|s| s.into_owned()))
            .collect();
        let Some(decoded) = decoded else {
            return Route::Invalid;
        };
        match decoded.as_slice() {
            [] => Route::Home,
            [zone] if zone == taxonomy::HOME => Route::Home,
            [zone] if !zone.is_empty() => Route::Zone(zone.to_owned()),
            [kind, name] if !kind.is_empty() && !name.is_empty() => Route::Game {
                kind: kind.to_owned(),
                name: name.to_owned(),
            },
            _ => Route::Invalid,
        }
    }

    pub fn to_location(&self, prefix: &str) -> String {
        match self {
            Route::Home | Route::Invalid => format!("/{prefix}/{}", taxonomy::HOME),
            Route::Zone(zone) => format!("/{prefix}/{}", urlencoding::encode(zone)),
            Route::Game { kind, name } => format!(
                "/{prefix}/{}/{}",
                urlencoding::encode(kind),
                urlencoding::encode(name)
            ),
        }
    }

    pub fn for_item(item: &Item) -> Self {
        Route::Game {
            kind: item.kind.to_string(),
            name: item.name.to_string(),
        }
    }
}
