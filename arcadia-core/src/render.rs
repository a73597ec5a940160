//! Projection of the application state into a page description.  Nothing
//! here mutates state; hosts draw the returned `Page` however they like.

use std::sync::Arc;

use crate::{
    item::Item,
    nav::{Nav, Route},
    promise::Promise,
    state::AppState,
    taxonomy,
};

pub const EMPTY_HOME_MESSAGE: &str = "Go Try Some New Games!";
pub const RECENTS_TITLE: &str = "Recently Played";
pub const FAVORITES_TITLE: &str = "Favorites";
pub const MORE_GAMES_TITLE: &str = "More Games";
pub const NOT_FOUND_TITLE: &str = "Error: Page Not Found";
pub const GAME_LOAD_FAILED: &str = "Failed to load game.";
pub const NOT_FOUND_LOAD_FAILED: &str = "Error: Could not load 404 page";

#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub title: String,
    pub location: String,
    pub sidebar: Vec<SidebarEntry>,
    pub body: Body,
    pub search: Option<SearchPanel>,
    pub share_notice: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarEntry {
    pub zone: &'static str,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Message(&'static str),
    Sections(Vec<Section>),
    Grid(Vec<Card>),
    Game(GameView),
    NotFound(Frame),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub cards: Vec<Card>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub name: Arc<str>,
    pub kind: Arc<str>,
    pub cover: Arc<str>,
    /// Location that opening this card navigates to.
    pub location: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameView {
    pub item: Card,
    pub player: Frame,
    pub actions: Vec<Action>,
    pub fullscreen: bool,
    pub more: Section,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Favorite { active: bool },
    Fullscreen,
    Share,
}

/// An isolated surface showing a fetched document.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Loading,
    Loaded(Arc<str>),
    Failed { message: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchPanel {
    pub results: Vec<Card>,
}

pub fn render(state: &AppState) -> Page {
    let active = state.nav.active_zone();
    let sidebar = taxonomy::sidebar()
        .map(|zone| SidebarEntry {
            zone,
            active: active.as_deref() == Some(zone),
        })
        .collect();
    let body = match &state.nav {
        Nav::Home => render_home(state),
        Nav::Zone(zone) => render_zone(state, zone),
        Nav::GamePage(item) => render_game(state, item),
        Nav::NotFound => render_not_found(state),
    };
    let search = state.search.is_panel_visible().then(|| SearchPanel {
        results: cards(&state.route_prefix, &state.search.results),
    });
    Page {
        title: state.nav.title(),
        location: state.location.clone(),
        sidebar,
        body,
        search,
        share_notice: state.is_share_notice_visible(),
    }
}

fn render_home(state: &AppState) -> Body {
    let recents = state.library.recents_for_display();
    let favorites = state.library.favorites_for_display();
    if recents.is_empty() && favorites.is_empty() {
        return Body::Message(EMPTY_HOME_MESSAGE);
    }
    let mut sections = Vec::new();
    if !recents.is_empty() {
        sections.push(Section {
            title: RECENTS_TITLE,
            cards: cards(&state.route_prefix, &recents),
        });
    }
    if !favorites.is_empty() {
        sections.push(Section {
            title: FAVORITES_TITLE,
            cards: cards(&state.route_prefix, &favorites),
        });
    }
    Body::Sections(sections)
}

fn render_zone(state: &AppState, zone: &str) -> Body {
    let items = taxonomy::code_of(zone)
        .map(|code| state.catalog().items_of_type(code))
        .unwrap_or_default();
    if items.is_empty() {
        render_not_found(state)
    } else {
        Body::Grid(cards(&state.route_prefix, &items))
    }
}

fn render_game(state: &AppState, item: &Item) -> Body {
    Body::Game(GameView {
        item: card(&state.route_prefix, item),
        player: frame(&state.content, GAME_LOAD_FAILED),
        actions: vec![
            Action::Favorite {
                active: state.library.is_favorite(item),
            },
            Action::Fullscreen,
            Action::Share,
        ],
        fullscreen: state.fullscreen,
        more: Section {
            title: MORE_GAMES_TITLE,
            cards: cards(&state.route_prefix, &state.more_games),
        },
    })
}

fn render_not_found(state: &AppState) -> Body {
    Body::NotFound(frame(&state.content, NOT_FOUND_LOAD_FAILED))
}

fn frame<D>(content: &Promise<Arc<str>, D>, failure: &'static str) -> Frame {
    match content {
        Promise::Resolved(doc) => Frame::Loaded(doc.clone()),
        Promise::Rejected(err) => Frame::Failed {
            message: failure,
            reason: err.to_string(),
        },
        Promise::Empty | Promise::Deferred(_) => Frame::Loading,
    }
}

fn cards(prefix: &str, items: &[Arc<Item>]) -> Vec<Card> {
    items.iter().map(|item| card(prefix, item)).collect()
}

fn card(prefix: &str, item: &Item) -> Card {
    Card {
        name: item.name.clone(),
        kind: item.kind.clone(),
        cover: item.cover.clone(),
        location: Route::for_item(item).to_location(prefix),
    }
}
