use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use rand::{rngs::StdRng, SeedableRng};
use url::Url;

use crate::{
    catalog::Catalog,
    clipboard::Clipboard,
    config::Config,
    error::Error,
    fetch::Fetch,
    item::Item,
    library::Library,
    loader::{Event, LoadKey, Loader},
    nav::{Nav, Route},
    promise::PromiseState,
    render::{render, Page},
    state::AppState,
    storage::Storage,
    taxonomy,
    util::Sequence,
};

const MORE_GAMES_COUNT: usize = 10;

/// Owns the application state and drives every view transition.
///
/// All mutation happens on the thread calling into the router.  Fetches run
/// on the loader's workers and come back as `Event`s, which the host feeds
/// in through `process_pending` or `wait_event`.
pub struct Router {
    state: AppState,
    config: Config,
    loader: Loader,
    events: Receiver<Event>,
    clipboard: Box<dyn Clipboard>,
    rng: StdRng,
    seq: Sequence,
    back_stack: Vec<String>,
    pending_location: Option<String>,
}

impl Router {
    pub fn new(
        config: Config,
        fetcher: Arc<dyn Fetch>,
        storage: Box<dyn Storage>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let (sender, events) = unbounded();
        let loader = Loader::new(fetcher, config.loader_threads, sender);
        let library = Library::load(storage);
        let location = Route::Home.to_location(&config.route_prefix);
        Self {
            state: AppState::new(library, config.route_prefix.clone(), location),
            config,
            loader,
            events,
            clipboard,
            rng: StdRng::from_os_rng(),
            seq: Sequence::default(),
            back_stack: Vec::new(),
            pending_location: None,
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Kick off the catalog load.  `location` is resolved into the initial
    /// view once the catalog has arrived, whether or not the load succeeded,
    /// unless the user has navigated elsewhere in the meantime.
    pub fn start(&mut self, location: &str) {
        self.state.location = location.to_owned();
        self.pending_location = Some(location.to_owned());
        self.state.catalog.defer_default();
        self.loader.load_catalog(&self.config.catalog_url);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn nav(&self) -> &Nav {
        &self.state.nav
    }

    pub fn location(&self) -> &str {
        &self.state.location
    }

    pub fn catalog_state(&self) -> PromiseState {
        self.state.catalog.state()
    }

    pub fn page(&self) -> Page {
        render(&self.state)
    }
}

// Event processing.
impl Router {
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::CatalogLoaded(res) => self.catalog_loaded(res),
            Event::ContentLoaded(key, res) => {
                if self.state.content.update((key.clone(), res)) {
                    self.state.content_started = None;
                } else {
                    log::debug!("discarding stale load of {} (#{})", key.url, key.seq);
                }
            }
        }
    }

    /// Handle every event that has already arrived.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Block for at most `timeout` waiting for one event.
    pub fn wait_event(&mut self, timeout: Duration) -> bool {
        match self.events.recv_timeout(timeout) {
            Ok(event) => {
                self.handle(event);
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Expire time-bound state: the share acknowledgment and content loads
    /// that have been pending longer than the fetch timeout.
    pub fn tick(&mut self, now: Instant) {
        if matches!(self.state.share_notice_until, Some(until) if now >= until) {
            self.state.share_notice_until = None;
        }
        let Some(started) = self.state.content_started else {
            return;
        };
        if now.saturating_duration_since(started) < self.config.fetch_timeout() {
            return;
        }
        if let Some(key) = self.state.content.deferred() {
            log::warn!("loading {} timed out", key.url);
            self.state.content.reject(Error::Timeout);
        }
        self.state.content_started = None;
    }

    fn catalog_loaded(&mut self, res: Result<Vec<Item>, Error>) {
        match res {
            Ok(items) => {
                log::info!("loaded catalog: {} items", items.len());
                self.state.catalog.resolve(Catalog::new(items));
            }
            Err(err) => {
                log::error!("failed to load catalog: {}", err);
                self.state.catalog.reject(err);
            }
        }
        // Queries typed while loading saw an empty store.
        if !self.state.search.input.is_empty() {
            let input = self.state.search.input.clone();
            let catalog = self.state.catalog.resolved().unwrap_or(Catalog::empty());
            self.state.search.update(&input, catalog);
        }
        if let Some(location) = self.pending_location.take() {
            self.resolve(&location);
        }
    }
}

// User actions.
impl Router {
    pub fn go_home(&mut self) {
        self.push_location(Route::Home);
        self.show_home();
    }

    /// Select a sidebar entry.  `Home` goes to the landing view.
    pub fn select_zone(&mut self, zone: &str) {
        if zone == taxonomy::HOME {
            self.go_home();
        } else {
            self.push_location(Route::Zone(zone.to_owned()));
            self.show_zone(zone);
        }
    }

    pub fn open_item(&mut self, item: Arc<Item>) {
        self.push_location(Route::for_item(&item));
        self.show_item(item);
    }

    /// Resolve an arbitrary location, as a deep link would.
    pub fn goto(&mut self, location: &str) {
        if location != self.state.location {
            let previous = std::mem::replace(&mut self.state.location, location.to_owned());
            self.back_stack.push(previous);
            self.pending_location = None;
        }
        self.resolve(location);
    }

    /// Return to the previous location.  Returns `false` at the start of
    /// the history.
    pub fn navigate_back(&mut self) -> bool {
        match self.back_stack.pop() {
            Some(location) => {
                self.pending_location = None;
                self.state.location = location.clone();
                self.resolve(&location);
                true
            }
            None => false,
        }
    }

    pub fn set_query(&mut self, input: &str) {
        let catalog = self.state.catalog.resolved().unwrap_or(Catalog::empty());
        self.state.search.update(input, catalog);
    }

    /// Open the `index`-th search result and clear the query.
    pub fn select_search_result(&mut self, index: usize) -> bool {
        match self.state.search.result(index) {
            Some(item) => {
                self.state.search.clear();
                self.open_item(item);
                true
            }
            None => false,
        }
    }

    /// Toggle the favorite mark of the open item.  Returns the new
    /// membership, or `None` outside a game page.
    pub fn toggle_favorite(&mut self) -> Option<bool> {
        match &self.state.nav {
            Nav::GamePage(item) => {
                let item = item.clone();
                Some(self.state.library.toggle_favorite(&item))
            }
            _ => None,
        }
    }

    /// Copy the absolute URL of the current location to the clipboard and
    /// raise the acknowledgment.
    pub fn share(&mut self, now: Instant) -> Result<String, Error> {
        let url = Url::parse(&self.config.base_url)?.join(&self.state.location)?;
        self.clipboard.set_text(url.as_str())?;
        self.state.share_notice_until = Some(now + self.config.share_notice());
        Ok(url.into())
    }

    pub fn request_fullscreen(&mut self) -> bool {
        if matches!(self.state.nav, Nav::GamePage(_)) {
            self.state.fullscreen = true;
        }
        self.state.fullscreen
    }

    pub fn exit_fullscreen(&mut self) {
        self.state.fullscreen = false;
    }
}

// View transitions.  These never touch the location; the callers decide
// whether it changes.
impl Router {
    fn resolve(&mut self, location: &str) {
        match Route::parse(&self.config.route_prefix, location) {
            Route::Home => self.show_home(),
            Route::Zone(zone) => self.show_zone(&zone),
            Route::Game { kind, name } => {
                match self.state.catalog().find_by_type_and_name(&kind, &name) {
                    Some(item) => self.show_item(item),
                    None => self.show_not_found(),
                }
            }
            Route::Invalid => self.show_not_found(),
        }
    }

    fn push_location(&mut self, route: Route) {
        let location = route.to_location(&self.config.route_prefix);
        if location != self.state.location {
            let previous = std::mem::replace(&mut self.state.location, location);
            self.back_stack.push(previous);
            self.pending_location = None;
        }
    }

    fn begin_transition(&mut self, nav: Nav) -> u64 {
        log::info!("navigating to {:?} at {}", nav.title(), self.state.location);
        self.state.nav = nav;
        self.state.content.clear();
        self.state.content_started = None;
        self.state.more_games.clear();
        self.state.fullscreen = false;
        self.seq.advance()
    }

    fn show_home(&mut self) {
        self.begin_transition(Nav::Home);
    }

    fn show_zone(&mut self, zone: &str) {
        let has_items = taxonomy::code_of(zone)
            .map(|code| !self.state.catalog().items_of_type(code).is_empty())
            .unwrap_or(false);
        if has_items {
            self.begin_transition(Nav::Zone(zone.into()));
        } else {
            self.show_not_found();
        }
    }

    fn show_item(&mut self, item: Arc<Item>) {
        let seq = self.begin_transition(Nav::GamePage(item.clone()));
        self.state.library.record_opened(&item);
        let more = self
            .state
            .catalog()
            .sample_others_of_type(&item, MORE_GAMES_COUNT, &mut self.rng);
        self.state.more_games = more;
        self.load_content(seq, item.url.clone());
    }

    fn show_not_found(&mut self) {
        let seq = self.begin_transition(Nav::NotFound);
        let url = self.config.not_found_url.as_str().into();
        self.load_content(seq, url);
    }

    fn load_content(&mut self, seq: u64, url: Arc<str>) {
        let key = LoadKey { seq, url };
        self.state.content.defer(key.clone());
        self.state.content_started = Some(Instant::now());
        self.loader.load_embeddable(key);
    }
}
