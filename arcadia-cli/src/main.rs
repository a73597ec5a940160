use std::{
    env,
    io::{self, BufRead, Write},
    sync::Arc,
    time::{Duration, Instant},
};

use arcadia_core::{
    clipboard::{Clipboard, MemoryClipboard, SystemClipboard},
    config::Config,
    fetch::HttpClient,
    promise::PromiseState,
    render::{Action, Body, Card, Frame, Page},
    router::Router,
    storage::{FileStorage, MemoryStorage, Storage},
};
use env_logger::{Builder, Env};

const ENV_LOG: &str = "ARCADIA_LOG";
const ENV_LOG_STYLE: &str = "ARCADIA_LOG_STYLE";

const HELP: &str = "\
commands:
  home                  go to the home view
  zone <name>           open a zone, e.g. `zone Game Boy`
  goto <location>       resolve a location, e.g. `goto /games/PC/Doom`
  open <n>              open the n-th card on the page
  search <query>        live search, empty query hides the panel
  pick <n>              open the n-th search result
  fav                   toggle favorite on the open game
  share                 copy a link to the current view
  fullscreen            toggle fullscreen on the open game
  back                  go to the previous location
  show                  print the current page
  quit";

fn main() {
    Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "info")
            .write_style(ENV_LOG_STYLE),
    )
    .init();

    let config = Config::load().unwrap_or_else(|| {
        let config = Config::default();
        if let Err(err) = config.save() {
            log::warn!("failed to write default config: {err}");
        }
        config
    });
    let location = env::args()
        .nth(1)
        .unwrap_or_else(|| format!("/{}/Home", config.route_prefix));

    let storage: Box<dyn Storage> = match Config::data_dir().map(FileStorage::new) {
        Some(Ok(storage)) => Box::new(storage),
        Some(Err(err)) => {
            log::error!("failed to open storage, nothing will be kept: {err}");
            Box::new(MemoryStorage::new())
        }
        None => {
            log::error!("no data directory, nothing will be kept");
            Box::new(MemoryStorage::new())
        }
    };
    let clipboard: Box<dyn Clipboard> = match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(err) => {
            log::warn!("{err}, links will not leave this session");
            Box::new(MemoryClipboard::new())
        }
    };
    let fetcher = Arc::new(HttpClient::new(
        Config::proxy().as_deref(),
        config.fetch_timeout(),
    ));

    let mut router = Router::new(config, fetcher, storage, clipboard);
    router.start(&location);
    while router.catalog_state() == PromiseState::Deferred {
        router.wait_event(Duration::from_millis(100));
    }
    print_page(&router.page());
    println!("{HELP}");

    for line in io::stdin().lock().lines() {
        let Ok(line) = line else {
            break;
        };
        router.process_pending();
        router.tick(Instant::now());

        let (command, arg) = line
            .trim()
            .split_once(' ')
            .map(|(cmd, arg)| (cmd, arg.trim()))
            .unwrap_or((line.trim(), ""));
        match command {
            "home" => router.go_home(),
            "zone" => router.select_zone(arg),
            "goto" => router.goto(arg),
            "open" => match card_at(&router.page(), arg) {
                Some(card) => router.goto(&card.location),
                None => log::warn!("no card {arg:?}"),
            },
            "search" => {
                router.set_query(arg);
                print_search(&router.page());
                continue;
            }
            "pick" => {
                let picked = arg
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .is_some_and(|index| router.select_search_result(index));
                if !picked {
                    log::warn!("no search result {arg:?}");
                }
            }
            "fav" => match router.toggle_favorite() {
                Some(true) => println!("added to favorites"),
                Some(false) => println!("removed from favorites"),
                None => log::warn!("no game open"),
            },
            "share" => match router.share(Instant::now()) {
                Ok(url) => println!("copied {url}"),
                Err(err) => log::error!("failed to share: {err}"),
            },
            "fullscreen" if router.state().fullscreen => router.exit_fullscreen(),
            "fullscreen" => {
                if !router.request_fullscreen() {
                    log::warn!("no game open");
                }
            }
            "back" => {
                if !router.navigate_back() {
                    log::warn!("no previous location");
                }
            }
            "show" => {}
            "quit" | "exit" => break,
            "" => continue,
            _ => {
                println!("{HELP}");
                continue;
            }
        }

        // Give fast fetches a moment so the page is not always "loading".
        router.wait_event(Duration::from_millis(500));
        router.process_pending();
        print_page(&router.page());
    }
}

/// Cards of the page in the order they are printed, 1-based.
fn card_at<'a>(page: &'a Page, arg: &str) -> Option<&'a Card> {
    let index = arg.parse::<usize>().ok()?.checked_sub(1)?;
    let cards: Vec<&Card> = match &page.body {
        Body::Sections(sections) => sections.iter().flat_map(|s| &s.cards).collect(),
        Body::Grid(cards) => cards.iter().collect(),
        Body::Game(view) => view.more.cards.iter().collect(),
        Body::Message(_) | Body::NotFound(_) => Vec::new(),
    };
    cards.get(index).copied()
}

fn print_page(page: &Page) {
    let mut out = io::stdout().lock();
    let sidebar: Vec<String> = page
        .sidebar
        .iter()
        .map(|entry| {
            if entry.active {
                format!("[{}]", entry.zone)
            } else {
                entry.zone.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "\n== {} ({})", page.title, page.location);
    let _ = writeln!(out, "{}", sidebar.join(" | "));

    let mut number = 0;
    let mut print_cards = |out: &mut io::StdoutLock, cards: &[Card]| {
        for card in cards {
            number += 1;
            let _ = writeln!(out, "  {number:>3}. {} ({})", card.name, card.kind);
        }
    };
    match &page.body {
        Body::Message(message) => {
            let _ = writeln!(out, "{message}");
        }
        Body::Sections(sections) => {
            for section in sections {
                let _ = writeln!(out, "-- {}", section.title);
                print_cards(&mut out, &section.cards);
            }
        }
        Body::Grid(cards) => print_cards(&mut out, cards),
        Body::Game(view) => {
            let _ = writeln!(out, "{}", frame_line(&view.player));
            let actions: Vec<&str> = view
                .actions
                .iter()
                .map(|action| match action {
                    Action::Favorite { active: true } => "fav ★",
                    Action::Favorite { active: false } => "fav ☆",
                    Action::Fullscreen if view.fullscreen => "fullscreen (on)",
                    Action::Fullscreen => "fullscreen",
                    Action::Share => "share",
                })
                .collect();
            let _ = writeln!(out, "{}", actions.join("  "));
            let _ = writeln!(out, "-- {}", view.more.title);
            print_cards(&mut out, &view.more.cards);
        }
        Body::NotFound(frame) => {
            let _ = writeln!(out, "{}", arcadia_core::render::NOT_FOUND_TITLE);
            let _ = writeln!(out, "{}", frame_line(frame));
        }
    }
    if page.share_notice {
        let _ = writeln!(out, "(link copied)");
    }
}

fn print_search(page: &Page) {
    match &page.search {
        Some(panel) => {
            for (i, card) in panel.results.iter().enumerate() {
                println!("  {:>3}. {} ({})", i + 1, card.name, card.kind);
            }
        }
        None => println!("(no results)"),
    }
}

fn frame_line(frame: &Frame) -> String {
    match frame {
        Frame::Loading => "loading...".to_string(),
        Frame::Loaded(doc) => format!("loaded ({} bytes)", doc.len()),
        Frame::Failed { message, reason } => format!("{message} ({reason})"),
    }
}
