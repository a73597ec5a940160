use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use crate::{catalog::Catalog, item::Item};

/// Case-insensitive literal substring matcher.
#[derive(Clone, Debug)]
pub struct FindQuery {
    regex: Regex,
}

impl FindQuery {
    pub fn new(query: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Self::build_regex(query)?,
        })
    }

    fn build_regex(query: &str) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
    }

    pub fn is_empty(&self) -> bool {
        self.regex.as_str().is_empty()
    }

    pub fn matches_str(&self, s: &str) -> bool {
        self.regex.is_match(s)
    }
}

/// Live search state, recomputed on every keystroke.
///
/// The panel is shown only when the trimmed query is non-empty and matches
/// at least one item; an empty query and a query without matches both hide
/// it.
#[derive(Clone, Debug, Default)]
pub struct Search {
    pub input: String,
    pub results: Vec<Arc<Item>>,
}

impl Search {
    pub fn update(&mut self, input: &str, catalog: &Catalog) {
        self.input = input.to_owned();
        let query = input.trim();
        self.results = if query.is_empty() {
            Vec::new()
        } else {
            catalog.search_by_name(query)
        };
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.results.clear();
    }

    pub fn is_panel_visible(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn result(&self, index: usize) -> Option<Arc<Item>> {
        self.results.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::item;

    fn catalog() -> Catalog {
        Catalog::new(vec![item("Pong", "Arcade"), item("Doom", "PC")])
    }

    #[test]
    fn query_matches_literal_text_ignoring_case() {
        let query = FindQuery::new("c++").unwrap();
        assert!(query.matches_str("Learn C++ Fast"));
        assert!(!query.matches_str("Learn C Fast"));
        assert!(FindQuery::new("").unwrap().is_empty());
    }

    #[test]
    fn typing_shows_matches() {
        let mut search = Search::default();
        search.update("po", &catalog());
        assert!(search.is_panel_visible());
        assert_eq!(search.results.len(), 1);
        assert_eq!(&*search.results[0].name, "Pong");
    }

    #[test]
    fn whitespace_query_hides_panel() {
        let mut search = Search::default();
        search.update("po", &catalog());
        search.update("   ", &catalog());
        assert!(!search.is_panel_visible());
        assert_eq!(search.input, "   ");
    }

    #[test]
    fn query_without_matches_hides_panel() {
        let mut search = Search::default();
        search.update("tetris", &catalog());
        assert!(!search.is_panel_visible());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let mut search = Search::default();
        search.update("  DOOM ", &catalog());
        assert_eq!(search.result(0).map(|item| item.name.clone()), Some("Doom".into()));
    }
}
