use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single catalog entry.  Identity is the `(kind, name)` pair: the zone
/// code compared case-insensitively, the name exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Item {
    pub name: Arc<str>,
    #[serde(rename = "type")]
    pub kind: Arc<str>,
    pub url: Arc<str>,
    #[serde(default = "no_cover")]
    pub cover: Arc<str>,
}

fn no_cover() -> Arc<str> {
    "".into()
}

impl Item {
    pub fn is_kind(&self, code: &str) -> bool {
        same_kind(&self.kind, code)
    }

    pub fn same_as(&self, other: &Item) -> bool {
        self.is(&other.kind, &other.name)
    }

    pub fn is(&self, kind: &str, name: &str) -> bool {
        self.is_kind(kind) && &*self.name == name
    }
}

fn same_kind(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
pub(crate) fn item(name: &str, kind: &str) -> Item {
    Item {
        name: name.into(),
        kind: kind.into(),
        url: format!("https://games.test/{kind}/{name}.html").into(),
        cover: format!("https://games.test/{kind}/{name}.png").into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_kind_case_but_not_name_case() {
        let pong = item("Pong", "Arcade");
        assert!(pong.same_as(&item("Pong", "arcade")));
        assert!(!pong.same_as(&item("pong", "Arcade")));
        assert!(!pong.same_as(&item("Pong", "PC")));
    }

    #[test]
    fn deserializes_catalog_records() {
        let json = r#"{"name":"Doom","type":"PC","url":"https://x/doom.html","cover":"https://x/doom.png"}"#;
        let doom: Item = serde_json::from_str(json).unwrap();
        assert_eq!(&*doom.kind, "PC");
        assert_eq!(&*doom.name, "Doom");
        assert_eq!(serde_json::to_string(&doom).unwrap(), json);
    }

    #[test]
    fn record_without_cover_still_loads() {
        let json = r#"[{"name":"Pong","type":"Arcade","url":"https://x/pong.html"},
                       {"name":"Doom","type":"PC","url":"https://x/doom.html","cover":"https://x/doom.png"}]"#;
        let items: Vec<Item> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(&*items[0].cover, "");
        assert_eq!(&*items[1].cover, "https://x/doom.png");
    }
}
