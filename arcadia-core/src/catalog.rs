use std::sync::Arc;

use rand::{seq::SliceRandom, Rng};

use crate::{item::Item, search::FindQuery};

/// The full list of items, fetched once at startup.  An unloaded catalog is
/// simply empty: nothing resolves, every filter returns no items.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<Arc<Item>>,
}

static EMPTY: Catalog = Catalog { items: Vec::new() };

impl Catalog {
    pub fn empty() -> &'static Catalog {
        &EMPTY
    }

    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: items.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn items_of_type(&self, code: &str) -> Vec<Arc<Item>> {
        self.items
            .iter()
            .filter(|item| item.is_kind(code))
            .cloned()
            .collect()
    }

    pub fn find_by_type_and_name(&self, kind: &str, name: &str) -> Option<Arc<Item>> {
        self.items.iter().find(|item| item.is(kind, name)).cloned()
    }

    /// Case-insensitive substring match on the name, in catalog order.
    pub fn search_by_name(&self, substring: &str) -> Vec<Arc<Item>> {
        let query = match FindQuery::new(substring) {
            Ok(query) => query,
            Err(err) => {
                log::warn!("cannot search for {:?}: {}", substring, err);
                return Vec::new();
            }
        };
        self.items
            .iter()
            .filter(|item| query.matches_str(&item.name))
            .cloned()
            .collect()
    }

    /// Uniform sample without replacement of at most `n` other items sharing
    /// the zone of `item`, via a partial Fisher-Yates shuffle.
    pub fn sample_others_of_type<R>(&self, item: &Item, n: usize, rng: &mut R) -> Vec<Arc<Item>>
    where
        R: Rng + ?Sized,
    {
        let mut others: Vec<_> = self
            .items
            .iter()
            .filter(|other| other.is_kind(&item.kind) && !other.same_as(item))
            .cloned()
            .collect();
        let amount = n.min(others.len());
        let (picked, _) = others.partial_shuffle(rng, amount);
        picked.to_vec()
    }
}
