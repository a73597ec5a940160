use crate::error::Error;

/// State of an asynchronously loaded value.  `D` identifies the request a
/// deferred promise is waiting for, so that a late response to an older
/// request can be told apart and dropped.
#[derive(Clone, Debug)]
pub enum Promise<T, D = (), E = Error> {
    Empty,
    Deferred(D),
    Resolved(T),
    Rejected(E),
}

#[derive(Eq, PartialEq, Debug)]
pub enum PromiseState {
    Empty,
    Deferred,
    Resolved,
    Rejected,
}

impl<T, D, E> Promise<T, D, E> {
    pub fn state(&self) -> PromiseState {
        match self {
            Self::Empty => PromiseState::Empty,
            Self::Deferred(_) => PromiseState::Deferred,
            Self::Resolved(_) => PromiseState::Resolved,
            Self::Rejected(_) => PromiseState::Rejected,
        }
    }

    pub fn deferred(&self) -> Option<&D> {
        match self {
            Self::Deferred(def) => Some(def),
            _ => None,
        }
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Self::Resolved(val) => Some(val),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::Empty;
    }

    pub fn defer(&mut self, def: D) {
        *self = Self::Deferred(def);
    }

    pub fn resolve(&mut self, val: T) {
        *self = Self::Resolved(val);
    }

    pub fn reject(&mut self, err: E) {
        *self = Self::Rejected(err);
    }

    /// Apply a response only if this promise is still waiting for `def`.
    /// Returns `false` for a stale response.
    pub fn update(&mut self, (def, res): (D, Result<T, E>)) -> bool
    where
        D: PartialEq,
    {
        if !matches!(self, Self::Deferred(d) if *d == def) {
            return false;
        }
        *self = match res {
            Ok(val) => Self::Resolved(val),
            Err(err) => Self::Rejected(err),
        };
        true
    }
}

impl<T, D: Default, E> Promise<T, D, E> {
    pub fn defer_default(&mut self) {
        *self = Self::Deferred(D::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_applies_only_to_matching_request() {
        let mut promise: Promise<&str, u64, &str> = Promise::Empty;
        promise.defer(1);
        promise.defer(2);
        assert!(!promise.update((1, Ok("old"))));
        assert_eq!(promise.state(), PromiseState::Deferred);
        assert!(promise.update((2, Ok("new"))));
        assert_eq!(promise.resolved(), Some(&"new"));
    }

    #[test]
    fn update_after_resolution_is_ignored() {
        let mut promise: Promise<&str, u64, &str> = Promise::Empty;
        promise.defer(1);
        assert!(promise.update((1, Err("boom"))));
        assert_eq!(promise.state(), PromiseState::Rejected);
        assert!(!promise.update((1, Ok("late"))));
        assert_eq!(promise.state(), PromiseState::Rejected);
    }
}
