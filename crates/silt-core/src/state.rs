//! The state tree owned by a store

use crate::{apply_modifiers, Action, CacheMap, Modifier, Value, ValueMap};
use serde::{Deserialize, Serialize};

/// The complete observable state
///
/// There is exactly one live `State` per store and it is the sole source of
/// truth; everything outside the store sees snapshot clones. The two
/// reserved sub-structures are first-class fields so user modifiers under
/// `data` cannot collide with them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    /// Chained actions queued for the dispatch pipeline
    ///
    /// Owned exclusively by the pipeline: drained and cleared after each
    /// dispatch cycle, non-empty only while a chain is in flight.
    pub actions: Vec<Action>,
    /// Token-gated cache entries
    pub cache: CacheMap,
    /// The arbitrarily-shaped user tree
    pub data: ValueMap,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a top-level data value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Set a top-level data value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Look up a cache entry, gated on its token
    ///
    /// Returns the value only when the entry exists and its stored token
    /// equals `token` (`None == None` matches). Absence and mismatch are
    /// both `None`, never an error.
    pub fn get_cache(&self, key: &str, token: Option<&str>) -> Option<&Value> {
        self.cache
            .get(key)
            .filter(|entry| entry.matches(token))
            .map(|entry| &entry.value)
    }

    /// Commit a modifier against this state
    ///
    /// `data` is deep-merged, present `cache` entries overwrite atomically,
    /// and a present `actions` list replaces the pending queue wholesale.
    pub fn apply(&mut self, modifier: &Modifier) {
        apply_modifiers(&mut self.data, &modifier.data);
        for (key, entry) in &modifier.cache {
            self.cache.insert(key.clone(), entry.clone());
        }
        if let Some(actions) = &modifier.actions {
            self.actions = actions.clone();
        }
    }

    /// Take ownership of the pending-action queue, leaving it empty
    pub fn take_pending(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    /// Reset to the initial empty shape
    pub fn reset(&mut self) {
        *self = State::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheEntry;

    #[test]
    fn test_apply_merges_data() {
        let mut state = State::new();
        state.set("session", Value::map([("user", Value::from("ada"))]));

        state.apply(
            &Modifier::new().set("session", Value::map([("active", Value::Bool(true))])),
        );

        let session = state.get("session").and_then(|v| v.as_map()).unwrap();
        assert_eq!(session.get("user").and_then(|v| v.as_str()), Some("ada"));
        assert_eq!(session.get("active"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_apply_replaces_action_queue() {
        let mut state = State::new();
        state.actions = vec![Action::new("old")];

        // A modifier without actions leaves the queue alone
        state.apply(&Modifier::new().set("x", 1));
        assert_eq!(state.actions.len(), 1);

        // A present actions list replaces it wholesale
        state.apply(&Modifier::new().with_actions(vec![Action::new("a"), Action::new("b")]));
        assert_eq!(state.actions.len(), 2);
        assert_eq!(state.actions[0].id.as_str(), "a");
    }

    #[test]
    fn test_apply_overwrites_cache_entry_atomically() {
        let mut state = State::new();
        state.apply(&Modifier::new().with_cache_entry("k", CacheEntry::new("v1")));
        state.apply(
            &Modifier::new().with_cache_entry("k", CacheEntry::new("v2").with_token("t")),
        );

        // Token and value moved together
        assert_eq!(state.get_cache("k", None), None);
        assert_eq!(state.get_cache("k", Some("t")), Some(&Value::from("v2")));
    }

    #[test]
    fn test_cache_lookup_gating() {
        let mut state = State::new();
        state.apply(&Modifier::new().with_cache_entry("k", CacheEntry::new("v1")));

        assert_eq!(state.get_cache("k", None), Some(&Value::from("v1")));
        assert_eq!(state.get_cache("k", Some("t")), None);
        assert_eq!(state.get_cache("missing", None), None);
        assert_eq!(state.get_cache("missing", Some("t")), None);
    }

    #[test]
    fn test_take_pending() {
        let mut state = State::new();
        state.actions = vec![Action::new("a")];

        let taken = state.take_pending();
        assert_eq!(taken.len(), 1);
        assert!(state.actions.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut state = State::new();
        state.set("x", 1);
        state.actions.push(Action::new("a"));

        state.reset();
        assert_eq!(state, State::new());
    }
}
