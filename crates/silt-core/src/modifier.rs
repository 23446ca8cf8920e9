//! Partial-state diffs and the deep-merge engine that commits them

use crate::{Action, CacheEntry, CacheMap, Value, ValueMap};
use serde::{Deserialize, Serialize};

/// Recursively merge a partial modifier tree into `target`, in place
///
/// For each key present in `modifier`:
/// - when both sides hold a map, the merge recurses into the pair;
/// - otherwise (primitive, list, null, or type mismatch) the target value is
///   replaced wholesale. Lists are never element-merged.
///
/// Keys absent from `modifier` are left untouched, previously-absent keys
/// are created, and no key is ever deleted.
pub fn apply_modifiers(target: &mut ValueMap, modifier: &ValueMap) {
    for (key, incoming) in modifier {
        let merged_in_place = match (target.get_mut(key), incoming) {
            (Some(Value::Map(existing)), Value::Map(patch)) => {
                apply_modifiers(existing, patch);
                true
            }
            _ => false,
        };
        if !merged_in_place {
            target.insert(key.clone(), incoming.clone());
        }
    }
}

/// Compute the merge of `modifier` into `base` without committing it
pub fn merged(base: &ValueMap, modifier: &ValueMap) -> ValueMap {
    let mut result = base.clone();
    apply_modifiers(&mut result, modifier);
    result
}

/// A partial update to commit against the state tree
///
/// Mirrors the shape of [`State`](crate::State): the reserved sub-structures
/// are typed fields, so user data under `data` can never collide with the
/// pending-action queue or the cache.
///
/// Merge semantics per field:
/// - `data` is deep-merged (see [`apply_modifiers`]);
/// - each `cache` entry present overwrites the stored entry atomically
///   (token and value together);
/// - `actions`, when present, replaces the pending queue wholesale (the
///   list-overwrite rule applied to the reserved field). Reducers that want
///   to cooperate read the queue from their state snapshot and re-splice it
///   before yielding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifier {
    /// Replacement for the pending-action queue, if any
    pub actions: Option<Vec<Action>>,
    /// Cache entries to overwrite
    pub cache: CacheMap,
    /// Partial user-data tree to deep-merge
    pub data: ValueMap,
}

impl Modifier {
    /// Create an empty modifier (a committed no-op)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a top-level data key
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Use `data` as the partial tree to merge
    pub fn with_data(mut self, data: ValueMap) -> Self {
        self.data = data;
        self
    }

    /// Replace the pending-action queue
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Overwrite one cache entry
    pub fn with_cache_entry(mut self, key: impl Into<String>, entry: CacheEntry) -> Self {
        self.cache.insert(key.into(), entry);
        self
    }

    /// Check whether committing this modifier would change nothing
    pub fn is_empty(&self) -> bool {
        self.actions.is_none() && self.cache.is_empty() && self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(entries: &[(&str, Value)]) -> ValueMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_modifier_is_noop() {
        let mut state = tree(&[("a", Value::map([("x", Value::Int(1))]))]);
        let before = state.clone();
        apply_modifiers(&mut state, &ValueMap::new());
        assert_eq!(state, before);
    }

    #[test]
    fn test_deep_merge() {
        let mut state = tree(&[(
            "a",
            Value::map([("x", Value::Int(1)), ("y", Value::Int(2))]),
        )]);
        let patch = tree(&[("a", Value::map([("y", Value::Int(3))]))]);

        apply_modifiers(&mut state, &patch);

        let a = state.get("a").and_then(|v| v.as_map()).unwrap();
        assert_eq!(a.get("x"), Some(&Value::Int(1)));
        assert_eq!(a.get("y"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_lists_overwrite() {
        let mut state = tree(&[("a", Value::from(vec![1i64, 2]))]);
        let patch = tree(&[("a", Value::from(vec![3i64]))]);

        apply_modifiers(&mut state, &patch);

        assert_eq!(state.get("a"), Some(&Value::from(vec![3i64])));
    }

    #[test]
    fn test_type_mismatch_overwrites() {
        // Merging a map over a primitive replaces the primitive, and vice versa
        let mut state = tree(&[("a", Value::Int(1)), ("b", Value::map([("k", Value::Int(2))]))]);
        let patch = tree(&[
            ("a", Value::map([("k", Value::Int(9))])),
            ("b", Value::Bool(false)),
        ]);

        apply_modifiers(&mut state, &patch);

        assert_eq!(state.get("a"), Some(&Value::map([("k", Value::Int(9))])));
        assert_eq!(state.get("b"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_absent_key_created() {
        let mut state = ValueMap::new();
        let patch = tree(&[("fresh", Value::Int(7))]);

        apply_modifiers(&mut state, &patch);

        assert_eq!(state.get("fresh"), Some(&Value::Int(7)));
    }

    #[test]
    fn test_null_overwrites_but_never_deletes() {
        let mut state = tree(&[("a", Value::Int(1))]);
        let patch = tree(&[("a", Value::Null)]);

        apply_modifiers(&mut state, &patch);

        // The key survives with a null value; nothing is removed
        assert_eq!(state.get("a"), Some(&Value::Null));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_merged_leaves_base_untouched() {
        let base = tree(&[("a", Value::Int(1))]);
        let patch = tree(&[("b", Value::Int(2))]);

        let result = merged(&base, &patch);

        assert_eq!(base.len(), 1);
        assert_eq!(result.get("a"), Some(&Value::Int(1)));
        assert_eq!(result.get("b"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_modifier_builder() {
        let modifier = Modifier::new()
            .set("volume", 0.5)
            .with_cache_entry("profile", CacheEntry::new("cached"));

        assert!(!modifier.is_empty());
        assert_eq!(
            modifier.data.get("volume"),
            Some(&Value::Float(0.5))
        );
        assert!(modifier.cache.contains_key("profile"));
        assert!(modifier.actions.is_none());
    }

    #[test]
    fn test_modifier_from_ron() {
        // Modifiers double as data-driven fixtures
        let modifier: Modifier = ron::from_str(
            r#"(
                data: {
                    "volume": Float(0.5),
                    "ui": Map({"theme": String("dark")}),
                },
            )"#,
        )
        .expect("valid modifier fixture");

        assert_eq!(modifier.data.get("volume"), Some(&Value::Float(0.5)));
        let ui = modifier.data.get("ui").and_then(|v| v.as_map()).unwrap();
        assert_eq!(ui.get("theme").and_then(|v| v.as_str()), Some("dark"));
        assert!(modifier.actions.is_none());
    }
}
