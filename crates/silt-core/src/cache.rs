//! Token-gated cache entries stored inside the state tree

use crate::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single cached value, optionally guarded by a token
///
/// A lookup only yields the value when the stored token equals the supplied
/// one; `None == None` counts as a match for the untokened case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Guard token; `None` means the entry is readable without a token
    pub token: Option<String>,
    /// The cached value
    pub value: Value,
}

/// Cache storage: string key to entry
pub type CacheMap = IndexMap<String, CacheEntry>;

impl CacheEntry {
    /// Create an entry without a token
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            token: None,
            value: value.into(),
        }
    }

    /// Set the guard token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Check whether the supplied token unlocks this entry
    pub fn matches(&self, token: Option<&str>) -> bool {
        self.token.as_deref() == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untokened_entry() {
        let entry = CacheEntry::new("v1");
        assert!(entry.matches(None));
        assert!(!entry.matches(Some("t")));
    }

    #[test]
    fn test_tokened_entry() {
        let entry = CacheEntry::new("v2").with_token("t");
        assert!(entry.matches(Some("t")));
        assert!(!entry.matches(Some("other")));
        assert!(!entry.matches(None));
    }
}
