//! Actions dispatched to trigger reducers

use crate::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier naming an action kind
///
/// Uses a string-based ID so action kinds stay an open set; reducers branch
/// on it with `match action.id.as_str()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub String);

impl ActionId {
    /// Create a new action ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ActionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A dispatched request for state changes
///
/// Immutable once constructed; cloning is cheap enough that actions are
/// freely duplicated into history entries and chained queues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// What kind of action this is
    pub id: ActionId,
    /// Optional payload carried to reducers (`Value::Null` when absent)
    #[serde(default)]
    pub payload: Value,
}

impl Action {
    /// Create a new action with no payload
    pub fn new(id: impl Into<ActionId>) -> Self {
        Self {
            id: id.into(),
            payload: Value::Null,
        }
    }

    /// Set the payload
    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = payload.into();
        self
    }
}
