//! Silt Core - State tree and modifier merge engine
//!
//! This crate provides the data model shared by the silt crates:
//! - Dynamic value types (`Value`, `ValueMap`)
//! - Actions and action identifiers
//! - Modifiers (partial-state diffs) and the deep-merge engine
//! - Token-gated cache entries
//! - Change history records and the `ChangeLog` storage trait
//!
//! The dispatch pipeline that drives these types lives in `silt-store`;
//! the default bounded history buffer lives in `silt-ring`.

mod action;
mod cache;
mod history;
mod modifier;
mod state;
mod value;

pub use action::{Action, ActionId};
pub use cache::{CacheEntry, CacheMap};
pub use history::{ChangeLog, HistoryEntry};
pub use modifier::{apply_modifiers, merged, Modifier};
pub use state::State;
pub use value::{Value, ValueMap};
