//! Silt Store - Observable state store with ordered async dispatch
//!
//! A store owns a single mutable state tree and applies partial updates
//! ("modifiers") to it through one commit path. Dispatched actions run an
//! ordered chain of reducers; each reducer yields a lazy sequence of
//! modifiers, synchronous or pending, and the pipeline commits them in a
//! strict global order. A modifier may also queue follow-up actions, which
//! the pipeline drains depth-first before the dispatch resolves.
//!
//! ```no_run
//! use silt_store::{flow, reducer_fn, Action, Modifier, Store};
//!
//! # async fn demo() -> silt_store::Result<()> {
//! let store = Store::new();
//! store.replace_reducers(vec![reducer_fn(|_state, action| {
//!     match action.id.as_str() {
//!         "rename" => flow::single(
//!             Modifier::new().set("name", action.payload.clone()),
//!         ),
//!         _ => flow::empty(),
//!     }
//! })]);
//!
//! let state = store.dispatch(Action::new("rename").with_payload("silt")).await?;
//! assert_eq!(state.get("name").and_then(|v| v.as_str()), Some("silt"));
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod reducer;
mod store;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use reducer::{flow, reducer_fn, BoxError, ModifierFlow, Reducer};
pub use store::{Listener, Store};

// Re-export the data model so depending on silt-store alone is enough
pub use silt_core::{
    apply_modifiers, merged, Action, ActionId, CacheEntry, CacheMap, ChangeLog, HistoryEntry,
    Modifier, State, Value, ValueMap,
};
pub use silt_ring::ChangeRing;
