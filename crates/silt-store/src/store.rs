//! The store facade and its dispatch pipeline
//!
//! The store owns the single live [`State`] and is the only writer to it.
//! Every mutation, whether a dispatched modifier, a direct update, a cache
//! write, or a reset, goes through one commit path that merges the change,
//! records it, and notifies listeners.

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::reducer::Reducer;
use futures::StreamExt;
use parking_lot::Mutex;
use silt_core::{Action, CacheEntry, ChangeLog, HistoryEntry, Modifier, State, Value};
use silt_ring::ChangeRing;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

/// A subscriber notified after every committed change
///
/// Invoked synchronously with the state snapshot at commit time and the
/// matching history entry. Listeners observe; they do not participate in
/// the commit they are reporting.
pub type Listener = Arc<dyn Fn(&State, &HistoryEntry) + Send + Sync>;

/// Observable state container
///
/// Cloning a `Store` clones a handle to the same state; the live tree
/// itself is never handed out, only snapshot copies.
#[derive(Clone)]
pub struct Store {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<State>,
    reducers: Mutex<Arc<Vec<Box<dyn Reducer>>>>,
    history: Mutex<ChangeRing>,
    listeners: Mutex<Vec<Listener>>,
    /// Serializes top-level dispatches: a whole action tree settles before
    /// the next one starts, which is what the chained-actions queue assumes.
    gate: tokio::sync::Mutex<()>,
}

impl Store {
    /// Create a store with default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a store with a specific configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::new()),
                reducers: Mutex::new(Arc::new(Vec::new())),
                history: Mutex::new(ChangeRing::new(config.history_capacity)),
                listeners: Mutex::new(Vec::new()),
                gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Dispatch an action and resolve once its whole action tree settles
    ///
    /// Each registered reducer is invoked in registration order with a state
    /// snapshot and the action; its flow is drained one item at a time, and
    /// every produced modifier is committed through the single commit path
    /// before the next item is pulled. Pending items are awaited in place,
    /// so commit order is a single global sequence even across suspensions.
    ///
    /// After all reducers drain, the pending-action queue is taken and each
    /// chained action is dispatched the same way, depth-first: a chained
    /// action's own chain settles before its siblings start.
    ///
    /// Concurrent `dispatch` calls queue; each runs its full tree alone.
    /// For the same reason, dispatching from inside a reducer would wait on
    /// itself; chain follow-up work through the `actions` field instead.
    ///
    /// On a reducer failure the returned future resolves to that error and
    /// modifiers committed earlier in the tree stand.
    pub async fn dispatch(&self, action: Action) -> Result<State> {
        let _serial = self.shared.gate.lock().await;
        let reducers = self.shared.reducers.lock().clone();

        let mut pending = VecDeque::new();
        pending.push_back(action);

        while let Some(action) = pending.pop_front() {
            debug!(action = %action.id, "dispatching");
            for reducer in reducers.iter() {
                let snapshot = self.shared.state.lock().clone();
                let mut flow = reducer.reduce(&snapshot, &action);
                while let Some(item) = flow.next().await {
                    match item {
                        Ok(modifier) => self.commit(Some(&action), modifier),
                        Err(source) => {
                            return Err(Error::Reducer {
                                action: action.id.clone(),
                                source,
                            })
                        }
                    }
                }
            }

            // Chained actions run before anything queued by an outer level
            let chained = self.shared.state.lock().take_pending();
            for follow_up in chained.into_iter().rev() {
                pending.push_front(follow_up);
            }
        }

        Ok(self.shared.state.lock().clone())
    }

    /// Replace the entire reducer list
    ///
    /// Takes effect for dispatches issued after this call returns; a
    /// dispatch in flight keeps the list it captured at its start.
    pub fn replace_reducers(&self, reducers: Vec<Box<dyn Reducer>>) {
        *self.shared.reducers.lock() = Arc::new(reducers);
    }

    /// Snapshot of the current state
    pub fn get_state(&self) -> State {
        self.shared.state.lock().clone()
    }

    /// Commit a modifier directly, without invoking any reducer
    ///
    /// Recorded in history with no originating action.
    pub fn update(&self, modifier: Modifier) {
        self.commit(None, modifier);
    }

    /// Reset the state to its initial empty shape
    ///
    /// The merge engine never deletes keys, so the reset replaces the state
    /// wholesale; the recorded entry carries a modifier mirroring the empty
    /// shape (an emptied action queue) with no originating action.
    pub fn clear(&self) {
        let entry = HistoryEntry::manual(Modifier::new().with_actions(Vec::new()));
        let snapshot = {
            let mut state = self.shared.state.lock();
            state.reset();
            state.clone()
        };
        self.record_and_notify(snapshot, entry);
    }

    /// Store a cache entry, overwriting token and value together
    pub fn set_cache(&self, key: impl Into<String>, value: impl Into<Value>, token: Option<&str>) {
        let mut entry = CacheEntry::new(value);
        if let Some(token) = token {
            entry = entry.with_token(token);
        }
        self.commit(None, Modifier::new().with_cache_entry(key, entry));
    }

    /// Read a cache entry, gated on its token
    ///
    /// `None` for a missing key or a token mismatch; never an error.
    pub fn get_cache(&self, key: &str, token: Option<&str>) -> Option<Value> {
        self.shared.state.lock().get_cache(key, token).cloned()
    }

    /// Register a listener
    ///
    /// Registration is a set: adding a listener that is already registered
    /// (same `Arc`) is a no-op, so a listener fires once per commit no
    /// matter how often it was added.
    pub fn add_listener(&self, listener: Listener) {
        let mut listeners = self.shared.listeners.lock();
        if listeners.iter().any(|known| Arc::ptr_eq(known, &listener)) {
            return;
        }
        listeners.push(listener);
    }

    /// Unregister a listener; a no-op if it is not registered
    pub fn remove_listener(&self, listener: &Listener) {
        self.shared
            .listeners
            .lock()
            .retain(|known| !Arc::ptr_eq(known, listener));
    }

    /// Committed changes, oldest first, bounded by the history capacity
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.shared.history.lock().entries()
    }

    /// Change the history bound; shrinking evicts oldest entries now
    pub fn set_history_capacity(&self, capacity: usize) {
        self.shared.history.lock().set_capacity(capacity);
    }

    /// The single commit path
    fn commit(&self, action: Option<&Action>, modifier: Modifier) {
        let entry = match action {
            Some(action) => HistoryEntry::dispatched(action.clone(), modifier),
            None => HistoryEntry::manual(modifier),
        };
        let snapshot = {
            let mut state = self.shared.state.lock();
            state.apply(&entry.changes);
            state.clone()
        };
        self.record_and_notify(snapshot, entry);
    }

    fn record_and_notify(&self, snapshot: State, entry: HistoryEntry) {
        trace!(
            action = entry.action.as_ref().map(|a| a.id.as_str()),
            "committed"
        );
        self.shared.history.lock().record(entry.clone());

        // Listeners run outside every lock so they may re-enter the store
        let listeners: Vec<Listener> = self.shared.listeners.lock().clone();
        for listener in &listeners {
            listener(&snapshot, &entry);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
