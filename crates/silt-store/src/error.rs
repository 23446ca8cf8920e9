//! Error types for silt-store

use crate::reducer::BoxError;
use silt_core::ActionId;
use thiserror::Error;

/// Store error type
///
/// Cache misses and malformed modifiers are not errors: a miss is a `None`
/// lookup, and a shape conflict is resolved by the merge engine's overwrite
/// rule.
#[derive(Error, Debug)]
pub enum Error {
    /// A reducer's modifier sequence raised or rejected mid-dispatch.
    ///
    /// Modifiers committed before the failure stand; there is no rollback.
    #[error("reducer failed while handling `{action}`")]
    Reducer {
        /// The action being handled when the reducer failed
        action: ActionId,
        /// The reducer's own error
        #[source]
        source: BoxError,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
