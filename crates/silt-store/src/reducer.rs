//! Reducers and their lazy modifier sequences

use silt_core::{Action, Modifier, State};
use std::pin::Pin;

use futures::Stream;

/// Boxed error produced by a failing reducer step
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The lazy, finite sequence of modifiers a reducer produces for one action
///
/// Items are pulled one at a time; the pipeline commits each modifier before
/// pulling the next, so a flow may suspend between items (an `await` inside
/// the stream) without ever being interleaved with another reducer.
pub type ModifierFlow = Pin<Box<dyn Stream<Item = Result<Modifier, BoxError>> + Send>>;

/// Produces a modifier sequence for each dispatched action
///
/// A reducer is invoked once per dispatched action, right before its flow is
/// drained. `state` is the snapshot taken at that moment: the read side of
/// the store for reducers, including the pending-action queue for the
/// re-splicing convention (see [`Modifier::actions`](silt_core::Modifier)).
/// Reducers branch on the action kind and return [`flow::empty`] for kinds
/// they do not handle.
pub trait Reducer: Send + Sync {
    /// Produce the modifier sequence for `action`
    fn reduce(&self, state: &State, action: &Action) -> ModifierFlow;
}

impl<F> Reducer for F
where
    F: Fn(&State, &Action) -> ModifierFlow + Send + Sync,
{
    fn reduce(&self, state: &State, action: &Action) -> ModifierFlow {
        self(state, action)
    }
}

/// Box a closure as a reducer
pub fn reducer_fn<F>(f: F) -> Box<dyn Reducer>
where
    F: Fn(&State, &Action) -> ModifierFlow + Send + Sync + 'static,
{
    Box::new(f)
}

/// Constructors for common modifier flows
///
/// Reducers with genuinely lazy or multi-step async sequences can build a
/// flow with `async_stream::try_stream!` instead; any pinned boxed stream of
/// `Result<Modifier, BoxError>` qualifies.
pub mod flow {
    use super::{BoxError, Modifier, ModifierFlow};
    use futures::stream;
    use std::future::Future;

    /// A flow yielding the given modifiers in order, synchronously
    pub fn of(modifiers: impl IntoIterator<Item = Modifier>) -> ModifierFlow {
        let items: Vec<Result<Modifier, BoxError>> = modifiers.into_iter().map(Ok).collect();
        Box::pin(stream::iter(items))
    }

    /// A flow yielding exactly one modifier, synchronously
    pub fn single(modifier: Modifier) -> ModifierFlow {
        of([modifier])
    }

    /// A flow yielding one modifier produced by a future
    pub fn once<Fut>(future: Fut) -> ModifierFlow
    where
        Fut: Future<Output = Result<Modifier, BoxError>> + Send + 'static,
    {
        Box::pin(stream::once(future))
    }

    /// The empty flow: the reducer does not handle this action
    pub fn empty() -> ModifierFlow {
        Box::pin(stream::empty())
    }

    /// A flow that fails immediately
    pub fn fail(error: impl Into<BoxError>) -> ModifierFlow {
        Box::pin(stream::iter([Err(error.into())]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use silt_core::Value;

    #[tokio::test]
    async fn test_flow_of_preserves_order() {
        let mut flow = flow::of([Modifier::new().set("n", 1), Modifier::new().set("n", 2)]);

        let first = flow.next().await.unwrap().unwrap();
        assert_eq!(first.data.get("n"), Some(&Value::Int(1)));
        let second = flow.next().await.unwrap().unwrap();
        assert_eq!(second.data.get("n"), Some(&Value::Int(2)));
        assert!(flow.next().await.is_none());
    }

    #[tokio::test]
    async fn test_flow_once_awaits_future() {
        let mut flow = flow::once(async { Ok(Modifier::new().set("ready", true)) });

        let modifier = flow.next().await.unwrap().unwrap();
        assert_eq!(modifier.data.get("ready"), Some(&Value::Bool(true)));
        assert!(flow.next().await.is_none());
    }

    #[tokio::test]
    async fn test_flow_fail() {
        let mut flow = flow::fail("boom");
        assert!(flow.next().await.unwrap().is_err());
    }

    #[tokio::test]
    async fn test_closure_is_a_reducer() {
        let reducer = reducer_fn(|_state, action| match action.id.as_str() {
            "hit" => flow::single(Modifier::new().set("hit", true)),
            _ => flow::empty(),
        });

        let state = State::new();
        let mut hit = reducer.reduce(&state, &Action::new("hit"));
        assert!(hit.next().await.is_some());

        let mut miss = reducer.reduce(&state, &Action::new("other"));
        assert!(miss.next().await.is_none());
    }
}
