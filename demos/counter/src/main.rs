//! Counter Demo
//!
//! Demonstrates silt with a counter that chains a milestone action every
//! fifth increment. The milestone reducer commits asynchronously and caches
//! a token-gated audit summary.

use async_stream::try_stream;
use silt_store::{flow, reducer_fn, Action, CacheEntry, Modifier, ModifierFlow, Store, Value};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> silt_store::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Silt Counter Demo ===\n");

    let store = Store::new();

    // Print every committed change
    store.add_listener(Arc::new(|state, entry| {
        let kind = entry
            .action
            .as_ref()
            .map(|a| a.id.as_str())
            .unwrap_or("(manual)");
        let count = state.get("count").and_then(Value::as_int).unwrap_or(0);
        println!("  [{kind}] count = {count}");
    }));

    store.replace_reducers(vec![
        // Counting: bump the counter, chain a milestone every fifth bump
        reducer_fn(|state, action| match action.id.as_str() {
            "increment" => {
                let next = state.get("count").and_then(Value::as_int).unwrap_or(0) + 1;
                let mut modifier = Modifier::new().set("count", next);
                if next % 5 == 0 {
                    modifier =
                        modifier.with_actions(vec![Action::new("milestone").with_payload(next)]);
                }
                flow::single(modifier)
            }
            _ => flow::empty(),
        }),
        // Auditing: record milestones asynchronously and cache the summary
        reducer_fn(|_state, action| match action.id.as_str() {
            "milestone" => {
                let reached = action.payload.clone();
                let audit: ModifierFlow = Box::pin(try_stream! {
                    yield Modifier::new().set("milestone", reached.clone());
                    // Pretend the summary takes a round-trip to compute
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    let summary = format!("reached {}", reached);
                    yield Modifier::new().with_cache_entry(
                        "last_milestone",
                        CacheEntry::new(summary).with_token("audit"),
                    );
                });
                audit
            }
            _ => flow::empty(),
        }),
    ]);

    println!("Dispatching 12 increments...\n");
    for _ in 0..12 {
        store.dispatch(Action::new("increment")).await?;
    }

    let state = store.get_state();
    println!(
        "\nFinal count: {}",
        state.get("count").and_then(Value::as_int).unwrap_or(0)
    );

    // The audit summary is token-gated
    println!(
        "Cache without token: {:?}",
        store.get_cache("last_milestone", None)
    );
    println!(
        "Cache with token:    {:?}",
        store.get_cache("last_milestone", Some("audit"))
    );

    println!("\nRecent history ({} entries):", store.history().len());
    for entry in store.history() {
        let kind = entry
            .action
            .as_ref()
            .map(|a| a.id.as_str())
            .unwrap_or("(manual)");
        println!("  {kind}: {} data keys changed", entry.changes.data.len());
    }

    Ok(())
}
