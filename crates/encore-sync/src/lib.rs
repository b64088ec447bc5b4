//! Fan-out/fan-in aggregation barrier.
//!
//! A page that needs N independently-arriving remote results creates one
//! [`CompletionBarrier`] per request, hands a [`Reporter`] clone to each
//! sub-operation, and awaits the [`Completion`]. The completion resolves
//! exactly once, the first time N reports have landed, with a map of the
//! results that actually materialized. Sub-operations that came up empty
//! report an absence; the map simply omits them.
//!
//! The barrier is single-use. After it fires it goes inert: late reports
//! are dropped with a warning instead of firing a second time. A barrier
//! instance belongs to exactly one fan-out; nothing here is meant to be
//! shared across requests.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::warn;

struct Inner<K, V> {
    expected: usize,
    received: usize,
    results: HashMap<K, V>,
    /// Present until the barrier fires; taking it is the fire.
    tx: Option<oneshot::Sender<HashMap<K, V>>>,
    /// Live [`Reporter`] handles. When the last one drops before the count
    /// is reached, the barrier fires with whatever arrived so the waiter
    /// degrades instead of hanging.
    reporters: usize,
}

impl<K: Eq + Hash, V> Inner<K, V> {
    fn fire(&mut self) {
        if let Some(tx) = self.tx.take() {
            // The receiver may already be gone; nobody cares then.
            let _ = tx.send(std::mem::take(&mut self.results));
        }
    }
}

/// Create a barrier expecting `expected` reports.
///
/// With `expected == 0` the completion is already resolved at creation;
/// the caller still has to await it, so the zero case can never re-enter
/// a caller that has not finished its own setup.
pub struct CompletionBarrier;

impl CompletionBarrier {
    pub fn new<K, V>(expected: usize) -> (Reporter<K, V>, Completion<K, V>)
    where
        K: Eq + Hash + Send + 'static,
        V: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let mut inner = Inner {
            expected,
            received: 0,
            results: HashMap::new(),
            tx: Some(tx),
            reporters: 1,
        };
        if expected == 0 {
            inner.fire();
        }
        (Reporter(Arc::new(Mutex::new(inner))), Completion(rx))
    }
}

/// Reporting half of a barrier. Cloned once per sub-operation.
pub struct Reporter<K, V>(Arc<Mutex<Inner<K, V>>>);

impl<K: Eq + Hash, V> Reporter<K, V> {
    /// Record one sub-operation's outcome. `None` marks the source as
    /// complete-but-absent: it counts toward the barrier without adding a
    /// map entry.
    pub fn report(&self, key: K, result: Option<V>) {
        // A poisoned lock means some reporter panicked mid-report; the
        // state is still a valid count, so degrade rather than cascade.
        let mut inner = self.0.lock().unwrap_or_else(|e| e.into_inner());

        if inner.tx.is_none() {
            warn!("report after barrier completion dropped (straggler)");
            return;
        }

        inner.received += 1;
        if let Some(value) = result {
            inner.results.insert(key, value);
        }
        if inner.received == inner.expected {
            inner.fire();
        }
    }
}

impl<K, V> Clone for Reporter<K, V> {
    fn clone(&self) -> Self {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).reporters += 1;
        Reporter(Arc::clone(&self.0))
    }
}

impl<K, V> Drop for Reporter<K, V> {
    fn drop(&mut self) {
        let mut inner = self.0.lock().unwrap_or_else(|e| e.into_inner());
        inner.reporters -= 1;
        if inner.reporters == 0 && inner.tx.is_some() {
            warn!(
                received = inner.received,
                expected = inner.expected,
                "all reporters dropped before completion; firing with partial results"
            );
            // K/V bounds on fire() are not available in Drop, so inline it.
            if let Some(tx) = inner.tx.take() {
                let _ = tx.send(std::mem::take(&mut inner.results));
            }
        }
    }
}

/// Waiting half of a barrier.
pub struct Completion<K, V>(oneshot::Receiver<HashMap<K, V>>);

impl<K, V> Completion<K, V> {
    /// Resolve to the aggregated results. Fires exactly once per barrier.
    pub async fn wait(self) -> HashMap<K, V> {
        // The sender cannot drop unsent: the last Reporter to go fires
        // with partial results first. RecvError is therefore unreachable,
        // but an empty map is the sane degradation if it ever happens.
        self.0.await.unwrap_or_default()
    }
}
