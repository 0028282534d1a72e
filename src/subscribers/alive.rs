//! # AliveTracker – track producers that are still emitting
//!
//! Maintains an in-memory set of **alive** producer names by listening to
//! [`EventKind::ProducerStarting`] and [`EventKind::ProducerFinished`].
//!
//! The orchestrator consults it when the completion channel closes early, to name
//! the producers that never reported done. The view is eventually consistent: it
//! lags the bus by however long the subscriber queue takes to drain.
//!
//! ## Internal scheme
//! ```text
//! on_event(ev):
//!   ├─ if ev.kind == ProducerStarting && ev.producer => insert(name)
//!   ├─ if ev.kind == ProducerFinished && ev.producer => remove(name)
//!   └─ otherwise: ignore
//!
//! snapshot() -> Vec<String>  (sorted copy of the current set)
//! ```

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Tracks the set of producers that started but have not finished.
pub struct AliveTracker {
    inner: RwLock<HashSet<String>>,
}

impl AliveTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashSet::new()),
        }
    }

    /// Returns a sorted snapshot of producers still alive.
    pub fn snapshot(&self) -> Vec<String> {
        let mut alive: Vec<String> = match self.inner.read() {
            Ok(set) => set.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        };
        alive.sort_unstable();
        alive
    }

    fn update(&self, ev: &Event) {
        let Some(name) = ev.producer.as_deref() else {
            return;
        };
        let mut set = match self.inner.write() {
            Ok(set) => set,
            Err(poisoned) => poisoned.into_inner(),
        };
        match ev.kind {
            EventKind::ProducerStarting => {
                set.insert(name.to_string());
            }
            EventKind::ProducerFinished => {
                set.remove(name);
            }
            _ => {}
        }
    }
}

impl Default for AliveTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Subscribe for AliveTracker {
    async fn on_event(&self, ev: &Event) {
        self.update(ev);
    }

    fn name(&self) -> &'static str {
        "AliveTracker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tracks_start_and_finish() {
        let tracker = AliveTracker::new();

        tracker
            .on_event(&Event::new(EventKind::ProducerStarting).with_producer("incrementer"))
            .await;
        tracker
            .on_event(&Event::new(EventKind::ProducerStarting).with_producer("decrementer"))
            .await;
        assert_eq!(tracker.snapshot(), vec!["decrementer", "incrementer"]);

        tracker
            .on_event(&Event::new(EventKind::ProducerFinished).with_producer("incrementer"))
            .await;
        assert_eq!(tracker.snapshot(), vec!["decrementer"]);
    }

    #[tokio::test]
    async fn ignores_unrelated_events() {
        let tracker = AliveTracker::new();
        tracker
            .on_event(&Event::subscriber_overflow("LogWriter", "full"))
            .await;
        tracker.on_event(&Event::new(EventKind::DrainStarted)).await;
        assert!(tracker.snapshot().is_empty());
    }
}
