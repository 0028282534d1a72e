//! # Lifecycle events emitted by producers, the coordinator and the orchestrator.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Producer events**: a producer started or finished emitting
//! - **Coordinator events**: completion observed, drain phase, final report
//! - **Subscriber events**: overflow / panic inside a subscriber worker
//!
//! The [`Event`] struct carries additional metadata such as timestamps, producer
//! name, remaining producer count and counter value.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use tally::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::CompletionObserved)
//!     .with_remaining(1)
//!     .with_count(1000);
//!
//! assert_eq!(ev.kind, EventKind::CompletionObserved);
//! assert_eq!(ev.remaining, Some(1));
//! assert!(ev.producer.is_none());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::core::Phase;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `producer`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `producer`: subscriber name
    /// - `reason`: reason string ("full", "closed")
    SubscriberOverflow,

    // === Producer events ===
    /// Producer is about to emit its signals.
    ///
    /// Sets:
    /// - `producer`: producer name
    /// - `count`: number of signals it will emit
    ProducerStarting,

    /// Producer emitted every signal and its completion signal.
    ///
    /// Sets:
    /// - `producer`: producer name
    /// - `count`: number of signals emitted
    ProducerFinished,

    // === Coordinator events ===
    /// Coordinator consumed a completion signal.
    ///
    /// Sets:
    /// - `remaining`: producers still outstanding after this one
    /// - `count`: signals applied so far
    CompletionObserved,

    /// Every producer reported done; coordinator entered the drain phase.
    ///
    /// Sets:
    /// - `phase`: [`Phase::Draining`]
    /// - `count`: signals applied before draining
    DrainStarted,

    /// Drain phase found no more buffered signals.
    ///
    /// Sets:
    /// - `phase`: [`Phase::Done`]
    /// - `count`: signals applied while draining
    DrainFinished,

    /// Final counter value is known.
    ///
    /// Sets:
    /// - `phase`: [`Phase::Done`]
    /// - `value`: final counter value
    /// - `count`: total signals applied
    CounterReported,
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Producer (or subscriber) name, if applicable.
    pub producer: Option<Arc<str>>,
    /// Producers still outstanding.
    pub remaining: Option<usize>,
    /// Counter value.
    pub value: Option<i64>,
    /// Signal count (meaning depends on kind).
    pub count: Option<u64>,
    /// Coordinator phase at the time of the event.
    pub phase: Option<Phase>,
    /// Human-readable reason (overflow details, panic info).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            producer: None,
            remaining: None,
            value: None,
            count: None,
            phase: None,
            reason: None,
        }
    }

    /// Attaches a producer name.
    #[inline]
    pub fn with_producer(mut self, producer: impl Into<Arc<str>>) -> Self {
        self.producer = Some(producer.into());
        self
    }

    /// Attaches the outstanding producer count.
    #[inline]
    pub fn with_remaining(mut self, remaining: usize) -> Self {
        self.remaining = Some(remaining);
        self
    }

    /// Attaches a counter value.
    #[inline]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    /// Attaches a signal count.
    #[inline]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Attaches the coordinator phase.
    #[inline]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_producer(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_producer(subscriber)
            .with_reason(info)
    }

    /// True for overflow events; the subscriber set never re-reports those.
    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic() {
        let a = Event::new(EventKind::ProducerStarting);
        let b = Event::new(EventKind::ProducerFinished);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn overflow_helper_sets_name_and_reason() {
        let ev = Event::subscriber_overflow("LogWriter", "full");
        assert!(ev.is_subscriber_overflow());
        assert_eq!(ev.producer.as_deref(), Some("LogWriter"));
        assert_eq!(ev.reason.as_deref(), Some("subscriber=LogWriter reason=full"));
    }
}
