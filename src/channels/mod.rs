//! # Channels between producers and the coordinator.
//!
//! - [`signal`]: one bounded signal channel per producer, tagged with its [`Effect`](crate::Effect)
//! - [`completion`]: one bounded completion channel shared by all producers
//!
//! Producers only ever hold sender ends; the coordinator holds every receiver.

pub mod completion;
pub mod signal;

pub use completion::{CompletionReceiver, CompletionSender, Done};
pub use signal::{Signal, SignalReceiver, SignalSender};

/// Clamps a requested buffer size into what a bounded tokio channel accepts.
pub(crate) fn clamp_capacity(capacity: usize) -> usize {
    capacity.clamp(1, tokio::sync::Semaphore::MAX_PERMITS)
}
