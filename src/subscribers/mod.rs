//! # Event subscribers for the tally runtime.
//!
//! This module provides the [`Subscribe`] trait and built-in implementations
//! for handling lifecycle events broadcast through the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Producer / Coordinator ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//!                                                                        │
//!                                                          ┌─────────────┼───────────┐
//!                                                          ▼             ▼           ▼
//!                                                     AliveTracker   LogWriter    Custom
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** observe and react to events (logging, export)
//! - **Stateful subscribers** maintain state based on events ([`AliveTracker`])

mod alive;
#[cfg(feature = "logging")]
mod log;
mod subscribe;
mod subscriber_set;

pub use alive::AliveTracker;
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscribe::Subscribe;
pub use subscriber_set::SubscriberSet;
