//! Lifecycle events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to lifecycle events emitted by producers, the coordinator
//! and the orchestrator.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Producer::run`, `Coordinator::run`, `Orchestrator::run`,
//!   `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the orchestrator's listener, which fans out to `SubscriberSet`.
//!
//! Individual signals never produce events; only phase changes do.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
