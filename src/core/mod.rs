//! Runtime core: configuration, coordination, orchestration.
//!
//! Internal modules:
//! - [`config`]: run parameters and runtime construction;
//! - [`coordinator`]: the counter owner and its Running → Draining → Done state machine;
//! - [`orchestrator`]: wires channels, spawns producers, runs the coordinator;
//! - [`builder`]: assembles an orchestrator with its bus and subscribers.

mod builder;
mod config;
mod coordinator;
mod orchestrator;

pub use builder::OrchestratorBuilder;
pub use config::{Config, DEFAULT_ITERATIONS};
pub use coordinator::{Coordinator, Phase, Tally};
pub use orchestrator::Orchestrator;
