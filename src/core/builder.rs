use std::sync::Arc;

use super::{Config, orchestrator::Orchestrator};
use crate::{
    events::Bus,
    subscribers::{AliveTracker, Subscribe, SubscriberSet},
};

/// Builder for constructing an [`Orchestrator`] with optional subscribers.
pub struct OrchestratorBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl OrchestratorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive lifecycle events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the orchestrator.
    ///
    /// Spawns the subscriber workers, so it must be called inside a tokio runtime.
    /// An [`AliveTracker`] is always added to the user's subscribers.
    pub fn build(self) -> Orchestrator {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let alive = Arc::new(AliveTracker::new());

        let mut subscribers = self.subscribers;
        subscribers.push(alive.clone());
        let subs = SubscriberSet::new(subscribers, bus.clone());

        Orchestrator::new_internal(self.cfg, bus, subs, alive)
    }
}
