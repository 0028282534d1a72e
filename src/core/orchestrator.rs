//! # Orchestrator: wires channels, spawns producers, drives the coordinator.
//!
//! ## High-level architecture
//! ```text
//! Orchestrator::run()
//!   ├─ listener: Bus.subscribe() ─► SubscriberSet::emit(&Event)
//!   ├─ signal::channel(Increment)  signal::channel(Decrement)  completion::channel()
//!   ├─ JoinSet:
//!   │     Producer(Increment).run()   Producer(Decrement).run()
//!   ├─ Coordinator::run()  (on the calling task; Running → Draining → Done)
//!   ├─ join producers (errors / panics surface here)
//!   ├─ publish CounterReported
//!   └─ stop listener (after it drained the bus) ─► SubscriberSet::shutdown()
//! ```
//!
//! ## Rules
//! - Completion is detected only through the completion handshake; nothing sleeps.
//! - The orchestrator keeps no sender ends: once producers exit, their channels close.
//! - If a producer panics, its senders drop with it, so the coordinator
//!   fails with `CompletionLost` instead of waiting forever.
//!
//! ## Example
//! ```rust
//! use tally::{Config, Orchestrator};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), tally::RuntimeError> {
//!     let cfg = Config::with_iterations(1000);
//!     let tally = Orchestrator::builder(cfg).build().run().await?;
//!     assert_eq!(tally.value, 0);
//!     assert_eq!(tally.applied(), 2000);
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::{sync::broadcast::error::RecvError, task::JoinHandle, task::JoinSet};
use tokio_util::sync::CancellationToken;

use crate::{
    channels::{CompletionSender, SignalSender, completion, signal},
    core::{
        Config,
        builder::OrchestratorBuilder,
        coordinator::{Coordinator, Phase, Tally},
    },
    error::{ProducerError, RuntimeError},
    events::{Bus, Event, EventKind},
    producers::{Effect, Producer},
    subscribers::{AliveTracker, SubscriberSet},
};

/// Runs one complete coordination: two producers, one coordinator.
pub struct Orchestrator {
    cfg: Config,
    bus: Bus,
    subs: SubscriberSet,
    alive: Arc<AliveTracker>,
}

impl Orchestrator {
    /// Starts building an orchestrator for `cfg`.
    pub fn builder(cfg: Config) -> OrchestratorBuilder {
        OrchestratorBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        bus: Bus,
        subs: SubscriberSet,
        alive: Arc<AliveTracker>,
    ) -> Self {
        Self {
            cfg,
            bus,
            subs,
            alive,
        }
    }

    /// Configuration this orchestrator runs with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Runs producers and coordinator to completion and returns the final tally.
    pub async fn run(self) -> Result<Tally, RuntimeError> {
        let iterations = self.cfg.iterations;
        self.run_with(move |signals, completion, bus| {
            Producer::new(iterations, signals, completion)
                .with_bus(bus)
                .run()
        })
        .await
    }

    /// Same as [`run`](Self::run), with `spawn_producer` building the future that
    /// owns each producer's senders.
    pub(crate) async fn run_with<F, Fut>(self, mut spawn_producer: F) -> Result<Tally, RuntimeError>
    where
        F: FnMut(SignalSender, CompletionSender, Bus) -> Fut,
        Fut: Future<Output = Result<(), ProducerError>> + Send + 'static,
    {
        let Self {
            cfg,
            bus,
            subs,
            alive,
        } = self;

        let stop = CancellationToken::new();
        let listener = subscriber_listener(&bus, subs, stop.clone());

        let (inc_tx, inc_rx) = signal::channel(Effect::Increment, cfg.signal_capacity_clamped());
        let (dec_tx, dec_rx) = signal::channel(Effect::Decrement, cfg.signal_capacity_clamped());
        let (done_tx, done_rx) = completion::channel(cfg.completion_capacity_clamped());

        let mut producers = JoinSet::new();
        for tx in [inc_tx, dec_tx] {
            producers.spawn(spawn_producer(tx, done_tx.clone(), bus.clone()));
        }
        drop(done_tx);

        let coordinator = Coordinator::new(cfg.initial, Effect::ALL.len(), inc_rx, dec_rx, done_rx)
            .with_bus(bus.clone());
        let outcome = coordinator.run().await;

        let joined = join_producers(&mut producers).await;

        if let Ok(tally) = &outcome {
            bus.publish(
                Event::new(EventKind::CounterReported)
                    .with_phase(Phase::Done)
                    .with_value(tally.value)
                    .with_count(tally.applied()),
            );
        }

        stop.cancel();
        let _ = listener.await;

        if let Some(panicked) = joined.panicked {
            return Err(panicked);
        }
        let tally = outcome.map_err(|e| match e {
            RuntimeError::CompletionLost { remaining, .. } => RuntimeError::CompletionLost {
                remaining,
                pending: alive.snapshot(),
            },
            other => other,
        })?;
        if let Some(failed) = joined.failed {
            return Err(failed.into());
        }
        Ok(tally)
    }
}

/// First failures observed while joining producers.
#[derive(Default)]
struct Joined {
    panicked: Option<RuntimeError>,
    failed: Option<ProducerError>,
}

async fn join_producers(set: &mut JoinSet<Result<(), ProducerError>>) -> Joined {
    let mut joined = Joined::default();
    while let Some(res) = set.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                joined.failed.get_or_insert(e);
            }
            Err(join_err) => {
                joined
                    .panicked
                    .get_or_insert(RuntimeError::ProducerPanicked {
                        reason: join_err.to_string(),
                    });
            }
        }
    }
    joined
}

/// Forwards bus events to the subscriber set until `stop` fires and the bus is drained,
/// then shuts the set down so every queued event is handled.
fn subscriber_listener(bus: &Bus, subs: SubscriberSet, stop: CancellationToken) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                ev = rx.recv() => match ev {
                    Ok(ev) => subs.emit(&ev),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                },
                _ = stop.cancelled() => break,
            }
        }
        subs.shutdown().await;
    })
}
