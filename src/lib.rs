//! # tally
//!
//! **tally** coordinates a shared counter by ownership instead of locking.
//!
//! Two producers each push a stream of unit signals through their own bounded
//! channel. A single coordinator owns the counter, applies every signal in
//! arrival order, and learns that the producers are finished through an explicit
//! completion handshake rather than a timed wait.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────────┐                 ┌──────────────────┐
//!     │ Producer         │                 │ Producer         │
//!     │ (Increment)      │                 │ (Decrement)      │
//!     └──┬────────────┬──┘                 └──┬────────────┬──┘
//!        │ Signal × N │ Done                  │ Signal × N │ Done
//!        ▼            └──────────┐  ┌─────────┘            ▼
//! ┌──────────────┐               ▼  ▼               ┌──────────────┐
//! │ signal chan  │        ┌─────────────────┐       │ signal chan  │
//! │ (bounded)    │        │ completion chan │       │ (bounded)    │
//! └──────┬───────┘        └────────┬────────┘       └──────┬───────┘
//!        └─────────────────┐       │       ┌───────────────┘
//!                          ▼       ▼       ▼
//!                  ┌─────────────────────────────┐
//!                  │ Coordinator (owns counter)  │
//!                  │ Running → Draining → Done   │
//!                  └─────────────┬───────────────┘
//!                                ▼
//!                              Tally
//! ```
//!
//! Lifecycle events (never per-signal) go through a broadcast [`Bus`] to a
//! [`SubscriberSet`]; an [`AliveTracker`] is always attached.
//!
//! ### Lifecycle
//! ```text
//! Orchestrator::run()
//!   ├─► spawn Producer(Increment), Producer(Decrement)
//!   ├─► Coordinator::run()
//!   │     Running:  select! { inc signal → +1 | dec signal → -1 | Done → remaining -= 1 }
//!   │     Draining: try_recv both channels until empty
//!   │     Done:     return Tally
//!   ├─► join producers
//!   └─► publish CounterReported, flush subscribers
//! ```
//!
//! ## Features
//! | Area              | Description                                             | Key types                              |
//! |-------------------|---------------------------------------------------------|----------------------------------------|
//! | **Coordination**  | Single owner of the counter; completion handshake.      | [`Coordinator`], [`Tally`], [`Phase`]  |
//! | **Producers**     | One parameterized worker per effect.                    | [`Producer`], [`Effect`]               |
//! | **Channels**      | Bounded signal and completion queues.                   | [`signal_channel`], [`completion_channel`] |
//! | **Orchestration** | Wiring, spawning, joining, reporting.                   | [`Orchestrator`], [`OrchestratorBuilder`] |
//! | **Subscriber API**| Hook into lifecycle events.                             | [`Subscribe`], [`SubscriberSet`]       |
//! | **Errors**        | Typed errors for broken wiring.                         | [`RuntimeError`], [`ProducerError`]    |
//! | **Configuration** | Iterations, initial value, capacities, parallelism.     | [`Config`]                             |
//!
//! ## Optional features
//! - `logging`: exports a simple stderr [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use tally::{Config, Orchestrator};
//!
//! fn main() -> Result<(), tally::RuntimeError> {
//!     let cfg = Config::with_iterations(10_000).with_initial(-1);
//!     let runtime = cfg.build_runtime()?;
//!
//!     // `build()` spawns subscriber workers, so it must run inside the runtime.
//!     let tally = runtime.block_on(async { Orchestrator::builder(cfg).build().run().await })?;
//!     assert_eq!(tally.value, -1);
//!     Ok(())
//! }
//! ```

mod channels;
mod core;
mod error;
mod events;
mod producers;
mod subscribers;

// ---- Public re-exports ----

pub use channels::completion::channel as completion_channel;
pub use channels::signal::channel as signal_channel;
pub use channels::{CompletionReceiver, CompletionSender, Done, Signal, SignalReceiver, SignalSender};
pub use crate::core::{Config, Coordinator, DEFAULT_ITERATIONS, Orchestrator, OrchestratorBuilder, Phase, Tally};
pub use error::{ProducerError, RuntimeError};
pub use events::{Bus, Event, EventKind};
pub use producers::{Effect, Producer};
pub use subscribers::{AliveTracker, Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
