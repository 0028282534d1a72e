//! # Runtime configuration.
//!
//! Provides [`Config`], the centralized settings for one coordination run.
//!
//! ## Sentinel values
//! - `signal_capacity = 0` → unbuffered; clamped to 1 (tokio has no rendezvous channel)
//! - `completion_capacity = 0` → clamped to 1
//! - `workers = 0` → single-threaded runtime
//! - `bus_capacity = 0` → clamped to 1

use std::io;

use tokio::runtime::{Builder, Runtime};

/// Iterations per producer used by [`Config::default`].
pub const DEFAULT_ITERATIONS: u64 = 1_000_000;

/// Configuration for one coordination run.
///
/// ## Field semantics
/// - `iterations`: signals emitted by **each** producer
/// - `initial`: counter value before any signal is applied
/// - `signal_capacity`: buffer of each signal channel
/// - `completion_capacity`: buffer of the shared completion channel
/// - `workers`: parallelism hint (runtime worker threads)
/// - `bus_capacity`: lifecycle event ring buffer size
///
/// All fields are public. Prefer the helper accessors to avoid sprinkling
/// sentinel checks across the codebase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Signals emitted by each producer.
    pub iterations: u64,

    /// Initial counter value.
    pub initial: i64,

    /// Capacity of each signal channel.
    ///
    /// A buffer as large as `iterations` lets producers run ahead of the
    /// coordinator without ever suspending.
    pub signal_capacity: usize,

    /// Capacity of the completion channel (one slot per producer is enough).
    pub completion_capacity: usize,

    /// Number of runtime worker threads.
    ///
    /// - `0` = current-thread runtime
    /// - `n > 0` = multi-thread runtime with `n` workers
    pub workers: usize,

    /// Capacity of the lifecycle event bus.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns a config emitting `iterations` signals per producer, with signal
    /// buffers sized to match. Other fields take their defaults.
    ///
    /// # Example
    /// ```
    /// use tally::Config;
    ///
    /// let cfg = Config::with_iterations(1000);
    /// assert_eq!(cfg.signal_capacity, 1000);
    /// assert_eq!(cfg.initial, 0);
    /// ```
    pub fn with_iterations(iterations: u64) -> Self {
        Self {
            iterations,
            signal_capacity: capacity_for(iterations),
            ..Self::default()
        }
    }

    /// Returns the same config with another initial counter value.
    pub fn with_initial(mut self, initial: i64) -> Self {
        self.initial = initial;
        self
    }

    /// Returns the same config with unbuffered (single-slot) signal channels.
    ///
    /// Every send waits for the coordinator; the result is unchanged.
    pub fn unbuffered(mut self) -> Self {
        self.signal_capacity = 0;
        self
    }

    /// Signal channel capacity clamped to a minimum of 1.
    #[inline]
    pub fn signal_capacity_clamped(&self) -> usize {
        self.signal_capacity.max(1)
    }

    /// Completion channel capacity clamped to a minimum of 1.
    #[inline]
    pub fn completion_capacity_clamped(&self) -> usize {
        self.completion_capacity.max(1)
    }

    /// Bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Counter value a correct run must report: each producer's signals cancel out.
    #[inline]
    pub fn expected(&self) -> i64 {
        self.initial
    }

    /// Builds a tokio runtime honoring [`Config::workers`].
    pub fn build_runtime(&self) -> io::Result<Runtime> {
        match self.workers {
            0 => Builder::new_current_thread().enable_all().build(),
            n => Builder::new_multi_thread()
                .worker_threads(n)
                .enable_all()
                .build(),
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `iterations = 1_000_000`
    /// - `initial = 0`
    /// - `signal_capacity = 1_000_000` (buffer = iteration count)
    /// - `completion_capacity = 2` (one per producer)
    /// - `workers = 2`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            initial: 0,
            signal_capacity: capacity_for(DEFAULT_ITERATIONS),
            completion_capacity: 2,
            workers: 2,
            bus_capacity: 1024,
        }
    }
}

fn capacity_for(iterations: u64) -> usize {
    usize::try_from(iterations).unwrap_or(usize::MAX)
}
