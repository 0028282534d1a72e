//! # Coordinator: the only writer of the counter.
//!
//! The [`Coordinator`] owns the counter as a plain field. Producers never see it;
//! they send unit signals, and the coordinator applies them one at a time.
//!
//! ## State machine
//! ```text
//!            ┌──────────────────────────────────────────────┐
//!            │ Running                                      │
//!            │   select! (random order among ready sources) │
//!            │   ├─ signal on inc/dec channel → counter ± 1  │
//!            │   └─ Done → remaining -= 1                    │
//!            └──────────────┬───────────────────────────────┘
//!                           │ remaining == 0
//!                           ▼
//!            ┌──────────────────────────────────────────────┐
//!            │ Draining                                     │
//!            │   try_recv on both channels until both empty │
//!            └──────────────┬───────────────────────────────┘
//!                           ▼
//!                         Done  → Tally
//! ```
//!
//! ## Rules
//! - A `Done` only proves the sender will send nothing more; its signals may still
//!   sit in the buffer, so Draining is mandatory.
//! - Draining never waits: once every producer is done, an empty buffer is final.
//! - A signal channel that reports closed during Running is not polled again.
//! - The completion channel closing while `remaining > 0` is an error; no value is reported.

use std::fmt;

use tokio::select;

use crate::{
    channels::{CompletionReceiver, Done, Signal, SignalReceiver},
    error::RuntimeError,
    events::{Bus, Event, EventKind},
    producers::Effect,
};

/// Coordinator state, published on the drain and report events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting on signals and completions.
    Running,
    /// All producers done; emptying the signal buffers without waiting.
    Draining,
    /// Final value known; no further mutation.
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Running => "running",
            Phase::Draining => "draining",
            Phase::Done => "done",
        })
    }
}

/// Outcome of a coordinator run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Final counter value.
    pub value: i64,
    /// Increment signals applied.
    pub increments: u64,
    /// Decrement signals applied.
    pub decrements: u64,
    /// Signals applied during the drain phase (included in the two counts above).
    pub drained: u64,
    /// Completion signals consumed.
    pub completions: usize,
}

impl Tally {
    /// Total signals applied.
    #[inline]
    pub fn applied(&self) -> u64 {
        self.increments + self.decrements
    }
}

/// Serializes every counter mutation.
pub struct Coordinator {
    counter: i64,
    remaining: usize,
    phase: Phase,
    tally: Tally,
    inc_rx: SignalReceiver,
    dec_rx: SignalReceiver,
    done_rx: CompletionReceiver,
    bus: Option<Bus>,
}

impl Coordinator {
    /// Creates a coordinator expecting `producers` completion signals.
    ///
    /// The two receivers may be passed in either order: each applies the
    /// [`Effect`] of its own channel.
    pub fn new(
        initial: i64,
        producers: usize,
        inc_rx: SignalReceiver,
        dec_rx: SignalReceiver,
        done_rx: CompletionReceiver,
    ) -> Self {
        Self {
            counter: initial,
            remaining: producers,
            phase: Phase::Running,
            tally: Tally {
                value: initial,
                ..Tally::default()
            },
            inc_rx,
            dec_rx,
            done_rx,
            bus: None,
        }
    }

    /// Publishes completion/drain lifecycle events on `bus`.
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Runs the state machine to [`Phase::Done`] and returns the tally.
    pub async fn run(mut self) -> Result<Tally, RuntimeError> {
        self.run_until_complete().await?;
        self.drain();
        self.tally.value = self.counter;
        Ok(self.tally)
    }

    /// Running: waits on both signal channels and the completion channel at once.
    async fn run_until_complete(&mut self) -> Result<(), RuntimeError> {
        let mut inc_open = true;
        let mut dec_open = true;

        while self.remaining > 0 {
            select! {
                sig = self.inc_rx.recv(), if inc_open => match sig {
                    Some(Signal) => self.apply(self.inc_rx.effect()),
                    None => inc_open = false,
                },
                sig = self.dec_rx.recv(), if dec_open => match sig {
                    Some(Signal) => self.apply(self.dec_rx.effect()),
                    None => dec_open = false,
                },
                done = self.done_rx.recv() => match done {
                    Some(Done) => self.complete(),
                    None => {
                        return Err(RuntimeError::CompletionLost {
                            remaining: self.remaining,
                            pending: Vec::new(),
                        });
                    }
                },
            }
        }
        Ok(())
    }

    /// Draining: applies whatever is buffered right now, never waits.
    fn drain(&mut self) {
        self.phase = Phase::Draining;
        self.publish(
            Event::new(EventKind::DrainStarted)
                .with_phase(self.phase)
                .with_count(self.tally.applied()),
        );

        let before = self.tally.applied();
        loop {
            let mut progressed = false;
            if self.inc_rx.try_recv().is_some() {
                self.apply(self.inc_rx.effect());
                progressed = true;
            }
            if self.dec_rx.try_recv().is_some() {
                self.apply(self.dec_rx.effect());
                progressed = true;
            }
            if !progressed {
                break;
            }
        }
        self.tally.drained = self.tally.applied() - before;

        self.phase = Phase::Done;
        self.publish(
            Event::new(EventKind::DrainFinished)
                .with_phase(self.phase)
                .with_count(self.tally.drained),
        );
    }

    fn apply(&mut self, effect: Effect) {
        self.counter += effect.delta();
        match effect {
            Effect::Increment => self.tally.increments += 1,
            Effect::Decrement => self.tally.decrements += 1,
        }
    }

    fn complete(&mut self) {
        self.remaining -= 1;
        self.tally.completions += 1;
        self.publish(
            Event::new(EventKind::CompletionObserved)
                .with_remaining(self.remaining)
                .with_count(self.tally.applied()),
        );
    }

    fn publish(&self, ev: Event) {
        if let Some(bus) = &self.bus {
            bus.publish(ev);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::channels::{CompletionSender, SignalSender, completion, signal};

    struct Wiring {
        inc_tx: SignalSender,
        dec_tx: SignalSender,
        done_tx: CompletionSender,
        coordinator: Coordinator,
    }

    fn wire(initial: i64, producers: usize, capacity: usize) -> Wiring {
        let (inc_tx, inc_rx) = signal::channel(Effect::Increment, capacity);
        let (dec_tx, dec_rx) = signal::channel(Effect::Decrement, capacity);
        let (done_tx, done_rx) = completion::channel(2);
        Wiring {
            inc_tx,
            dec_tx,
            done_tx,
            coordinator: Coordinator::new(initial, producers, inc_rx, dec_rx, done_rx),
        }
    }

    async fn fill(tx: &SignalSender, n: usize) {
        for _ in 0..n {
            tx.send().await.unwrap();
        }
    }

    #[tokio::test]
    async fn three_up_five_down_is_minus_two() {
        let w = wire(0, 2, 8);
        fill(&w.inc_tx, 3).await;
        fill(&w.dec_tx, 5).await;
        w.done_tx.done("incrementer").await.unwrap();
        w.done_tx.done("decrementer").await.unwrap();

        let tally = w.coordinator.run().await.unwrap();
        assert_eq!(tally.value, -2);
        assert_eq!(tally.increments, 3);
        assert_eq!(tally.decrements, 5);
        assert_eq!(tally.completions, 2);
    }

    #[tokio::test]
    async fn drain_applies_every_buffered_signal() {
        // No producers to wait for: Running ends at once and everything goes through Draining.
        let w = wire(-1, 0, 256);
        fill(&w.inc_tx, 200).await;
        fill(&w.dec_tx, 150).await;

        let tally = w.coordinator.run().await.unwrap();
        assert_eq!(tally.drained, 350);
        assert_eq!(tally.applied(), 350);
        assert_eq!(tally.value, -1 + 200 - 150);
    }

    #[tokio::test]
    async fn completions_queued_before_signals_are_consumed() {
        let w = wire(0, 2, 1000);
        w.done_tx.done("incrementer").await.unwrap();
        w.done_tx.done("decrementer").await.unwrap();
        fill(&w.inc_tx, 1000).await;
        fill(&w.dec_tx, 1000).await;

        let bus = Bus::new(16);
        let mut events = bus.subscribe();
        let tally = w.coordinator.with_bus(bus).run().await.unwrap();

        assert_eq!(tally.value, 0);
        assert_eq!(tally.applied(), 2000);

        let mut seen = Vec::new();
        while let Ok(ev) = events.try_recv() {
            seen.push(ev);
        }
        let kinds: Vec<EventKind> = seen.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::CompletionObserved,
                EventKind::CompletionObserved,
                EventKind::DrainStarted,
                EventKind::DrainFinished,
            ]
        );

        // Whatever Running did not apply, Draining must.
        let applied_while_running = seen[2].count.unwrap();
        assert_eq!(tally.drained, 2000 - applied_while_running);
        assert_eq!(seen[3].count, Some(tally.drained));

        let phases: Vec<Option<Phase>> = seen.iter().map(|e| e.phase).collect();
        assert_eq!(
            phases,
            vec![None, None, Some(Phase::Draining), Some(Phase::Done)]
        );
    }

    #[tokio::test]
    async fn not_done_until_every_completion_arrives() {
        let w = wire(5, 2, 16);
        fill(&w.inc_tx, 10).await;
        fill(&w.dec_tx, 10).await;
        w.done_tx.done("incrementer").await.unwrap();

        let mut handle = tokio::spawn(w.coordinator.run());
        let early = tokio::time::timeout(Duration::from_millis(50), &mut handle).await;
        assert!(early.is_err(), "coordinator finished with a producer outstanding");

        w.done_tx.done("decrementer").await.unwrap();
        let tally = handle.await.unwrap().unwrap();
        assert_eq!(tally.value, 5);
        assert_eq!(tally.completions, 2);
    }

    #[tokio::test]
    async fn closed_signal_channel_is_not_polled_again() {
        let w = wire(0, 2, 4);
        fill(&w.inc_tx, 4).await;
        drop(w.inc_tx);

        let handle = tokio::spawn(w.coordinator.run());
        fill(&w.dec_tx, 4).await;
        w.done_tx.done("incrementer").await.unwrap();
        w.done_tx.done("decrementer").await.unwrap();

        let tally = handle.await.unwrap().unwrap();
        assert_eq!(tally.value, 0);
        assert_eq!(tally.applied(), 8);
    }

    #[tokio::test]
    async fn lost_completion_is_an_error() {
        let w = wire(0, 2, 4);
        fill(&w.inc_tx, 2).await;
        w.done_tx.done("incrementer").await.unwrap();
        drop(w.done_tx);

        let err = w.coordinator.run().await.unwrap_err();
        match err {
            RuntimeError::CompletionLost { remaining, .. } => assert_eq!(remaining, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn phase_names() {
        assert_eq!(Phase::Running.to_string(), "running");
        assert_eq!(Phase::Draining.to_string(), "draining");
        assert_eq!(Phase::Done.to_string(), "done");
    }
}
