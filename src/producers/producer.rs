//! # Producer worker: emits intent, never mutates.
//!
//! A [`Producer`] sends `iterations` signals on its signal channel, then exactly one
//! completion on the shared completion channel, then ends. It owns channel senders
//! and nothing else; there is no path from a producer to the counter.
//!
//! ## Flow
//! ```text
//! publish ProducerStarting
//! repeat iterations:
//!   signal_tx.send()     (suspends while the buffer is full)
//! completion_tx.done()   (strictly after the last signal send returned)
//! publish ProducerFinished
//! ```

use crate::{
    channels::{CompletionSender, SignalSender},
    error::ProducerError,
    events::{Bus, Event, EventKind},
    producers::Effect,
};

/// One signal stream plus its completion handshake.
///
/// The increment and decrement workers are the same type; only the
/// [`Effect`] of the signal channel differs.
#[derive(Debug)]
pub struct Producer {
    iterations: u64,
    signals: SignalSender,
    completion: CompletionSender,
    bus: Option<Bus>,
}

impl Producer {
    /// Creates a producer that will emit `iterations` signals on `signals`.
    pub fn new(iterations: u64, signals: SignalSender, completion: CompletionSender) -> Self {
        Self {
            iterations,
            signals,
            completion,
            bus: None,
        }
    }

    /// Publishes start/finish lifecycle events on `bus`.
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Effect of this producer's signals.
    pub fn effect(&self) -> Effect {
        self.signals.effect()
    }

    /// Stable producer name, derived from its effect.
    pub fn name(&self) -> &'static str {
        self.effect().name()
    }

    /// Emits every signal, then the completion signal.
    ///
    /// Consumes the producer: its senders are dropped when it returns.
    pub async fn run(self) -> Result<(), ProducerError> {
        let name = self.name();
        self.publish(EventKind::ProducerStarting, name);

        for _ in 0..self.iterations {
            self.signals.send().await?;
        }
        self.completion.done(name).await?;

        self.publish(EventKind::ProducerFinished, name);
        Ok(())
    }

    fn publish(&self, kind: EventKind, name: &'static str) {
        if let Some(bus) = &self.bus {
            bus.publish(
                Event::new(kind)
                    .with_producer(name)
                    .with_count(self.iterations),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::{Done, Signal, completion, signal};

    #[tokio::test]
    async fn emits_all_signals_then_done() {
        let (sig_tx, mut sig_rx) = signal::channel(Effect::Increment, 8);
        let (done_tx, mut done_rx) = completion::channel(1);

        Producer::new(5, sig_tx, done_tx).run().await.unwrap();

        assert_eq!(sig_rx.len(), 5);
        for _ in 0..5 {
            assert_eq!(sig_rx.try_recv(), Some(Signal));
        }
        assert_eq!(sig_rx.recv().await, None);
        assert_eq!(done_rx.recv().await, Some(Done));
        assert_eq!(done_rx.recv().await, None);
    }

    #[tokio::test]
    async fn done_waits_for_last_signal() {
        let (sig_tx, mut sig_rx) = signal::channel(Effect::Decrement, 1);
        let (done_tx, mut done_rx) = completion::channel(1);

        let handle = tokio::spawn(Producer::new(3, sig_tx, done_tx).run());

        // With one slot, the third send cannot return before the second signal is taken.
        for _ in 0..2 {
            assert!(
                done_rx.is_empty(),
                "completion must not overtake unsent signals"
            );
            assert_eq!(sig_rx.recv().await, Some(Signal));
        }
        assert_eq!(sig_rx.recv().await, Some(Signal));
        assert_eq!(done_rx.recv().await, Some(Done));
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn zero_iterations_sends_only_done() {
        let (sig_tx, mut sig_rx) = signal::channel(Effect::Increment, 1);
        let (done_tx, mut done_rx) = completion::channel(1);
        let bus = Bus::new(8);
        let mut events = bus.subscribe();

        let producer = Producer::new(0, sig_tx, done_tx).with_bus(bus);
        assert_eq!(producer.name(), "incrementer");
        producer.run().await.unwrap();

        assert_eq!(sig_rx.recv().await, None);
        assert_eq!(done_rx.recv().await, Some(Done));

        let started = events.recv().await.unwrap();
        let finished = events.recv().await.unwrap();
        assert_eq!(started.kind, EventKind::ProducerStarting);
        assert_eq!(finished.kind, EventKind::ProducerFinished);
        assert_eq!(finished.producer.as_deref(), Some("incrementer"));
        assert_eq!(finished.count, Some(0));
    }

    #[tokio::test]
    async fn fails_when_coordinator_is_gone() {
        let (sig_tx, sig_rx) = signal::channel(Effect::Decrement, 1);
        let (done_tx, _done_rx) = completion::channel(1);
        drop(sig_rx);

        let err = Producer::new(2, sig_tx, done_tx).run().await.unwrap_err();
        assert_eq!(err.as_label(), "producer_disconnected");
    }
}
