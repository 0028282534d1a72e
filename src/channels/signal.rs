//! # Signal channel: one producer → coordinator.
//!
//! A bounded FIFO of unit [`Signal`]s, built on [`tokio::sync::mpsc`]. Both ends
//! carry the [`Effect`] the stream stands for, so the signals themselves stay empty.
//!
//! ## Rules
//! - `send` suspends the producer while the buffer is full.
//! - `recv` suspends the coordinator while the buffer is empty.
//! - Order is preserved within one channel; there is no ordering across channels.
//! - Capacity `0` (rendezvous) is clamped to `1`, the smallest bounded buffer tokio offers;
//!   oversized requests are clamped to `Semaphore::MAX_PERMITS`.

use tokio::sync::mpsc;

use crate::{error::ProducerError, producers::Effect};

/// One unit of intent. Its meaning comes from the channel it travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal;

/// Creates a signal channel for `effect` with the given buffer capacity.
///
/// # Example
/// ```
/// use tally::{Effect, signal_channel};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), tally::ProducerError> {
///     let (tx, mut rx) = signal_channel(Effect::Decrement, 4);
///     tx.send().await?;
///     assert_eq!(rx.effect(), Effect::Decrement);
///     assert!(rx.try_recv().is_some());
///     assert!(rx.try_recv().is_none());
///     Ok(())
/// }
/// ```
pub fn channel(effect: Effect, capacity: usize) -> (SignalSender, SignalReceiver) {
    let (tx, rx) = mpsc::channel(super::clamp_capacity(capacity));
    (SignalSender { effect, tx }, SignalReceiver { effect, rx })
}

/// Producer end of a signal channel.
#[derive(Debug)]
pub struct SignalSender {
    effect: Effect,
    tx: mpsc::Sender<Signal>,
}

impl SignalSender {
    /// Effect of the signals sent on this channel.
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// Sends one signal, waiting for buffer space if needed.
    pub async fn send(&self) -> Result<(), ProducerError> {
        self.tx
            .send(Signal)
            .await
            .map_err(|_| ProducerError::Disconnected {
                producer: self.effect.name(),
                channel: "signal",
            })
    }
}

/// Coordinator end of a signal channel.
#[derive(Debug)]
pub struct SignalReceiver {
    effect: Effect,
    rx: mpsc::Receiver<Signal>,
}

impl SignalReceiver {
    /// Effect of the signals received on this channel.
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// Waits for the next signal; `None` once the sender is gone and the buffer is empty.
    pub async fn recv(&mut self) -> Option<Signal> {
        self.rx.recv().await
    }

    /// Takes the next signal if one is buffered right now.
    ///
    /// Empty and disconnected both yield `None`.
    pub fn try_recv(&mut self) -> Option<Signal> {
        self.rx.try_recv().ok()
    }

    /// Number of signals currently buffered.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Returns `true` if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn preserves_fifo_and_effect() {
        let (tx, mut rx) = channel(Effect::Increment, 3);
        for _ in 0..3 {
            tx.send().await.unwrap();
        }
        assert_eq!(rx.len(), 3);
        assert_eq!(tx.effect(), rx.effect());

        drop(tx);
        assert_eq!(rx.recv().await, Some(Signal));
        assert_eq!(rx.try_recv(), Some(Signal));
        assert_eq!(rx.recv().await, Some(Signal));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn zero_capacity_is_clamped() {
        let (tx, mut rx) = channel(Effect::Decrement, 0);
        tx.send().await.unwrap();
        assert_eq!(rx.try_recv(), Some(Signal));
        assert!(rx.is_empty());
    }

    #[tokio::test]
    async fn send_blocks_when_full() {
        let (tx, mut rx) = channel(Effect::Increment, 1);
        tx.send().await.unwrap();

        let blocked =
            tokio::time::timeout(std::time::Duration::from_millis(20), tx.send()).await;
        assert!(blocked.is_err(), "second send must wait for capacity");

        assert_eq!(rx.recv().await, Some(Signal));
        tx.send().await.unwrap();
    }

    #[tokio::test]
    async fn send_fails_after_receiver_dropped() {
        let (tx, rx) = channel(Effect::Decrement, 1);
        drop(rx);
        assert_eq!(
            tx.send().await,
            Err(ProducerError::Disconnected {
                producer: "decrementer",
                channel: "signal",
            })
        );
    }
}
