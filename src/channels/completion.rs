//! # Completion channel: both producers → coordinator.
//!
//! A bounded FIFO of unit [`Done`] signals shared by every producer. A producer
//! sends exactly one `Done`, after its last signal send has completed; the
//! coordinator counts them down to learn when all streams are closed.

use tokio::sync::mpsc;

use crate::error::ProducerError;

/// A producer's "no more signals from me".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Done;

/// Creates the completion channel with the given capacity (minimum 1).
pub fn channel(capacity: usize) -> (CompletionSender, CompletionReceiver) {
    let (tx, rx) = mpsc::channel(super::clamp_capacity(capacity));
    (CompletionSender { tx }, CompletionReceiver { rx })
}

/// Producer end; cloned once per producer.
#[derive(Debug, Clone)]
pub struct CompletionSender {
    tx: mpsc::Sender<Done>,
}

impl CompletionSender {
    /// Reports that `producer` has sent its last signal.
    pub async fn done(&self, producer: &'static str) -> Result<(), ProducerError> {
        self.tx
            .send(Done)
            .await
            .map_err(|_| ProducerError::Disconnected {
                producer,
                channel: "completion",
            })
    }
}

/// Coordinator end.
#[derive(Debug)]
pub struct CompletionReceiver {
    rx: mpsc::Receiver<Done>,
}

impl CompletionReceiver {
    /// Waits for the next completion; `None` once every sender is gone and nothing is buffered.
    pub async fn recv(&mut self) -> Option<Done> {
        self.rx.recv().await
    }

    /// Returns `true` if no completion is buffered.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
