//! Error types used by the tally runtime and its producers.
//!
//! This module defines two error enums:
//!
//! - [`ProducerError`]: errors raised by a single producer while emitting signals.
//! - [`RuntimeError`]: errors raised by the coordinator / orchestrator.
//!
//! Neither is expected in normal operation: the workload is finite and the channels
//! stay open until every party is done. They exist for broken wiring (a dropped
//! receiver, a panicking producer). Both types provide `as_label` / `as_message`
//! helpers for logs.

use thiserror::Error;

/// # Errors produced by a producer worker.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProducerError {
    /// The receiving side of a channel was dropped before the producer finished.
    #[error("producer {producer}: {channel} channel disconnected")]
    Disconnected {
        /// Producer name (e.g. `"incrementer"`).
        producer: &'static str,
        /// Which channel was closed (`"signal"` or `"completion"`).
        channel: &'static str,
    },
}

impl ProducerError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use tally::ProducerError;
    ///
    /// let err = ProducerError::Disconnected { producer: "incrementer", channel: "signal" };
    /// assert_eq!(err.as_label(), "producer_disconnected");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ProducerError::Disconnected { .. } => "producer_disconnected",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ProducerError::Disconnected { producer, channel } => {
                format!("disconnected: producer={producer} channel={channel}")
            }
        }
    }
}

/// # Errors produced by the coordination runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Completion channel closed while producers were still outstanding.
    ///
    /// Every completion sender was dropped without delivering its `Done`; the
    /// coordinator refuses to report a value it cannot prove final.
    #[error("completion channel closed with {remaining} producer(s) outstanding; pending: {pending:?}")]
    CompletionLost {
        /// Producers the coordinator was still waiting for.
        remaining: usize,
        /// Producers that started but never finished (best effort, from the alive tracker).
        pending: Vec<String>,
    },

    /// A producer returned an error.
    #[error("producer failed: {source}")]
    Producer {
        /// The underlying producer error.
        #[from]
        source: ProducerError,
    },

    /// A producer task panicked or was aborted.
    #[error("producer task panicked: {reason}")]
    ProducerPanicked {
        /// Panic payload or join failure description.
        reason: String,
    },

    /// The async runtime could not be constructed.
    #[error("failed to build runtime: {source}")]
    Runtime {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use tally::RuntimeError;
    ///
    /// let err = RuntimeError::CompletionLost { remaining: 1, pending: vec![] };
    /// assert_eq!(err.as_label(), "runtime_completion_lost");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::CompletionLost { .. } => "runtime_completion_lost",
            RuntimeError::Producer { .. } => "runtime_producer_failed",
            RuntimeError::ProducerPanicked { .. } => "runtime_producer_panicked",
            RuntimeError::Runtime { .. } => "runtime_build_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::CompletionLost { remaining, pending } => {
                format!("completion lost: remaining={remaining} pending={pending:?}")
            }
            RuntimeError::Producer { source } => source.as_message(),
            RuntimeError::ProducerPanicked { reason } => format!("panicked: {reason}"),
            RuntimeError::Runtime { source } => format!("runtime: {source}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn producer_error_converts_into_runtime_error() {
        let err: RuntimeError = ProducerError::Disconnected {
            producer: "decrementer",
            channel: "completion",
        }
        .into();

        assert_eq!(err.as_label(), "runtime_producer_failed");
        assert_eq!(
            err.as_message(),
            "disconnected: producer=decrementer channel=completion"
        );
    }

    #[test]
    fn completion_lost_display_lists_pending() {
        let err = RuntimeError::CompletionLost {
            remaining: 1,
            pending: vec!["incrementer".to_string()],
        };
        let shown = err.to_string();
        assert!(shown.contains("1 producer(s) outstanding"));
        assert!(shown.contains("incrementer"));
    }
}
