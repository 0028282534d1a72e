//! # LogWriter: simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stderr, keeping stdout
//! for the final result line. Use it for demos and debugging.
//!
//! ## Example output
//! ```text
//! [producer-starting] producer=incrementer signals=1000000
//! [producer-finished] producer=incrementer signals=1000000
//! [completion-observed] remaining=1 applied=1999874
//! [producer-finished] producer=decrementer signals=1000000
//! [completion-observed] remaining=0 applied=1999990
//! [drain-started] applied=1999990
//! [drain-finished] drained=10
//! [counter-reported] value=0 applied=2000000
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn field<T: std::fmt::Display>(v: &Option<T>) -> String {
    v.as_ref()
        .map_or_else(|| "unknown".to_string(), ToString::to_string)
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::ProducerStarting => {
                eprintln!(
                    "[producer-starting] producer={} signals={}",
                    field(&e.producer),
                    field(&e.count)
                );
            }
            EventKind::ProducerFinished => {
                eprintln!(
                    "[producer-finished] producer={} signals={}",
                    field(&e.producer),
                    field(&e.count)
                );
            }
            EventKind::CompletionObserved => {
                eprintln!(
                    "[completion-observed] remaining={} applied={}",
                    field(&e.remaining),
                    field(&e.count)
                );
            }
            EventKind::DrainStarted => {
                eprintln!(
                    "[drain-started] phase={} applied={}",
                    field(&e.phase),
                    field(&e.count)
                );
            }
            EventKind::DrainFinished => {
                eprintln!(
                    "[drain-finished] phase={} drained={}",
                    field(&e.phase),
                    field(&e.count)
                );
            }
            EventKind::CounterReported => {
                eprintln!(
                    "[counter-reported] value={} applied={}",
                    field(&e.value),
                    field(&e.count)
                );
            }
            EventKind::SubscriberOverflow => {
                eprintln!(
                    "[subscriber-overflow] subscriber={} reason={}",
                    field(&e.producer),
                    field(&e.reason)
                );
            }
            EventKind::SubscriberPanicked => {
                eprintln!(
                    "[subscriber-panicked] subscriber={} info={}",
                    field(&e.producer),
                    field(&e.reason)
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
