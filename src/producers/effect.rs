//! # Effect carried by a signal stream.
//!
//! A signal has no payload; the channel it arrives on decides what it means.
//! [`Effect`] is that meaning, attached to both ends of a signal channel.

use std::fmt;

/// The logical operation a producer's signals request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Each signal adds one to the counter.
    Increment,
    /// Each signal subtracts one from the counter.
    Decrement,
}

impl Effect {
    /// Both effects, in wiring order.
    pub const ALL: [Effect; 2] = [Effect::Increment, Effect::Decrement];

    /// Signed change applied to the counter for one signal.
    ///
    /// # Example
    /// ```
    /// use tally::Effect;
    ///
    /// assert_eq!(Effect::Increment.delta() + Effect::Decrement.delta(), 0);
    /// ```
    #[inline]
    pub fn delta(self) -> i64 {
        match self {
            Effect::Increment => 1,
            Effect::Decrement => -1,
        }
    }

    /// Stable name of the producer emitting this effect.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Effect::Increment => "incrementer",
            Effect::Decrement => "decrementer",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
