//! # Producer workers.
//!
//! - [`Effect`]: what a signal stream means (`+1` or `-1`)
//! - [`Producer`]: the single, effect-parameterized worker

mod effect;
mod producer;

pub use effect::Effect;
pub use producer::Producer;
