//! Output encoding and input decoding.
//!
//! This module connects fixture state types to their register chains. It provides:
//! 1. **State Traits:** `OutputState` for driven signals and `InputSnapshot` for sampled ones.
//! 2. **Encoder:** Shifts an output state through a SIPO chain in layout order, then latches it.
//! 3. **Decoder:** Parallel-loads a PISO chain and shifts a fresh snapshot out of it.

use std::fmt;

use crate::layout::{FieldValues, Signal};

/// Serializes fixture outputs into a SIPO chain.
pub mod encoder;

/// Deserializes fixture inputs from a PISO chain.
pub mod decoder;

pub use decoder::InputDecoder;
pub use encoder::OutputEncoder;

/// An immutable set of driven signal values.
///
/// Implementations are `Copy` value types whose mutators return a new state. `Default`
/// must be the fixture's idle/safe state.
pub trait OutputState: Copy + Eq + fmt::Debug + Default {
    /// Signal groups the state serializes.
    type Signal: Signal;

    /// Line-level value of `signal`, after any active-low or mask encoding.
    fn signal(&self, signal: Self::Signal) -> u32;

    /// Returns a copy with the line-level value of `signal` replaced.
    ///
    /// This is the raw form of the named mutators; it applies no active-low conversion.
    #[must_use]
    fn with_signal(&self, signal: Self::Signal, value: u32) -> Self;
}

/// A snapshot assembled from one pass over a PISO chain.
pub trait InputSnapshot: Sized {
    /// Signal groups the snapshot is built from.
    type Signal: Signal;

    /// Builds the snapshot from the values read in one pass.
    fn from_values(values: &FieldValues<Self::Signal>) -> Self;
}

/// Any set of field values is itself a snapshot; tests use it to read back arbitrary layouts.
impl<S: Signal> InputSnapshot for FieldValues<S> {
    type Signal = S;

    fn from_values(values: &FieldValues<S>) -> Self {
        values.clone()
    }
}
