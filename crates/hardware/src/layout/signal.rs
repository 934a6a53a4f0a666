//! Signal identifiers and sampled field values.
//!
//! Each fixture names its serialized signal groups with a small `Copy` enum implementing
//! [`Signal`]. Layouts refer to signals by that enum, so a layout can only mention signals the
//! fixture actually has, and JSON overrides deserialize straight into it.

use std::fmt;

/// A named signal group of one register chain.
pub trait Signal: Copy + Eq + fmt::Debug + 'static {
    /// Every signal of the chain. A layout must place each of them exactly once.
    const ALL: &'static [Self];

    /// Net name of the signal as printed on the schematic.
    fn name(self) -> &'static str;
}

/// Values of every signal deserialized from one pass over a chain.
///
/// Signals that were not part of the pass read as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValues<S> {
    values: Vec<(S, u32)>,
}

impl<S: Signal> FieldValues<S> {
    /// Creates an empty set of values.
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Records `value` for `signal`, replacing an earlier value.
    pub fn insert(&mut self, signal: S, value: u32) {
        match self.values.iter_mut().find(|(s, _)| *s == signal) {
            Some(entry) => entry.1 = value,
            None => self.values.push((signal, value)),
        }
    }

    /// Returns the value recorded for `signal`, or zero.
    pub fn get(&self, signal: S) -> u32 {
        self.values
            .iter()
            .find(|(s, _)| *s == signal)
            .map_or(0, |(_, v)| *v)
    }

    /// Iterates the recorded values in the order they were read.
    pub fn iter(&self) -> impl Iterator<Item = (S, u32)> + '_ {
        self.values.iter().copied()
    }

    /// Number of recorded signals.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Signal> Default for FieldValues<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Signal> fmt::Display for FieldValues<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (signal, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={:#x}", signal.name(), value)?;
        }
        Ok(())
    }
}
