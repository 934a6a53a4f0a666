//! Declarative bit layouts.
//!
//! A `BitLayout` lists, in wire order, which bits of which signal travel through a register
//! chain. The same routine serializes every fixture's outputs and deserializes every fixture's
//! inputs from its layout, so the Rev A wiring of each board lives in data instead of in
//! hand-unrolled shift code. It provides:
//! 1. **Slots:** A signal with a width and bit order, or reserved padding.
//! 2. **Validation:** Widths, duplicates, coverage, and total length are checked once, when the
//!    layout is built.
//! 3. **Serialization:** Bit streams from signal values and signal values from bit streams.

use std::fmt;

use serde::Deserialize;

use crate::common::LayoutError;
use crate::common::constants::MAX_FIELD_WIDTH;

/// Signal identifiers and sampled field values.
pub mod signal;

pub use signal::{FieldValues, Signal};

/// Order in which the bits of a multi-bit slot travel on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitOrder {
    /// Most significant bit first. Every Rev A chain uses this order.
    #[default]
    MsbFirst,
    /// Least significant bit first.
    LsbFirst,
}

/// One entry of a layout, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Slot<S> {
    /// `width` bits of a signal.
    Signal {
        /// The signal carried by the slot.
        signal: S,
        /// Number of bits taken from the signal.
        width: u8,
        /// Bit order of the slot on the wire.
        #[serde(default)]
        order: BitOrder,
    },
    /// Unused register positions: shifted as zeros, discarded when read.
    Reserved {
        /// Number of unused positions.
        width: u8,
    },
}

impl<S> Slot<S> {
    /// A slot carrying `width` bits of `signal`, most significant bit first.
    pub const fn msb(signal: S, width: u8) -> Self {
        Self::Signal {
            signal,
            width,
            order: BitOrder::MsbFirst,
        }
    }

    /// A single-bit slot.
    pub const fn bit(signal: S) -> Self {
        Self::msb(signal, 1)
    }

    /// `width` unused positions.
    pub const fn reserved(width: u8) -> Self {
        Self::Reserved { width }
    }

    /// Number of bits the slot occupies on the wire.
    pub const fn width(&self) -> u8 {
        match self {
            Self::Signal { width, .. } | Self::Reserved { width } => *width,
        }
    }
}

/// A validated wire layout of one register chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitLayout<S> {
    name: &'static str,
    slots: Vec<Slot<S>>,
    len: usize,
}

impl<S: Signal> BitLayout<S> {
    /// Builds a layout and checks it against the chain it describes.
    ///
    /// # Arguments
    ///
    /// * `name` - Name used in diagnostics (e.g. `"control.outputs"`).
    /// * `slots` - Slots in wire order.
    /// * `chain_len` - Number of bits the register chain expects per transfer.
    ///
    /// # Returns
    ///
    /// The layout, or the first defect found: an empty layout, a slot width outside
    /// `1..=32`, a signal placed twice, a signal of `S` that is never placed, or slots
    /// that do not add up to `chain_len`.
    pub fn new(
        name: &'static str,
        slots: Vec<Slot<S>>,
        chain_len: usize,
    ) -> Result<Self, LayoutError> {
        if slots.is_empty() {
            return Err(LayoutError::Empty {
                layout: name.to_owned(),
            });
        }

        let mut placed: Vec<S> = Vec::with_capacity(S::ALL.len());
        let mut len = 0usize;
        for (index, slot) in slots.iter().enumerate() {
            let width = slot.width();
            if width == 0 || width > MAX_FIELD_WIDTH {
                return Err(LayoutError::InvalidWidth {
                    layout: name.to_owned(),
                    index,
                    width,
                    max: MAX_FIELD_WIDTH,
                });
            }
            if let Slot::Signal { signal, .. } = slot {
                if placed.contains(signal) {
                    return Err(LayoutError::DuplicateSignal {
                        layout: name.to_owned(),
                        signal: signal.name().to_owned(),
                    });
                }
                placed.push(*signal);
            }
            len += width as usize;
        }

        if let Some(missing) = S::ALL.iter().find(|s| !placed.contains(*s)) {
            return Err(LayoutError::MissingSignal {
                layout: name.to_owned(),
                signal: missing.name().to_owned(),
            });
        }

        if len != chain_len {
            return Err(LayoutError::LengthMismatch {
                layout: name.to_owned(),
                expected: chain_len,
                actual: len,
            });
        }

        Ok(Self { name, slots, len })
    }

    /// Name used in diagnostics.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Slots in wire order.
    pub fn slots(&self) -> &[Slot<S>] {
        &self.slots
    }

    /// Number of bits shifted per transfer.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; an empty layout is rejected at construction.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Feeds every wire bit to `emit`, in order.
    ///
    /// # Arguments
    ///
    /// * `value` - Returns the current value of a signal.
    /// * `emit` - Receives each bit; reserved positions are emitted as `false`.
    pub fn for_each_bit(&self, value: impl Fn(S) -> u32, mut emit: impl FnMut(bool)) {
        for slot in &self.slots {
            match *slot {
                Slot::Signal {
                    signal,
                    width,
                    order,
                } => {
                    let v = value(signal);
                    for i in 0..u32::from(width) {
                        let shift = match order {
                            BitOrder::MsbFirst => u32::from(width) - 1 - i,
                            BitOrder::LsbFirst => i,
                        };
                        emit((v >> shift) & 1 == 1);
                    }
                }
                Slot::Reserved { width } => {
                    for _ in 0..width {
                        emit(false);
                    }
                }
            }
        }
    }

    /// Collects the wire bits for the given signal values.
    pub fn serialize(&self, value: impl Fn(S) -> u32) -> Vec<bool> {
        let mut bits = Vec::with_capacity(self.len);
        self.for_each_bit(value, |bit| bits.push(bit));
        bits
    }

    /// Rebuilds signal values from wire bits.
    ///
    /// `next_bit` is called exactly `len()` times, including once for every reserved
    /// position, so the bit count stays aligned with the chain.
    pub fn deserialize(&self, mut next_bit: impl FnMut() -> bool) -> FieldValues<S> {
        let mut values = FieldValues::new();
        for slot in &self.slots {
            match *slot {
                Slot::Signal {
                    signal,
                    width,
                    order,
                } => {
                    let mut acc = 0u32;
                    for i in 0..u32::from(width) {
                        let bit = u32::from(next_bit());
                        acc = match order {
                            BitOrder::MsbFirst => (acc << 1) | bit,
                            BitOrder::LsbFirst => acc | (bit << i),
                        };
                    }
                    values.insert(signal, acc);
                }
                Slot::Reserved { width } => {
                    for _ in 0..width {
                        let _ = next_bit();
                    }
                }
            }
        }
        values
    }
}

impl<S: Signal> fmt::Display for BitLayout<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} bits)", self.name, self.len)?;
        let mut offset = 0usize;
        for slot in &self.slots {
            let width = slot.width() as usize;
            let label = match slot {
                Slot::Signal {
                    signal,
                    order: BitOrder::MsbFirst,
                    ..
                } => signal.name().to_owned(),
                Slot::Signal {
                    signal,
                    order: BitOrder::LsbFirst,
                    ..
                } => format!("{} (lsb first)", signal.name()),
                Slot::Reserved { .. } => "-".to_owned(),
            };
            writeln!(
                f,
                "  {:>3}..{:<3} {:>2}  {}",
                offset,
                offset + width - 1,
                width,
                label
            )?;
            offset += width;
        }
        Ok(())
    }
}
