//! Serial link primitives.
//!
//! Strobes and single-bit shifts over the clock/data/latch/clear lines of a shift-register
//! chain. Everything above this module is expressed in terms of these four operations, and
//! the order of pin writes inside each of them is what the registers rely on.

use serde::Deserialize;

use super::traits::PinDriver;
use crate::common::{Level, Pin};

/// Where a PISO data line is sampled relative to the clock pulse that advances it.
///
/// A '165-style register presents its first bit as soon as the parallel load ends, so the bit
/// must be read before the first clock pulse. Registers that only update their serial output
/// on the clock edge need the opposite order. A decoder applies one choice to every bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleEdge {
    /// Read the data line, then pulse the clock.
    #[default]
    BeforeClock,
    /// Pulse the clock, then read the data line.
    AfterClock,
}

/// Pulses an active-low line once: high, low, high.
///
/// Used for the parallel-load and clear lines. The line is left idle-high.
#[inline]
pub fn strobe_low<P: PinDriver + ?Sized>(pins: &mut P, line: Pin) {
    pins.write(line, Level::High);
    pins.write(line, Level::Low);
    pins.write(line, Level::High);
}

/// Pulses an active-high line once: low, high, low.
///
/// Used for the shift clock and the register (latch) clock. The line is left idle-low.
#[inline]
pub fn strobe_high<P: PinDriver + ?Sized>(pins: &mut P, line: Pin) {
    pins.write(line, Level::Low);
    pins.write(line, Level::High);
    pins.write(line, Level::Low);
}

/// Shifts one bit into a SIPO register: set `data`, then pulse `clock`.
#[inline]
pub fn shift_out_bit<P: PinDriver + ?Sized>(pins: &mut P, data: Pin, clock: Pin, bit: bool) {
    pins.write(data, Level::from(bit));
    strobe_high(pins, clock);
}

/// Shifts one bit out of a PISO register and returns it.
///
/// `edge` selects whether `data` is sampled before or after the clock pulse.
#[inline]
pub fn shift_in_bit<P: PinDriver + ?Sized>(
    pins: &mut P,
    data: Pin,
    clock: Pin,
    edge: SampleEdge,
) -> bool {
    match edge {
        SampleEdge::BeforeClock => {
            let bit = pins.read(data).is_high();
            strobe_high(pins, clock);
            bit
        }
        SampleEdge::AfterClock => {
            strobe_high(pins, clock);
            pins.read(data).is_high()
        }
    }
}
