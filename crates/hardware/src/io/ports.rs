//! Port groups of a fixture.
//!
//! A fixture drives its module through a SIPO chain (serial in, latch, shift clock, clear) and
//! samples it through a PISO chain (parallel load, shift clock, serial out). This module groups
//! the pins of each chain and implements the sequences that act on a whole chain:
//! 1. **Initialization:** Pin directions and idle levels after power-up.
//! 2. **Clearing:** Zeroing the SIPO chain and presenting the zeros.
//! 3. **Bit Transfer:** One-bit shifts and the latch/load strobes around a transfer.

use serde::Deserialize;
use tracing::trace;

use super::link::{self, SampleEdge};
use super::traits::PinDriver;
use crate::common::{Level, Pin, PinMode};

/// Pins of a serial-in/parallel-out chain that drives fixture signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OutputPorts {
    /// Serial data into the first register.
    pub si: Pin,
    /// Register clock; presents the shifted bits on the outputs.
    pub rclk: Pin,
    /// Shift clock.
    pub sck: Pin,
    /// Active-low clear of the shift stage.
    pub clr: Pin,
}

impl OutputPorts {
    /// Creates a port group from its four pins.
    pub const fn new(si: Pin, rclk: Pin, sck: Pin, clr: Pin) -> Self {
        Self { si, rclk, sck, clr }
    }

    /// Returns every line of the port with its net name.
    pub const fn lines(&self) -> [(&'static str, Pin); 4] {
        [
            ("SI", self.si),
            ("RCLK", self.rclk),
            ("SCK", self.sck),
            ("CLR", self.clr),
        ]
    }

    /// Sets pin directions, parks every line high, then clears the outputs.
    pub fn initialize_hardware<P: PinDriver + ?Sized>(&self, pins: &mut P) {
        for (_, pin) in self.lines() {
            pins.set_mode(pin, PinMode::Output);
        }
        pins.write(self.si, Level::High);
        pins.write(self.sck, Level::High);
        pins.write(self.rclk, Level::High);
        pins.write(self.clr, Level::High);

        self.clear_outputs(pins);
    }

    /// Zeroes the shift stage and latches the zeros onto the outputs.
    pub fn clear_outputs<P: PinDriver + ?Sized>(&self, pins: &mut P) {
        link::strobe_low(pins, self.clr);
        link::strobe_high(pins, self.rclk);
    }

    /// Shifts one bit into the chain.
    #[inline]
    pub fn shift_out_bit<P: PinDriver + ?Sized>(&self, pins: &mut P, bit: bool) {
        trace!(bit = u8::from(bit), "shift out");
        link::shift_out_bit(pins, self.si, self.sck, bit);
    }

    /// Presents the shifted bits on the register outputs.
    #[inline]
    pub fn latch<P: PinDriver + ?Sized>(&self, pins: &mut P) {
        link::strobe_high(pins, self.rclk);
    }
}

/// Pins of a parallel-in/serial-out chain that samples fixture signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct InputPorts {
    /// Active-low parallel load.
    pub pl: Pin,
    /// Shift clock.
    pub sck: Pin,
    /// Serial data out of the last register.
    pub so: Pin,
}

impl InputPorts {
    /// Creates a port group from its three pins.
    pub const fn new(pl: Pin, sck: Pin, so: Pin) -> Self {
        Self { pl, sck, so }
    }

    /// Returns every line of the port with its net name.
    pub const fn lines(&self) -> [(&'static str, Pin); 3] {
        [("PL", self.pl), ("SCK", self.sck), ("SO", self.so)]
    }

    /// Sets pin directions and parks the load and clock lines high.
    pub fn initialize_hardware<P: PinDriver + ?Sized>(&self, pins: &mut P) {
        pins.set_mode(self.pl, PinMode::Output);
        pins.set_mode(self.sck, PinMode::Output);
        pins.set_mode(self.so, PinMode::Input);

        pins.write(self.pl, Level::High);
        pins.write(self.sck, Level::High);
    }

    /// Latches the fixture's current signals into the chain.
    #[inline]
    pub fn parallel_load<P: PinDriver + ?Sized>(&self, pins: &mut P) {
        link::strobe_low(pins, self.pl);
    }

    /// Shifts one bit out of the chain.
    #[inline]
    pub fn shift_in_bit<P: PinDriver + ?Sized>(&self, pins: &mut P, edge: SampleEdge) -> bool {
        let bit = link::shift_in_bit(pins, self.so, self.sck, edge);
        trace!(bit = u8::from(bit), "shift in");
        bit
    }
}
