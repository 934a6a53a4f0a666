//! Pin driver capability.
//!
//! This module defines the `PinDriver` trait, the only thing the fixture code needs from the
//! platform. It provides:
//! 1. **Direction:** `set_mode` for input/output configuration.
//! 2. **Access:** `write` and `read` of a single digital line.
//! 3. **Timing:** `delay_ms` for the fixed pauses of the status animations.
//!
//! Implementations are assumed infallible: a real controller's GPIO writes cannot fail, and the
//! simulated bench in [`crate::sim`] mirrors that.

use crate::common::{Level, Pin, PinMode};

/// Minimal digital I/O capability used by the serial link.
///
/// Calls must reach the hardware in the order they are made; implementations must not buffer
/// or reorder writes, because the shift registers sample on the edges they produce.
pub trait PinDriver {
    /// Configures `pin` as an input or an output.
    fn set_mode(&mut self, pin: Pin, mode: PinMode);
    /// Drives `pin` to `level`.
    fn write(&mut self, pin: Pin, level: Level);
    /// Samples the current level of `pin`.
    fn read(&mut self, pin: Pin) -> Level;
    /// Blocks for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

impl<P: PinDriver + ?Sized> PinDriver for &mut P {
    #[inline]
    fn set_mode(&mut self, pin: Pin, mode: PinMode) {
        (**self).set_mode(pin, mode);
    }

    #[inline]
    fn write(&mut self, pin: Pin, level: Level) {
        (**self).write(pin, level);
    }

    #[inline]
    fn read(&mut self, pin: Pin) -> Level {
        (**self).read(pin)
    }

    #[inline]
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms);
    }
}
