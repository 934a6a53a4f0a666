//! Pin, Level, and Pin Mode types.
//!
//! This module defines the strong types passed across the `PinDriver` boundary. It provides:
//! 1. **Pin Numbers:** A newtype so pin numbers cannot be confused with bit counts or widths.
//! 2. **Logic Levels:** `Level::Low` / `Level::High` with conversions to and from `bool`.
//! 3. **Pin Modes:** Input or output direction for `set_mode`.

use std::fmt;

use serde::Deserialize;

/// A microcontroller pin number.
///
/// Pins are plain numbers on the controller side; the newtype keeps them from being
/// mixed up with bit widths and counts in the shift-register code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct Pin(pub u8);

impl Pin {
    /// Creates a new pin from its raw number.
    ///
    /// # Arguments
    ///
    /// * `number` - The controller's pin number.
    #[inline(always)]
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// Returns the raw pin number.
    #[inline(always)]
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

/// Logic level of a digital line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Level {
    /// Logic 0.
    #[default]
    Low,
    /// Logic 1.
    High,
}

impl Level {
    /// Returns `true` for `Level::High`.
    #[inline(always)]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// Returns the level as a single bit (`0` or `1`).
    #[inline(always)]
    pub const fn bit(self) -> u32 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }
}

impl From<bool> for Level {
    #[inline(always)]
    fn from(value: bool) -> Self {
        if value { Self::High } else { Self::Low }
    }
}

impl From<Level> for bool {
    #[inline(always)]
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Direction of a digital pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinMode {
    /// The controller samples the pin.
    Input,
    /// The controller drives the pin.
    Output,
}
