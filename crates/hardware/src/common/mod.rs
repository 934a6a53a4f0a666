//! Common types used throughout the fixture driver.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Pin Types:** Strong types for pin numbers, logic levels, and pin directions.
//! 2. **Constants:** Field-width limits, idle control words, and LED patterns.
//! 3. **Error Handling:** Layout and configuration defects, and assertion failures.

/// Fixture-wide constants.
pub mod constants;

/// Error types for layouts, configuration, and assertions.
pub mod error;

/// Pin number, logic level, and pin mode types.
pub mod pin;

pub use error::{AssertionFailure, ConfigError, LayoutError};
pub use pin::{Level, Pin, PinMode};
