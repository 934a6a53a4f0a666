//! Fixture-wide Constants.
//!
//! This module defines constants shared by the layouts, the fixtures, and the animations:
//! 1. **Field Constants:** Limits on how wide a single serialized field may be.
//! 2. **Idle Values:** The all-ones "no operation" control words of each fixture.
//! 3. **Panel Constants:** Width and patterns of the eight-LED status panel.

/// Widest field a single layout slot may carry.
///
/// Every signal group on the Rev A fixtures fits in a 32-bit word.
pub const MAX_FIELD_WIDTH: u8 = 32;

/// Number of LEDs on a status panel (one 8-bit SIPO register).
pub const LED_COUNT: u8 = 8;

/// Idle value of the 7-bit `Ctl_MEM` word (bits 20..14 of the control word): no operation.
pub const CTL_MEM_IDLE: u32 = 0b111_1111;

/// Idle value of the full 21-bit `Ctl_EX` control word: no operation.
pub const CTL_EX_IDLE: u32 = 0b1_1111_1111_1111_1111_1111;

/// Output-enable mask with every bus driver disabled (active-low enables).
pub const BUS_OE_RELEASED: u32 = 0b11_1111;

/// Pattern shown by the success animation on every step.
pub const SUCCESS_PATTERN: u8 = 0b1010_1010;

/// Pattern sequence shown by the error animation.
pub const ERROR_PATTERNS: [u8; 8] = [0xFF, 0x00, 0xFF, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];

/// Number of steps in one sweep of the progress chaser (up to bit 7 and back to bit 0).
pub const CHASER_STEPS: usize = 14;
