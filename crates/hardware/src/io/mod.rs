//! Shift-register I/O.
//!
//! This module contains everything that touches pins:
//! 1. **Capability:** The `PinDriver` trait supplied by the platform.
//! 2. **Serial Link:** Strobe and single-bit shift primitives.
//! 3. **Ports:** Pin groups of SIPO and PISO chains with their init/clear/latch sequences.

/// Strobe and bit-shift primitives.
pub mod link;

/// SIPO and PISO pin groups.
pub mod ports;

/// The `PinDriver` capability.
pub mod traits;

pub use link::SampleEdge;
pub use ports::{InputPorts, OutputPorts};
pub use traits::PinDriver;
