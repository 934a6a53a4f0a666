//! Shift-register driver for CPU module test fixtures.
//!
//! Each pipeline module of the CPU (Control, Execute, Memory) is exercised on a fixture board
//! whose signals pass through chains of shift registers. This crate implements:
//! 1. **Serial Link:** Strobes and single-bit shifts over a bit-banged `PinDriver`.
//! 2. **Layouts:** Declarative wire order of every chain, validated once at startup.
//! 3. **Codec:** One generic encoder (state to SIPO chain) and decoder (PISO chain to snapshot).
//! 4. **Fixtures:** Immutable output-state builders and input snapshots for each board.
//! 5. **Clocking:** Single-phase and non-overlapping two-phase clock cycles.
//! 6. **Status:** LED animations and the assertion boundary that halts into them.
//! 7. **Simulation:** A software bench that models the registers for host-side runs.

/// Assertion boundary (compare, report, halt).
pub mod assertion;
/// Clock sequencing (single-phase and two-phase cycles).
pub mod clock;
/// Output encoder, input decoder, and the state traits they work on.
pub mod codec;
/// Common types (pins, levels, constants, errors).
pub mod common;
/// Driver configuration (pins, timing, layout overrides).
pub mod config;
/// Fixture boards (Control, Execute, Memory, bus port, LED panel).
pub mod fixtures;
/// LED animations and the sinks that show them.
pub mod indicator;
/// Pin driver capability, serial link primitives, and port groups.
pub mod io;
/// Declarative bit layouts.
pub mod layout;
/// Simulated bench with modelled shift registers.
pub mod sim;

/// Assertion boundary; construct with an `IndicatorSink` for the error animation.
pub use crate::assertion::Assertions;
/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Generic fixture board type.
pub use crate::fixtures::TestFixture;
/// Pin driver capability implemented by hardware backends and `sim::Bench`.
pub use crate::io::PinDriver;
