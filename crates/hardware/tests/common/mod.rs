//! # Common Test Infrastructure

/// Test harness: tracing, simulated benches, and recording sinks.
pub mod harness;

/// `mockall` doubles of the driver capabilities.
pub mod mocks;
