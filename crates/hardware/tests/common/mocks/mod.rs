//! # Mocks

/// Mock `PinDriver`.
pub mod pins;
