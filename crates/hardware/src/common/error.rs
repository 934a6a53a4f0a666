//! Layout, Configuration, and Assertion error definitions.
//!
//! The fixtures only know two kinds of failure:
//! 1. **Configuration defects:** A bit layout or pin assignment that cannot describe the
//!    wired hardware. These are reported once, when the layout or config is built.
//! 2. **Assertion failures:** A sampled value that differs from the expected value. On the
//!    bench this is terminal; `AssertionFailure` carries the diagnostic for host-side use.
//!
//! There is no transient-fault channel: the serial link is a direct electrical connection.

use std::panic::Location;

use thiserror::Error;

use super::pin::Pin;

/// A bit layout that does not match the register chain it describes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout has no slots at all.
    #[error("layout `{layout}` declares no slots")]
    Empty {
        /// Name of the offending layout.
        layout: String,
    },

    /// A slot claims zero bits or more bits than a field can hold.
    #[error("slot {index} of layout `{layout}` has width {width} (allowed 1..={max})")]
    InvalidWidth {
        /// Name of the offending layout.
        layout: String,
        /// Position of the slot in wire order.
        index: usize,
        /// The declared width.
        width: u8,
        /// Widest width a slot may declare.
        max: u8,
    },

    /// The same signal is mapped to two slots.
    #[error("signal `{signal}` appears more than once in layout `{layout}`")]
    DuplicateSignal {
        /// Name of the offending layout.
        layout: String,
        /// The repeated signal.
        signal: String,
    },

    /// A signal of the state type has no slot in the layout.
    #[error("signal `{signal}` has no slot in layout `{layout}`")]
    MissingSignal {
        /// Name of the offending layout.
        layout: String,
        /// The unmapped signal.
        signal: String,
    },

    /// The slots do not add up to the length of the register chain.
    #[error("layout `{layout}` shifts {actual} bits but the register chain holds {expected}")]
    LengthMismatch {
        /// Name of the offending layout.
        layout: String,
        /// Bits in the register chain.
        expected: usize,
        /// Bits described by the slots.
        actual: usize,
    },
}

/// A configuration file that cannot be used to drive the fixture.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config file `{path}`: {source}")]
    Io {
        /// Path that was opened.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for `Config`.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// One port assigns the same pin to two different lines.
    #[error("port `{port}` uses pin {pin} for both `{first}` and `{second}`")]
    PinConflict {
        /// Name of the port.
        port: &'static str,
        /// The shared pin.
        pin: Pin,
        /// First line using the pin.
        first: &'static str,
        /// Second line using the pin.
        second: &'static str,
    },

    /// A layout override names a layout no fixture has.
    #[error("unknown layout `{name}` (known: {known})")]
    UnknownLayout {
        /// Key found under `layouts`.
        name: String,
        /// Comma-separated list of valid keys.
        known: String,
    },

    /// A layout override failed validation.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// A sampled value that did not match the expected value.
///
/// The `Display` output is the diagnostic printed before the error animation takes over:
/// source location, message, and both values in hexadecimal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}: {message}: expected {expected:#x}, got {actual:#x}")]
pub struct AssertionFailure {
    /// Source file of the failing assertion.
    pub file: &'static str,
    /// Source line of the failing assertion.
    pub line: u32,
    /// Caller-supplied description of the check.
    pub message: String,
    /// Value the test expected.
    pub expected: u32,
    /// Value sampled from the fixture.
    pub actual: u32,
}

impl AssertionFailure {
    /// Creates a failure record for the given caller location.
    ///
    /// # Arguments
    ///
    /// * `location` - Where the assertion was made (usually `Location::caller()`).
    /// * `message` - Description of the check.
    /// * `expected` - Value the test expected.
    /// * `actual` - Value sampled from the fixture.
    pub fn at(
        location: &'static Location<'static>,
        message: impl Into<String>,
        expected: u32,
        actual: u32,
    ) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            message: message.into(),
            expected,
            actual,
        }
    }
}
