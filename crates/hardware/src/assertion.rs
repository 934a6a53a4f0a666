//! Assertion boundary.
//!
//! Test sequences compare sampled values with `Assertions::assert_equal`. A mismatch is
//! terminal: the diagnostic is logged and printed, and the error animation takes over the LEDs
//! for good. The animation sink is handed to `Assertions` when it is created.
//!
//! `check_equal` performs the same comparison without halting, for host-side tools and tests.

use std::panic::Location;

use tracing::{error, info};

use crate::common::AssertionFailure;
use crate::indicator::{Indicator, IndicatorSink};

/// Comparison primitive that halts into the error animation on mismatch.
#[derive(Debug)]
pub struct Assertions<K: IndicatorSink> {
    sink: K,
    interval_ms: u32,
}

impl<K: IndicatorSink> Assertions<K> {
    /// Creates the boundary.
    ///
    /// # Arguments
    ///
    /// * `sink` - Where the error and success animations are shown.
    /// * `interval_ms` - Pause between animation frames.
    pub const fn new(sink: K, interval_ms: u32) -> Self {
        Self { sink, interval_ms }
    }

    /// The animation sink.
    pub const fn sink(&self) -> &K {
        &self.sink
    }

    /// Mutable access to the sink, e.g. to show progress between checks.
    pub const fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Compares `expected` with `actual` and reports the caller's location on mismatch.
    #[track_caller]
    pub fn check_equal(
        &self,
        expected: u32,
        actual: u32,
        message: &str,
    ) -> Result<(), AssertionFailure> {
        if expected == actual {
            Ok(())
        } else {
            Err(AssertionFailure::at(
                Location::caller(),
                message,
                expected,
                actual,
            ))
        }
    }

    /// Compares `expected` with `actual`; on mismatch never returns.
    #[track_caller]
    pub fn assert_equal(&mut self, expected: u32, actual: u32, message: &str) {
        if let Err(failure) = self.check_equal(expected, actual, message) {
            self.halt(&failure);
        }
    }

    /// Reports `failure` and runs the error animation forever.
    pub fn halt(&mut self, failure: &AssertionFailure) -> ! {
        error!(
            file = failure.file,
            line = failure.line,
            expected = format_args!("{:#x}", failure.expected),
            actual = format_args!("{:#x}", failure.actual),
            "{}",
            failure.message
        );
        eprintln!("{failure}");
        Indicator::error().run_forever(&mut self.sink, self.interval_ms)
    }

    /// Reports a passing run and shows the success pattern forever.
    pub fn succeed(&mut self) -> ! {
        info!("all checks passed");
        Indicator::success().run_forever(&mut self.sink, self.interval_ms)
    }
}
