//! Status LED animations.
//!
//! A fixture reports its state on eight LEDs. This module provides:
//! 1. **`Indicator`:** The error, success, and progress animations, advanced by `step()`.
//! 2. **`IndicatorSink`:** Where frames go. `LedPanel` pushes them through a SIPO chain;
//!    tests and the CLI plug in their own sinks.
//! 3. **Loops:** `run_steps` for a bounded run and `run_forever` for the terminal states.

use tracing::{debug, info};

use crate::codec::{OutputEncoder, OutputState};
use crate::common::constants::{CHASER_STEPS, ERROR_PATTERNS, SUCCESS_PATTERN};
use crate::io::PinDriver;

/// Output states that carry the status LEDs.
pub trait HasLeds: OutputState {
    /// Returns a copy with the LEDs set to `pattern`, bit 7 leftmost.
    #[must_use]
    fn with_leds(&self, pattern: u8) -> Self;
}

/// Destination of animation frames.
pub trait IndicatorSink {
    /// Displays one frame.
    fn show(&mut self, pattern: u8);
    /// Holds the current frame for `ms` milliseconds.
    fn pause(&mut self, ms: u32);
}

impl<K: IndicatorSink + ?Sized> IndicatorSink for &mut K {
    fn show(&mut self, pattern: u8) {
        (**self).show(pattern);
    }

    fn pause(&mut self, ms: u32) {
        (**self).pause(ms);
    }
}

/// An LED animation and its position.
///
/// Each variant owns its own step counter; `step()` returns the next frame and advances it,
/// wrapping at the end of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Flashes all LEDs twice, then holds them on: the test failed.
    Error {
        /// Index of the next frame in `ERROR_PATTERNS`.
        step: usize,
    },
    /// Alternating LEDs: every check passed.
    Success,
    /// A single lit LED bouncing between the ends: the test is running.
    Chaser {
        /// Position in the sweep, `0..CHASER_STEPS`.
        step: usize,
    },
}

impl Indicator {
    /// The error animation, at its first frame.
    pub const fn error() -> Self {
        Self::Error { step: 0 }
    }

    /// The success pattern.
    pub const fn success() -> Self {
        Self::Success
    }

    /// The progress chaser, at its first frame.
    pub const fn chaser() -> Self {
        Self::Chaser { step: 0 }
    }

    /// Returns the next frame and advances the animation.
    pub fn step(&mut self) -> u8 {
        match self {
            Self::Error { step } => {
                let current = *step % ERROR_PATTERNS.len();
                *step = (current + 1) % ERROR_PATTERNS.len();
                ERROR_PATTERNS[current]
            }
            Self::Success => SUCCESS_PATTERN,
            Self::Chaser { step } => {
                *step = (*step % CHASER_STEPS + 1) % CHASER_STEPS;
                1 << chaser_position(*step)
            }
        }
    }

    /// Shows `count` frames, pausing `interval_ms` after each.
    pub fn run_steps<K: IndicatorSink + ?Sized>(&mut self, sink: &mut K, count: usize, interval_ms: u32) {
        for _ in 0..count {
            let pattern = self.step();
            debug!(pattern = format_args!("{pattern:#010b}"), "indicator frame");
            sink.show(pattern);
            sink.pause(interval_ms);
        }
    }

    /// Shows frames until the process is stopped.
    pub fn run_forever<K: IndicatorSink + ?Sized>(&mut self, sink: &mut K, interval_ms: u32) -> ! {
        info!(indicator = ?self, interval_ms, "entering indicator loop");
        loop {
            let pattern = self.step();
            sink.show(pattern);
            sink.pause(interval_ms);
        }
    }
}

/// Lit bit for sweep position `step`: up from bit 0 to bit 7, then back down.
const fn chaser_position(step: usize) -> usize {
    let half = CHASER_STEPS / 2;
    if step <= half { step } else { CHASER_STEPS - step }
}

/// Shows frames on a SIPO chain that carries the LEDs.
///
/// The panel keeps the rest of the chain's state as it was given, so LEDs on a fixture's own
/// driving chain can be animated without disturbing the other signals.
#[derive(Debug)]
pub struct LedPanel<P: PinDriver, O: HasLeds> {
    pins: P,
    encoder: OutputEncoder<O>,
    state: O,
}

impl<P: PinDriver, O: HasLeds> LedPanel<P, O> {
    /// Creates a panel that owns `pins` and animates the LEDs of `state`.
    ///
    /// # Arguments
    ///
    /// * `pins` - Pin driver (or a `&mut` borrow of one).
    /// * `encoder` - Encoder of the chain carrying the LEDs.
    /// * `state` - State of the rest of the chain.
    pub const fn new(pins: P, encoder: OutputEncoder<O>, state: O) -> Self {
        Self {
            pins,
            encoder,
            state,
        }
    }

    /// Last state pushed (or the initial state).
    pub const fn state(&self) -> &O {
        &self.state
    }

    /// The pin driver.
    pub const fn pins(&self) -> &P {
        &self.pins
    }

    /// Gives the pin driver back.
    pub fn into_pins(self) -> P {
        self.pins
    }
}

impl<P: PinDriver, O: HasLeds> IndicatorSink for LedPanel<P, O> {
    fn show(&mut self, pattern: u8) {
        self.state = self.state.with_leds(pattern);
        self.encoder.push(&mut self.pins, &self.state);
    }

    fn pause(&mut self, ms: u32) {
        self.pins.delay_ms(ms);
    }
}
