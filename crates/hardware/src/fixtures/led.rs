//! Status LED panel.
//!
//! Eight LEDs on their own '595 chain, `D8` shifted first. Boards without LEDs on their
//! driving chain show test status here.

use serde::Deserialize;

use crate::codec::{OutputEncoder, OutputState};
use crate::common::ConfigError;
use crate::common::constants::LED_COUNT;
use crate::config::Config;
use crate::indicator::{HasLeds, LedPanel};
use crate::io::PinDriver;
use crate::layout::{Signal, Slot};

use super::resolve_layout;

/// Signals on the LED chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedSignal {
    /// The eight LEDs, bit 7 leftmost.
    Led,
}

impl Signal for LedSignal {
    const ALL: &'static [Self] = &[Self::Led];

    fn name(self) -> &'static str {
        "LED"
    }
}

/// Wire order of the LED chain.
pub fn output_slots() -> Vec<Slot<LedSignal>> {
    vec![Slot::msb(LedSignal::Led, LED_COUNT)]
}

/// LED levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedOutputs {
    led: u32,
}

impl LedOutputs {
    /// All LEDs off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lights the LEDs set in `pattern`.
    #[must_use]
    pub fn led(self, pattern: u8) -> Self {
        Self {
            led: u32::from(pattern),
        }
    }

    /// Currently lit LEDs.
    pub const fn pattern(&self) -> u32 {
        self.led
    }
}

impl OutputState for LedOutputs {
    type Signal = LedSignal;

    fn signal(&self, _signal: LedSignal) -> u32 {
        self.led
    }

    fn with_signal(&self, _signal: LedSignal, value: u32) -> Self {
        Self { led: value }
    }
}

impl HasLeds for LedOutputs {
    fn with_leds(&self, pattern: u8) -> Self {
        self.led(pattern)
    }
}

/// Builds the encoder of the LED chain.
pub fn encoder(config: &Config) -> Result<OutputEncoder<LedOutputs>, ConfigError> {
    let layout = resolve_layout(config, "led.outputs", output_slots, usize::from(LED_COUNT))?;
    Ok(OutputEncoder::new(config.pins.led, layout))
}

/// Builds an LED panel on the dedicated LED chain.
pub fn panel<P: PinDriver>(pins: P, config: &Config) -> Result<LedPanel<P, LedOutputs>, ConfigError> {
    Ok(LedPanel::new(pins, encoder(config)?, LedOutputs::new()))
}
