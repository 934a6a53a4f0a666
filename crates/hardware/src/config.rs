//! Configuration system for the fixture driver.
//!
//! This module defines the startup configuration of a fixture. It provides:
//! 1. **Defaults:** The Rev A pin assignment and animation timing.
//! 2. **Structures:** Pin groups for every register chain, timing, and layout overrides.
//! 3. **Validation:** Pin conflicts and layout overrides are rejected before any pin is driven.
//!
//! Configuration is loaded from JSON (`Config::from_file`) or built with `Config::default()`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::common::{ConfigError, Pin};
use crate::io::{InputPorts, OutputPorts, SampleEdge};
use crate::layout::Slot;

/// Default configuration constants.
///
/// Pin numbers follow the Rev A fixture boards; every board uses the same header.
mod defaults {
    use crate::common::Pin;

    /// Parallel load of the sampling chain.
    pub const INPUT_PL: Pin = Pin(2);
    /// Shift clock of the sampling chain.
    pub const INPUT_SCK: Pin = Pin(3);
    /// Serial out of the sampling chain.
    pub const INPUT_SO: Pin = Pin(4);

    /// Serial in of the driving chain.
    pub const OUTPUT_SI: Pin = Pin(5);
    /// Register clock of the driving chain.
    pub const OUTPUT_RCLK: Pin = Pin(6);
    /// Shift clock of the driving chain.
    pub const OUTPUT_SCK: Pin = Pin(7);
    /// Clear of the driving chain.
    pub const OUTPUT_CLR: Pin = Pin(8);

    /// Serial in of the LED chain.
    pub const LED_SI: Pin = Pin(9);
    /// Register clock of the LED chain.
    pub const LED_RCLK: Pin = Pin(10);
    /// Shift clock of the LED chain.
    pub const LED_SCK: Pin = Pin(11);
    /// Clear of the LED chain.
    pub const LED_CLR: Pin = Pin(12);

    /// Parallel load of the bus sampling chain (MEM fixture).
    pub const BUS_INPUT_PL: Pin = Pin(22);
    /// Shift clock of the bus sampling chain.
    pub const BUS_INPUT_SCK: Pin = Pin(23);
    /// Serial out of the bus sampling chain.
    pub const BUS_INPUT_SO: Pin = Pin(24);

    /// Serial in of the bus driving chain (MEM fixture).
    pub const BUS_OUTPUT_SI: Pin = Pin(25);
    /// Register clock of the bus driving chain.
    pub const BUS_OUTPUT_RCLK: Pin = Pin(26);
    /// Shift clock of the bus driving chain.
    pub const BUS_OUTPUT_SCK: Pin = Pin(27);
    /// Clear of the bus driving chain.
    pub const BUS_OUTPUT_CLR: Pin = Pin(28);

    /// Pause between animation frames in milliseconds.
    pub const INDICATOR_INTERVAL_MS: u32 = 100;
}

/// Names of every layout that can be overridden under `layouts`.
pub const LAYOUT_NAMES: [&str; 9] = [
    "control.outputs",
    "control.inputs",
    "execute.outputs",
    "execute.inputs",
    "memory.outputs",
    "memory.inputs",
    "bus.outputs",
    "bus.inputs",
    "led.outputs",
];

/// Root configuration.
///
/// # Examples
///
/// ```
/// use fixture_core::config::Config;
/// use fixture_core::io::SampleEdge;
///
/// let json = r#"{
///     "pins": { "input": { "pl": 30, "sck": 31, "so": 32 } },
///     "timing": { "sample_edge": "after_clock", "indicator_interval_ms": 250 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.pins.input.pl.number(), 30);
/// assert_eq!(config.pins.output.si.number(), 5);
/// assert_eq!(config.timing.sample_edge, SampleEdge::AfterClock);
/// assert_eq!(config.timing.indicator_interval_ms, 250);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Pin assignment of every register chain.
    #[serde(default)]
    pub pins: PinConfig,
    /// Sampling and animation timing.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Layout overrides keyed by layout name (e.g. `"control.outputs"`).
    #[serde(default)]
    pub layouts: BTreeMap<String, serde_json::Value>,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Rejects a port that assigns one pin to two of its lines, and layout overrides
    /// keyed by a name that is not in [`LAYOUT_NAMES`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_distinct("input", &self.pins.input.lines())?;
        check_distinct("output", &self.pins.output.lines())?;
        check_distinct("led", &self.pins.led.lines())?;
        check_distinct("bus_input", &self.pins.bus_input.lines())?;
        check_distinct("bus_output", &self.pins.bus_output.lines())?;
        if let Some(name) = self
            .layouts
            .keys()
            .find(|name| !LAYOUT_NAMES.contains(&name.as_str()))
        {
            return Err(ConfigError::UnknownLayout {
                name: name.clone(),
                known: LAYOUT_NAMES.join(", "),
            });
        }
        Ok(())
    }

    /// Returns the slots of a layout override, if one is configured.
    ///
    /// # Arguments
    ///
    /// * `name` - Layout name such as `"execute.inputs"`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no override exists, or the parsed slots. The slots are not yet
    /// validated against the register chain; the fixture does that when it builds the layout.
    pub fn layout_override<S: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<Vec<Slot<S>>>, ConfigError> {
        self.layouts
            .get(name)
            .map(|value| Vec::<Slot<S>>::deserialize(value).map_err(ConfigError::from))
            .transpose()
    }
}

fn check_distinct(port: &'static str, lines: &[(&'static str, Pin)]) -> Result<(), ConfigError> {
    for (i, (first, pin)) in lines.iter().enumerate() {
        if let Some((second, _)) = lines[i + 1..].iter().find(|(_, other)| other == pin) {
            return Err(ConfigError::PinConflict {
                port,
                pin: *pin,
                first: *first,
                second: *second,
            });
        }
    }
    Ok(())
}

/// Pin assignment of every register chain.
#[derive(Debug, Clone, Deserialize)]
pub struct PinConfig {
    /// Sampling (PISO) chain of the module under test.
    #[serde(default = "PinConfig::default_input")]
    pub input: InputPorts,
    /// Driving (SIPO) chain of the module under test.
    #[serde(default = "PinConfig::default_output")]
    pub output: OutputPorts,
    /// Status LED chain.
    #[serde(default = "PinConfig::default_led")]
    pub led: OutputPorts,
    /// Bus sampling chain (MEM fixture only).
    #[serde(default = "PinConfig::default_bus_input")]
    pub bus_input: InputPorts,
    /// Bus driving chain (MEM fixture only).
    #[serde(default = "PinConfig::default_bus_output")]
    pub bus_output: OutputPorts,
}

impl PinConfig {
    /// Returns the default sampling chain pins.
    const fn default_input() -> InputPorts {
        InputPorts::new(defaults::INPUT_PL, defaults::INPUT_SCK, defaults::INPUT_SO)
    }

    /// Returns the default driving chain pins.
    const fn default_output() -> OutputPorts {
        OutputPorts::new(
            defaults::OUTPUT_SI,
            defaults::OUTPUT_RCLK,
            defaults::OUTPUT_SCK,
            defaults::OUTPUT_CLR,
        )
    }

    /// Returns the default LED chain pins.
    const fn default_led() -> OutputPorts {
        OutputPorts::new(
            defaults::LED_SI,
            defaults::LED_RCLK,
            defaults::LED_SCK,
            defaults::LED_CLR,
        )
    }

    /// Returns the default bus sampling chain pins.
    const fn default_bus_input() -> InputPorts {
        InputPorts::new(
            defaults::BUS_INPUT_PL,
            defaults::BUS_INPUT_SCK,
            defaults::BUS_INPUT_SO,
        )
    }

    /// Returns the default bus driving chain pins.
    const fn default_bus_output() -> OutputPorts {
        OutputPorts::new(
            defaults::BUS_OUTPUT_SI,
            defaults::BUS_OUTPUT_RCLK,
            defaults::BUS_OUTPUT_SCK,
            defaults::BUS_OUTPUT_CLR,
        )
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            input: Self::default_input(),
            output: Self::default_output(),
            led: Self::default_led(),
            bus_input: Self::default_bus_input(),
            bus_output: Self::default_bus_output(),
        }
    }
}

/// Sampling and animation timing.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    /// Sampling point of every PISO bit.
    #[serde(default)]
    pub sample_edge: SampleEdge,
    /// Pause between animation frames in milliseconds.
    #[serde(default = "TimingConfig::default_indicator_interval_ms")]
    pub indicator_interval_ms: u32,
}

impl TimingConfig {
    /// Returns the default animation frame interval.
    const fn default_indicator_interval_ms() -> u32 {
        defaults::INDICATOR_INTERVAL_MS
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            sample_edge: SampleEdge::default(),
            indicator_interval_ms: defaults::INDICATOR_INTERVAL_MS,
        }
    }
}
