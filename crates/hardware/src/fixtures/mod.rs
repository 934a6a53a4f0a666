//! Fixture variants.
//!
//! Each CPU pipeline module has its own fixture board. The boards share one protocol and differ
//! only in which signals sit at which chain position and in their clock discipline. This module
//! provides:
//! 1. **`TestFixture`:** One driving chain, one sampling chain, and a clock sequencer.
//! 2. **Variants:** Output states, input snapshots, and Rev A layouts for the Control,
//!    Execute, and Memory boards, the Memory board's bus port, and the LED panel.
//! 3. **Layout resolution:** Built-in layouts, optionally replaced from configuration.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::clock::{ClockSequencer, Clocked};
use crate::codec::{InputDecoder, InputSnapshot, OutputEncoder, OutputState};
use crate::common::ConfigError;
use crate::config::Config;
use crate::io::PinDriver;
use crate::layout::{BitLayout, Signal, Slot};

/// Memory board bus port (address, data, bank, load/store strobes).
pub mod bus;
/// Control module board.
pub mod control;
/// Execute module board.
pub mod execute;
/// Status LED panel.
pub mod led;
/// Memory module board.
pub mod memory;

/// A fixture board: a driving chain, a sampling chain, and the module's clock discipline.
#[derive(Debug, Clone)]
pub struct TestFixture<O: OutputState, I: InputSnapshot> {
    name: &'static str,
    outputs: OutputEncoder<O>,
    inputs: InputDecoder<I>,
    clock: ClockSequencer,
}

impl<O: OutputState, I: InputSnapshot> TestFixture<O, I> {
    /// Assembles a fixture from its parts.
    pub const fn new(
        name: &'static str,
        outputs: OutputEncoder<O>,
        inputs: InputDecoder<I>,
        clock: ClockSequencer,
    ) -> Self {
        Self {
            name,
            outputs,
            inputs,
            clock,
        }
    }

    /// Board name used in logs.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Encoder of the driving chain.
    pub const fn outputs(&self) -> &OutputEncoder<O> {
        &self.outputs
    }

    /// Decoder of the sampling chain.
    pub const fn inputs(&self) -> &InputDecoder<I> {
        &self.inputs
    }

    /// Clock sequencer of the module.
    pub const fn clock(&self) -> &ClockSequencer {
        &self.clock
    }

    /// Sets pin directions and idle levels of both chains and clears the outputs.
    pub fn initialize_hardware<P: PinDriver + ?Sized>(&self, pins: &mut P) {
        self.inputs.initialize_hardware(pins);
        self.outputs.initialize_hardware(pins);
        info!(fixture = self.name, "hardware initialized");
    }

    /// Pushes `state` to the module's inputs.
    pub fn set<P: PinDriver + ?Sized>(&self, pins: &mut P, state: &O) {
        self.outputs.push(pins, state);
    }

    /// Samples the module's outputs.
    pub fn read<P: PinDriver + ?Sized>(&self, pins: &mut P) -> I {
        self.inputs.read(pins)
    }
}

impl<O: Clocked, I: InputSnapshot> TestFixture<O, I> {
    /// Pulses the module clock through one cycle and returns the last pushed state.
    pub fn tick<P: PinDriver + ?Sized>(&self, pins: &mut P, state: O) -> O {
        self.clock.tick(&self.outputs, pins, state)
    }
}

/// The fixture boards known to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureKind {
    /// Control module (ID stage: hazard and forwarding logic).
    Control,
    /// Execute module (ALU).
    Execute,
    /// Memory module, including its bus port.
    Memory,
}

impl FixtureKind {
    /// Every board, in pipeline order.
    pub const ALL: [Self; 3] = [Self::Control, Self::Execute, Self::Memory];

    /// Lower-case board name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Execute => "execute",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FixtureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "control" | "ctl" => Ok(Self::Control),
            "execute" | "ex" => Ok(Self::Execute),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("unknown fixture `{other}`")),
        }
    }
}

/// Builds the layout named `name`, preferring a configured override over `builtin`.
pub(crate) fn resolve_layout<S: Signal + DeserializeOwned>(
    config: &Config,
    name: &'static str,
    builtin: fn() -> Vec<Slot<S>>,
    chain_len: usize,
) -> Result<BitLayout<S>, ConfigError> {
    let slots = match config.layout_override(name)? {
        Some(slots) => {
            info!(layout = name, "using configured layout");
            slots
        }
        None => builtin(),
    };
    Ok(BitLayout::new(name, slots, chain_len)?)
}
