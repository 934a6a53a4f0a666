//! Simulated fixture bench.
//!
//! `Bench` is a software `PinDriver`: pin writes are recorded and fed to behavioural models of
//! the shift-register chains attached to it, and reads of a PISO serial output return what the
//! modelled register presents. This lets every protocol sequence run on a host without a
//! controller, and lets tests inspect the exact pin traffic.
//!
//! Every pin starts low in input mode, as on a controller coming out of reset.

/// SIPO and PISO chain models.
pub mod chain;

use std::collections::BTreeMap;

use tracing::trace;

use crate::common::{Level, Pin, PinMode};
use crate::io::{InputPorts, OutputPorts, PinDriver};

pub use chain::{PisoChain, SipoChain};

/// One call made through the `PinDriver` interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinEvent {
    /// `set_mode(pin, mode)`.
    Mode(Pin, PinMode),
    /// `write(pin, level)`.
    Write(Pin, Level),
    /// `read(pin)` and the level it returned.
    Read(Pin, Level),
    /// `delay_ms(ms)`.
    Delay(u32),
}

/// A software bench with shift-register chains wired to its pins.
#[derive(Debug, Clone, Default)]
pub struct Bench {
    /// Last level written to each pin.
    levels: BTreeMap<Pin, Level>,
    /// Configured direction of each pin.
    modes: BTreeMap<Pin, PinMode>,
    /// Chains driven by the bench.
    outputs: Vec<SipoChain>,
    /// Chains sampled by the bench.
    inputs: Vec<PisoChain>,
    /// Every driver call, in order.
    events: Vec<PinEvent>,
    /// Sum of all delays.
    elapsed_ms: u64,
}

impl Bench {
    /// Creates a bench with nothing attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a SIPO chain of `len` stages.
    #[must_use]
    pub fn with_output_chain(mut self, name: &'static str, ports: OutputPorts, len: usize) -> Self {
        self.outputs.push(SipoChain::new(name, ports, len));
        self
    }

    /// Attaches a PISO chain of `len` stages.
    #[must_use]
    pub fn with_input_chain(mut self, name: &'static str, ports: InputPorts, len: usize) -> Self {
        self.inputs.push(PisoChain::new(name, ports, len));
        self
    }

    /// The SIPO chain called `name`.
    pub fn output_chain(&self, name: &str) -> Option<&SipoChain> {
        self.outputs.iter().find(|chain| chain.name() == name)
    }

    /// The PISO chain called `name`.
    pub fn input_chain(&self, name: &str) -> Option<&PisoChain> {
        self.inputs.iter().find(|chain| chain.name() == name)
    }

    /// Drives the parallel inputs of the PISO chain called `name`, in wire order.
    ///
    /// # Returns
    ///
    /// `false` when no such chain is attached.
    pub fn set_inputs(&mut self, name: &str, bits: &[bool]) -> bool {
        match self.inputs.iter_mut().find(|chain| chain.name() == name) {
            Some(chain) => {
                chain.set_inputs(bits);
                true
            }
            None => false,
        }
    }

    /// Last level written to `pin` (low if never written).
    pub fn level(&self, pin: Pin) -> Level {
        self.levels.get(&pin).copied().unwrap_or_default()
    }

    /// Configured direction of `pin`, if any.
    pub fn mode(&self, pin: Pin) -> Option<PinMode> {
        self.modes.get(&pin).copied()
    }

    /// Every driver call so far.
    pub fn events(&self) -> &[PinEvent] {
        &self.events
    }

    /// Returns and forgets the recorded driver calls.
    pub fn take_events(&mut self) -> Vec<PinEvent> {
        std::mem::take(&mut self.events)
    }

    /// Total time spent in `delay_ms`.
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

impl PinDriver for Bench {
    fn set_mode(&mut self, pin: Pin, mode: PinMode) {
        self.events.push(PinEvent::Mode(pin, mode));
        let _ = self.modes.insert(pin, mode);
    }

    fn write(&mut self, pin: Pin, level: Level) {
        self.events.push(PinEvent::Write(pin, level));
        let previous = self.levels.insert(pin, level).unwrap_or_default();
        let levels = &self.levels;
        let level_of = |p: Pin| levels.get(&p).copied().unwrap_or_default();
        for chain in &mut self.outputs {
            chain.on_write(pin, previous, level, level_of);
        }
        for chain in &mut self.inputs {
            chain.on_write(pin, previous, level, level_of);
        }
    }

    fn read(&mut self, pin: Pin) -> Level {
        let level = self
            .inputs
            .iter()
            .find(|chain| chain.ports().so == pin)
            .map_or_else(|| self.level(pin), PisoChain::serial_out);
        trace!(%pin, %level, "bench read");
        self.events.push(PinEvent::Read(pin, level));
        level
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(PinEvent::Delay(ms));
        self.elapsed_ms += u64::from(ms);
    }
}
