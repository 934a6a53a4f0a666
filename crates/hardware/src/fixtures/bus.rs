//! Memory board bus port.
//!
//! The Memory board sits between the MEM stage and a bus that the fixture plays the part of:
//! it can drive the load/store strobes, bank, address, and data lines, or release them so the
//! module under test drives them. Each group of lines goes through tri-state buffers whose
//! enables (`OE`, active-low) are part of the driving chain.
//!
//! # Driving chain (Rev A, 57 bits)
//!
//! two unused bits, `OE[6:0]`, six unused bits, `MemStore`, `MemLoad`, five unused bits,
//! `Bank[2:0]`, `Addr[15:0]`, `IO[15:0]`
//!
//! # Sampling chain (Rev A, 40 bits)
//!
//! three unused bits, `MemLoad`, `MemStore`, `Bank[2:0]`, `Addr[15:0]`, `IO[15:0]`

use serde::Deserialize;
use tracing::info;

use crate::codec::{InputDecoder, InputSnapshot, OutputEncoder, OutputState};
use crate::common::ConfigError;
use crate::common::constants::BUS_OE_RELEASED;
use crate::config::Config;
use crate::io::PinDriver;
use crate::layout::{FieldValues, Signal, Slot};

use super::resolve_layout;

/// Bits in the bus driving chain.
pub const OUTPUT_BITS: usize = 57;
/// Bits in the bus sampling chain.
pub const INPUT_BITS: usize = 40;

/// Output-enable mask keeping the load/store strobe buffers enabled.
const OE_MEM_LOAD_STORE: u32 = 0b01_1111;
/// Output-enable mask keeping the bank buffers enabled.
const OE_BANK: u32 = 0b10_1111;
/// Output-enable mask keeping the address buffers enabled.
const OE_ADDR: u32 = 0b11_0011;
/// Output-enable mask keeping the data buffers enabled.
const OE_DATA: u32 = 0b11_1100;

/// Signals the fixture drives onto the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusOutputSignal {
    /// Tri-state buffer enables (active-low).
    Oe,
    /// Store strobe (active-low).
    MemStore,
    /// Load strobe (active-low).
    MemLoad,
    /// Memory bank.
    Bank,
    /// Address bus.
    Addr,
    /// Data bus.
    Io,
}

impl Signal for BusOutputSignal {
    const ALL: &'static [Self] = &[
        Self::Oe,
        Self::MemStore,
        Self::MemLoad,
        Self::Bank,
        Self::Addr,
        Self::Io,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Oe => "OE",
            Self::MemStore => "MemStore",
            Self::MemLoad => "MemLoad",
            Self::Bank => "Bank",
            Self::Addr => "Addr",
            Self::Io => "IO",
        }
    }
}

/// Rev A wire order of the bus driving chain.
pub fn output_slots() -> Vec<Slot<BusOutputSignal>> {
    use BusOutputSignal as S;
    vec![
        Slot::reserved(2),
        Slot::msb(S::Oe, 7),
        Slot::reserved(6),
        Slot::bit(S::MemStore),
        Slot::bit(S::MemLoad),
        Slot::reserved(5),
        Slot::msb(S::Bank, 3),
        Slot::msb(S::Addr, 16),
        Slot::msb(S::Io, 16),
    ]
}

/// Bus lines sampled by the fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusInputSignal {
    /// Load strobe (active-low).
    MemLoad,
    /// Store strobe (active-low).
    MemStore,
    /// Memory bank.
    Bank,
    /// Address bus.
    Addr,
    /// Data bus.
    Io,
}

impl Signal for BusInputSignal {
    const ALL: &'static [Self] = &[
        Self::MemLoad,
        Self::MemStore,
        Self::Bank,
        Self::Addr,
        Self::Io,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::MemLoad => "MemLoad",
            Self::MemStore => "MemStore",
            Self::Bank => "Bank",
            Self::Addr => "Addr",
            Self::Io => "IO",
        }
    }
}

/// Rev A wire order of the bus sampling chain.
pub fn input_slots() -> Vec<Slot<BusInputSignal>> {
    use BusInputSignal as S;
    vec![
        Slot::reserved(3),
        Slot::bit(S::MemLoad),
        Slot::bit(S::MemStore),
        Slot::msb(S::Bank, 3),
        Slot::msb(S::Addr, 16),
        Slot::msb(S::Io, 16),
    ]
}

/// Driving and sampling chains of the bus port. The bus has no clock of its own.
#[derive(Debug, Clone)]
pub struct BusInterface {
    outputs: OutputEncoder<BusOutputs>,
    inputs: InputDecoder<BusInputs>,
}

impl BusInterface {
    /// Assembles the port from its chains.
    pub const fn new(outputs: OutputEncoder<BusOutputs>, inputs: InputDecoder<BusInputs>) -> Self {
        Self { outputs, inputs }
    }

    /// Encoder of the bus driving chain.
    pub const fn outputs(&self) -> &OutputEncoder<BusOutputs> {
        &self.outputs
    }

    /// Decoder of the bus sampling chain.
    pub const fn inputs(&self) -> &InputDecoder<BusInputs> {
        &self.inputs
    }

    /// Sets pin directions and idle levels of both bus chains.
    pub fn initialize_hardware<P: PinDriver + ?Sized>(&self, pins: &mut P) {
        self.inputs.initialize_hardware(pins);
        self.outputs.initialize_hardware(pins);
        info!(fixture = "bus", "hardware initialized");
    }

    /// Drives the bus.
    pub fn set<P: PinDriver + ?Sized>(&self, pins: &mut P, state: &BusOutputs) {
        self.outputs.push(pins, state);
    }

    /// Samples the bus.
    pub fn read<P: PinDriver + ?Sized>(&self, pins: &mut P) -> BusInputs {
        self.inputs.read(pins)
    }
}

/// Builds the Memory board's bus port from configuration.
pub fn interface(config: &Config) -> Result<BusInterface, ConfigError> {
    let outputs = resolve_layout(config, "bus.outputs", output_slots, OUTPUT_BITS)?;
    let inputs = resolve_layout(config, "bus.inputs", input_slots, INPUT_BITS)?;
    Ok(BusInterface::new(
        OutputEncoder::new(config.pins.bus_output, outputs),
        InputDecoder::new(config.pins.bus_input, inputs, config.timing.sample_edge),
    ))
}

/// Everything the fixture drives onto the bus.
///
/// Idle: strobes released and every buffer disabled, so the module under test owns the bus.
/// Setting a value does not put it on the bus; the matching `assert_*_lines` call enables the
/// buffers that drive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusOutputs {
    mem_load: u32,
    mem_store: u32,
    bank: u32,
    addr: u32,
    io: u32,
    oe: u32,
}

impl Default for BusOutputs {
    fn default() -> Self {
        Self {
            mem_load: 1,
            mem_store: 1,
            bank: 0,
            addr: 0,
            io: 0,
            oe: BUS_OE_RELEASED,
        }
    }
}

impl BusOutputs {
    /// Returns the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drives the store strobe. The line is active-low.
    #[must_use]
    pub const fn mem_store(self, is_active: bool) -> Self {
        Self {
            mem_store: !is_active as u32,
            ..self
        }
    }

    /// Drives the load strobe. The line is active-low.
    #[must_use]
    pub const fn mem_load(self, is_active: bool) -> Self {
        Self {
            mem_load: !is_active as u32,
            ..self
        }
    }

    /// Sets the memory bank.
    #[must_use]
    pub const fn bank(self, value: u32) -> Self {
        Self { bank: value, ..self }
    }

    /// Sets the address.
    #[must_use]
    pub const fn addr(self, value: u32) -> Self {
        Self { addr: value, ..self }
    }

    /// Sets the data word.
    #[must_use]
    pub const fn data(self, value: u32) -> Self {
        Self { io: value, ..self }
    }

    /// Enables the load/store strobe buffers.
    #[must_use]
    pub const fn assert_mem_load_store_lines(self) -> Self {
        Self {
            oe: self.oe & OE_MEM_LOAD_STORE,
            ..self
        }
    }

    /// Enables the bank buffers.
    #[must_use]
    pub const fn assert_bank_lines(self) -> Self {
        Self {
            oe: self.oe & OE_BANK,
            ..self
        }
    }

    /// Enables the address buffers.
    #[must_use]
    pub const fn assert_addr_lines(self) -> Self {
        Self {
            oe: self.oe & OE_ADDR,
            ..self
        }
    }

    /// Enables the data buffers.
    #[must_use]
    pub const fn assert_data_lines(self) -> Self {
        Self {
            oe: self.oe & OE_DATA,
            ..self
        }
    }

    /// Disables every buffer, handing the bus back to the module under test.
    #[must_use]
    pub const fn release_bus_lines(self) -> Self {
        Self {
            oe: BUS_OE_RELEASED,
            ..self
        }
    }

    /// Current output-enable mask (a cleared bit is an enabled buffer group).
    pub const fn output_enables(&self) -> u32 {
        self.oe
    }
}

impl OutputState for BusOutputs {
    type Signal = BusOutputSignal;

    fn signal(&self, signal: BusOutputSignal) -> u32 {
        match signal {
            BusOutputSignal::Oe => self.oe,
            BusOutputSignal::MemStore => self.mem_store,
            BusOutputSignal::MemLoad => self.mem_load,
            BusOutputSignal::Bank => self.bank,
            BusOutputSignal::Addr => self.addr,
            BusOutputSignal::Io => self.io,
        }
    }

    fn with_signal(&self, signal: BusOutputSignal, value: u32) -> Self {
        let mut next = *self;
        match signal {
            BusOutputSignal::Oe => next.oe = value,
            BusOutputSignal::MemStore => next.mem_store = value,
            BusOutputSignal::MemLoad => next.mem_load = value,
            BusOutputSignal::Bank => next.bank = value,
            BusOutputSignal::Addr => next.addr = value,
            BusOutputSignal::Io => next.io = value,
        }
        next
    }
}

/// Bus lines captured at one sampling instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BusInputs {
    /// Load strobe line level.
    pub mem_load: u32,
    /// Store strobe line level.
    pub mem_store: u32,
    /// Memory bank.
    pub bank: u32,
    /// Address bus.
    pub addr: u32,
    /// Data bus.
    pub io: u32,
}

impl BusInputs {
    /// Returns `true` when the load strobe is asserted.
    pub const fn is_loading(&self) -> bool {
        self.mem_load & 1 == 0
    }

    /// Returns `true` when the store strobe is asserted.
    pub const fn is_storing(&self) -> bool {
        self.mem_store & 1 == 0
    }
}

impl InputSnapshot for BusInputs {
    type Signal = BusInputSignal;

    fn from_values(values: &FieldValues<BusInputSignal>) -> Self {
        Self {
            mem_load: values.get(BusInputSignal::MemLoad),
            mem_store: values.get(BusInputSignal::MemStore),
            bank: values.get(BusInputSignal::Bank),
            addr: values.get(BusInputSignal::Addr),
            io: values.get(BusInputSignal::Io),
        }
    }
}
