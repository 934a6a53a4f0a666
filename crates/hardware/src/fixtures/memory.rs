//! Memory module fixture.
//!
//! The Memory board drives the MEM stage and samples what it hands to write-back and to the
//! instruction fetch. The board also carries the status LEDs on its driving chain and a second
//! pair of chains for the memory bus (see `fixtures::bus`).
//!
//! # Driving chain (Rev A, 72 bits)
//!
//! `LED[7:0]`, `SelC_MEM[2:0]`, `RST`, `RDY`, `Phi1`, `Phi2`, `Flush_IF`, one unused bit,
//! `Ctl_MEM[20:14]`, `StoreOp_MEM[15:0]`, `Y_MEM[15:0]`, `PC_MEM[15:0]`
//!
//! # Sampling chain (Rev A, 56 bits)
//!
//! one unused bit, `SelC_WB[2:0]`, `Ctl_WB[3:0]`, `StoreOp_WB[15:0]`, `Ins_IF[15:0]`,
//! `Y_WB[15:0]`
//!
//! `RST`, `RDY` and `Flush_IF` are active-low.

use serde::Deserialize;

use crate::clock::{ClockDiscipline, ClockPhase, ClockSequencer, Clocked};
use crate::codec::{InputDecoder, InputSnapshot, OutputEncoder, OutputState};
use crate::common::ConfigError;
use crate::common::constants::CTL_MEM_IDLE;
use crate::config::Config;
use crate::indicator::HasLeds;
use crate::layout::{FieldValues, Signal, Slot};

use super::{TestFixture, resolve_layout};

/// Bits in the driving chain.
pub const OUTPUT_BITS: usize = 72;
/// Bits in the sampling chain.
pub const INPUT_BITS: usize = 56;

/// The Memory board.
pub type MemoryFixture = TestFixture<MemoryOutputs, MemoryInputs>;

/// Signals driven into the memory module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryOutputSignal {
    /// Status LEDs on the board.
    Led,
    /// Write-back register select.
    SelCMem,
    /// Reset (active-low).
    Rst,
    /// Memory ready (active-low).
    Rdy,
    /// Clock phase 1.
    Phi1,
    /// Clock phase 2.
    Phi2,
    /// Instruction fetch flush (active-low).
    FlushIf,
    /// Bits 20..14 of the MEM-stage control word.
    CtlMem,
    /// Store operand.
    StoreOpMem,
    /// ALU result.
    YMem,
    /// Program counter of the instruction in MEM.
    PcMem,
}

impl Signal for MemoryOutputSignal {
    const ALL: &'static [Self] = &[
        Self::Led,
        Self::SelCMem,
        Self::Rst,
        Self::Rdy,
        Self::Phi1,
        Self::Phi2,
        Self::FlushIf,
        Self::CtlMem,
        Self::StoreOpMem,
        Self::YMem,
        Self::PcMem,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Led => "LED",
            Self::SelCMem => "SelC_MEM",
            Self::Rst => "RST",
            Self::Rdy => "RDY",
            Self::Phi1 => "Phi1",
            Self::Phi2 => "Phi2",
            Self::FlushIf => "Flush_IF",
            Self::CtlMem => "Ctl_MEM",
            Self::StoreOpMem => "StoreOp_MEM",
            Self::YMem => "Y_MEM",
            Self::PcMem => "PC_MEM",
        }
    }
}

/// Rev A wire order of the driving chain.
pub fn output_slots() -> Vec<Slot<MemoryOutputSignal>> {
    use MemoryOutputSignal as S;
    vec![
        Slot::msb(S::Led, 8),
        Slot::msb(S::SelCMem, 3),
        Slot::bit(S::Rst),
        Slot::bit(S::Rdy),
        Slot::bit(S::Phi1),
        Slot::bit(S::Phi2),
        Slot::bit(S::FlushIf),
        Slot::reserved(1),
        Slot::msb(S::CtlMem, 7),
        Slot::msb(S::StoreOpMem, 16),
        Slot::msb(S::YMem, 16),
        Slot::msb(S::PcMem, 16),
    ]
}

/// Signals sampled from the memory module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryInputSignal {
    /// Write-back register select.
    SelCWb,
    /// Write-back control bits.
    CtlWb,
    /// Store operand passed to write-back.
    StoreOpWb,
    /// Fetched instruction.
    InsIf,
    /// Result passed to write-back.
    YWb,
}

impl Signal for MemoryInputSignal {
    const ALL: &'static [Self] = &[
        Self::SelCWb,
        Self::CtlWb,
        Self::StoreOpWb,
        Self::InsIf,
        Self::YWb,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::SelCWb => "SelC_WB",
            Self::CtlWb => "Ctl_WB",
            Self::StoreOpWb => "StoreOp_WB",
            Self::InsIf => "Ins_IF",
            Self::YWb => "Y_WB",
        }
    }
}

/// Rev A wire order of the sampling chain.
pub fn input_slots() -> Vec<Slot<MemoryInputSignal>> {
    use MemoryInputSignal as S;
    vec![
        Slot::reserved(1),
        Slot::msb(S::SelCWb, 3),
        Slot::msb(S::CtlWb, 4),
        Slot::msb(S::StoreOpWb, 16),
        Slot::msb(S::InsIf, 16),
        Slot::msb(S::YWb, 16),
    ]
}

/// Builds the Memory board from configuration.
///
/// The bus port of the board is built separately by `fixtures::bus::interface`.
pub fn fixture(config: &Config) -> Result<MemoryFixture, ConfigError> {
    let outputs = resolve_layout(config, "memory.outputs", output_slots, OUTPUT_BITS)?;
    let inputs = resolve_layout(config, "memory.inputs", input_slots, INPUT_BITS)?;
    Ok(TestFixture::new(
        "memory",
        OutputEncoder::new(config.pins.output, outputs),
        InputDecoder::new(config.pins.input, inputs, config.timing.sample_edge),
        ClockSequencer::new(ClockDiscipline::TwoPhase),
    ))
}

/// Everything the Memory board drives, at line level.
///
/// Idle: LEDs off, reset asserted, memory not ready, clock in the idle phase (phi2 high),
/// flush released, and a no-op control word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryOutputs {
    led: u32,
    sel_c: u32,
    rst: u32,
    rdy: u32,
    phi1: u32,
    phi2: u32,
    flush_if: u32,
    ctl: u32,
    store_op: u32,
    y: u32,
    pc: u32,
}

impl Default for MemoryOutputs {
    fn default() -> Self {
        Self {
            led: 0,
            sel_c: 0,
            rst: 0,
            rdy: 1,
            phi1: 0,
            phi2: 1,
            flush_if: 1,
            ctl: CTL_MEM_IDLE,
            store_op: 0,
            y: 0,
            pc: 0,
        }
    }
}

impl MemoryOutputs {
    /// Returns the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lights the board LEDs, bit 7 on the leftmost LED.
    #[must_use]
    pub fn led(self, pattern: u8) -> Self {
        Self {
            led: u32::from(pattern),
            ..self
        }
    }

    /// Sets the write-back register select.
    #[must_use]
    pub const fn sel_c(self, index: u32) -> Self {
        Self {
            sel_c: index,
            ..self
        }
    }

    /// Asserts or releases reset. The line is active-low.
    #[must_use]
    pub const fn reset(self, is_active: bool) -> Self {
        Self {
            rst: !is_active as u32,
            ..self
        }
    }

    /// Signals that memory is ready. The line is active-low.
    #[must_use]
    pub const fn ready(self, is_ready: bool) -> Self {
        Self {
            rdy: !is_ready as u32,
            ..self
        }
    }

    /// Drives clock phase 1.
    #[must_use]
    pub const fn phi1(self, level: bool) -> Self {
        Self {
            phi1: level as u32,
            ..self
        }
    }

    /// Drives clock phase 2.
    #[must_use]
    pub const fn phi2(self, level: bool) -> Self {
        Self {
            phi2: level as u32,
            ..self
        }
    }

    /// Requests an instruction fetch flush. The line is active-low.
    #[must_use]
    pub const fn flush(self, is_active: bool) -> Self {
        Self {
            flush_if: !is_active as u32,
            ..self
        }
    }

    /// Sets bits 20..14 of the control word.
    #[must_use]
    pub const fn ctl(self, value: u32) -> Self {
        Self { ctl: value, ..self }
    }

    /// Sets the store operand.
    #[must_use]
    pub const fn store_op(self, value: u32) -> Self {
        Self {
            store_op: value,
            ..self
        }
    }

    /// Sets the ALU result.
    #[must_use]
    pub const fn y(self, value: u32) -> Self {
        Self { y: value, ..self }
    }

    /// Sets the program counter.
    #[must_use]
    pub const fn pc(self, value: u32) -> Self {
        Self { pc: value, ..self }
    }

    /// Returns `true` while reset is asserted.
    pub const fn is_resetting(&self) -> bool {
        self.rst & 1 == 0
    }
}

impl OutputState for MemoryOutputs {
    type Signal = MemoryOutputSignal;

    fn signal(&self, signal: MemoryOutputSignal) -> u32 {
        match signal {
            MemoryOutputSignal::Led => self.led,
            MemoryOutputSignal::SelCMem => self.sel_c,
            MemoryOutputSignal::Rst => self.rst,
            MemoryOutputSignal::Rdy => self.rdy,
            MemoryOutputSignal::Phi1 => self.phi1,
            MemoryOutputSignal::Phi2 => self.phi2,
            MemoryOutputSignal::FlushIf => self.flush_if,
            MemoryOutputSignal::CtlMem => self.ctl,
            MemoryOutputSignal::StoreOpMem => self.store_op,
            MemoryOutputSignal::YMem => self.y,
            MemoryOutputSignal::PcMem => self.pc,
        }
    }

    fn with_signal(&self, signal: MemoryOutputSignal, value: u32) -> Self {
        let mut next = *self;
        match signal {
            MemoryOutputSignal::Led => next.led = value,
            MemoryOutputSignal::SelCMem => next.sel_c = value,
            MemoryOutputSignal::Rst => next.rst = value,
            MemoryOutputSignal::Rdy => next.rdy = value,
            MemoryOutputSignal::Phi1 => next.phi1 = value,
            MemoryOutputSignal::Phi2 => next.phi2 = value,
            MemoryOutputSignal::FlushIf => next.flush_if = value,
            MemoryOutputSignal::CtlMem => next.ctl = value,
            MemoryOutputSignal::StoreOpMem => next.store_op = value,
            MemoryOutputSignal::YMem => next.y = value,
            MemoryOutputSignal::PcMem => next.pc = value,
        }
        next
    }
}

impl Clocked for MemoryOutputs {
    fn tick(&self, level: bool) -> Self {
        self.phi1(level).phi2(level)
    }

    fn with_phase(&self, phase: ClockPhase) -> Self {
        let (phi1, phi2) = phase.levels();
        self.phi1(phi1).phi2(phi2)
    }
}

impl HasLeds for MemoryOutputs {
    fn with_leds(&self, pattern: u8) -> Self {
        self.led(pattern)
    }
}

/// Memory module outputs captured at one sampling instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryInputs {
    /// Write-back register select.
    pub sel_c_wb: u32,
    /// Write-back control bits.
    pub ctl_wb: u32,
    /// Store operand.
    pub store_op_wb: u32,
    /// Fetched instruction.
    pub ins_if: u32,
    /// Write-back result.
    pub y_wb: u32,
}

impl InputSnapshot for MemoryInputs {
    type Signal = MemoryInputSignal;

    fn from_values(values: &FieldValues<MemoryInputSignal>) -> Self {
        Self {
            sel_c_wb: values.get(MemoryInputSignal::SelCWb),
            ctl_wb: values.get(MemoryInputSignal::CtlWb),
            store_op_wb: values.get(MemoryInputSignal::StoreOpWb),
            ins_if: values.get(MemoryInputSignal::InsIf),
            y_wb: values.get(MemoryInputSignal::YWb),
        }
    }
}
