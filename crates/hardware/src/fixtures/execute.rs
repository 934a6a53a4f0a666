//! Execute module fixture.
//!
//! The Execute board drives the ALU stage (operands, PC, instruction bits, control word, and
//! the phi1 clock) and samples what the stage hands to MEM: result, store operand, flags,
//! control bits, and write-back select.
//!
//! # Driving chain (Rev A, 81 bits)
//!
//! `Phi1`, `PC_EX[15:0]`, `B[15:0]`, `A[15:0]`, `Ins_EX[10:0]`, `Ctl_EX[20:0]`
//!
//! # Sampling chain (Rev A, 64 bits)
//!
//! two unused bits, `SelC_MEM[2:0]`, `N`, `V`, `Z`, `C`, `Ctl_MEM[20:14]`,
//! `StoreOp_MEM[15:0]`, `Y_MEM[15:0]`, `Y_EX[15:0]`
//!
//! Only phi1 is wired on this board, so the two-phase cycle shows up as phi1 = 0, 1, 0.

use serde::Deserialize;

use crate::clock::{ClockDiscipline, ClockPhase, ClockSequencer, Clocked};
use crate::codec::{InputDecoder, InputSnapshot, OutputEncoder, OutputState};
use crate::common::ConfigError;
use crate::common::constants::CTL_EX_IDLE;
use crate::config::Config;
use crate::layout::{FieldValues, Signal, Slot};

use super::{TestFixture, resolve_layout};

/// Bits in the driving chain.
pub const OUTPUT_BITS: usize = 81;
/// Bits in the sampling chain.
pub const INPUT_BITS: usize = 64;

/// The Execute board.
pub type ExecuteFixture = TestFixture<ExecuteOutputs, ExecuteInputs>;

/// Signals driven into the execute module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteOutputSignal {
    /// Clock phase 1.
    Phi1,
    /// Program counter of the instruction in EX.
    PcEx,
    /// Operand B.
    B,
    /// Operand A.
    A,
    /// Low eleven bits of the instruction in EX.
    InsEx,
    /// EX-stage control word.
    CtlEx,
}

impl Signal for ExecuteOutputSignal {
    const ALL: &'static [Self] = &[
        Self::Phi1,
        Self::PcEx,
        Self::B,
        Self::A,
        Self::InsEx,
        Self::CtlEx,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Phi1 => "Phi1",
            Self::PcEx => "PC_EX",
            Self::B => "B",
            Self::A => "A",
            Self::InsEx => "Ins_EX",
            Self::CtlEx => "Ctl_EX",
        }
    }
}

/// Rev A wire order of the driving chain.
pub fn output_slots() -> Vec<Slot<ExecuteOutputSignal>> {
    use ExecuteOutputSignal as S;
    vec![
        Slot::bit(S::Phi1),
        Slot::msb(S::PcEx, 16),
        Slot::msb(S::B, 16),
        Slot::msb(S::A, 16),
        Slot::msb(S::InsEx, 11),
        Slot::msb(S::CtlEx, 21),
    ]
}

/// Signals sampled from the execute module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteInputSignal {
    /// Write-back register select passed to MEM.
    SelCMem,
    /// Negative flag.
    N,
    /// Overflow flag.
    V,
    /// Zero flag.
    Z,
    /// Carry flag.
    C,
    /// Bits 20..14 of the control word passed to MEM.
    CtlMem,
    /// Store operand passed to MEM.
    StoreOpMem,
    /// ALU result latched for MEM.
    YMem,
    /// Combinational ALU result.
    YEx,
}

impl Signal for ExecuteInputSignal {
    const ALL: &'static [Self] = &[
        Self::SelCMem,
        Self::N,
        Self::V,
        Self::Z,
        Self::C,
        Self::CtlMem,
        Self::StoreOpMem,
        Self::YMem,
        Self::YEx,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::SelCMem => "SelC_MEM",
            Self::N => "N",
            Self::V => "V",
            Self::Z => "Z",
            Self::C => "C",
            Self::CtlMem => "Ctl_MEM",
            Self::StoreOpMem => "StoreOp_MEM",
            Self::YMem => "Y_MEM",
            Self::YEx => "Y_EX",
        }
    }
}

/// Rev A wire order of the sampling chain.
pub fn input_slots() -> Vec<Slot<ExecuteInputSignal>> {
    use ExecuteInputSignal as S;
    vec![
        Slot::reserved(2),
        Slot::msb(S::SelCMem, 3),
        Slot::bit(S::N),
        Slot::bit(S::V),
        Slot::bit(S::Z),
        Slot::bit(S::C),
        Slot::msb(S::CtlMem, 7),
        Slot::msb(S::StoreOpMem, 16),
        Slot::msb(S::YMem, 16),
        Slot::msb(S::YEx, 16),
    ]
}

/// Builds the Execute board from configuration.
pub fn fixture(config: &Config) -> Result<ExecuteFixture, ConfigError> {
    let outputs = resolve_layout(config, "execute.outputs", output_slots, OUTPUT_BITS)?;
    let inputs = resolve_layout(config, "execute.inputs", input_slots, INPUT_BITS)?;
    Ok(TestFixture::new(
        "execute",
        OutputEncoder::new(config.pins.output, outputs),
        InputDecoder::new(config.pins.input, inputs, config.timing.sample_edge),
        ClockSequencer::new(ClockDiscipline::TwoPhase),
    ))
}

/// Everything the Execute board drives.
///
/// Idle: clock low, operands and PC zero, control word all ones (no operation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOutputs {
    phi1: u32,
    pc: u32,
    b: u32,
    a: u32,
    ins: u32,
    ctl: u32,
}

impl Default for ExecuteOutputs {
    fn default() -> Self {
        Self {
            phi1: 0,
            pc: 0,
            b: 0,
            a: 0,
            ins: 0,
            ctl: CTL_EX_IDLE,
        }
    }
}

impl ExecuteOutputs {
    /// Returns the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drives clock phase 1.
    #[must_use]
    pub const fn phi1(self, level: bool) -> Self {
        Self {
            phi1: level as u32,
            ..self
        }
    }

    /// Sets the program counter.
    #[must_use]
    pub const fn pc(self, value: u32) -> Self {
        Self { pc: value, ..self }
    }

    /// Sets operand B.
    #[must_use]
    pub const fn b(self, value: u32) -> Self {
        Self { b: value, ..self }
    }

    /// Sets operand A.
    #[must_use]
    pub const fn a(self, value: u32) -> Self {
        Self { a: value, ..self }
    }

    /// Sets the instruction bits.
    #[must_use]
    pub const fn ins(self, value: u32) -> Self {
        Self { ins: value, ..self }
    }

    /// Sets the control word.
    #[must_use]
    pub const fn ctl(self, value: u32) -> Self {
        Self { ctl: value, ..self }
    }
}

impl OutputState for ExecuteOutputs {
    type Signal = ExecuteOutputSignal;

    fn signal(&self, signal: ExecuteOutputSignal) -> u32 {
        match signal {
            ExecuteOutputSignal::Phi1 => self.phi1,
            ExecuteOutputSignal::PcEx => self.pc,
            ExecuteOutputSignal::B => self.b,
            ExecuteOutputSignal::A => self.a,
            ExecuteOutputSignal::InsEx => self.ins,
            ExecuteOutputSignal::CtlEx => self.ctl,
        }
    }

    fn with_signal(&self, signal: ExecuteOutputSignal, value: u32) -> Self {
        let mut next = *self;
        match signal {
            ExecuteOutputSignal::Phi1 => next.phi1 = value,
            ExecuteOutputSignal::PcEx => next.pc = value,
            ExecuteOutputSignal::B => next.b = value,
            ExecuteOutputSignal::A => next.a = value,
            ExecuteOutputSignal::InsEx => next.ins = value,
            ExecuteOutputSignal::CtlEx => next.ctl = value,
        }
        next
    }
}

impl Clocked for ExecuteOutputs {
    fn tick(&self, level: bool) -> Self {
        self.phi1(level)
    }

    fn with_phase(&self, phase: ClockPhase) -> Self {
        self.phi1(phase.levels().0)
    }
}

/// Execute module outputs captured at one sampling instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecuteInputs {
    /// Write-back register select.
    pub sel_c_mem: u32,
    /// Negative flag.
    pub n: u32,
    /// Overflow flag.
    pub v: u32,
    /// Zero flag.
    pub z: u32,
    /// Carry flag.
    pub c: u32,
    /// Bits 20..14 of the control word.
    pub ctl_mem: u32,
    /// Store operand.
    pub store_op_mem: u32,
    /// Latched ALU result.
    pub y_mem: u32,
    /// Combinational ALU result.
    pub y_ex: u32,
}

impl InputSnapshot for ExecuteInputs {
    type Signal = ExecuteInputSignal;

    fn from_values(values: &FieldValues<ExecuteInputSignal>) -> Self {
        Self {
            sel_c_mem: values.get(ExecuteInputSignal::SelCMem),
            n: values.get(ExecuteInputSignal::N),
            v: values.get(ExecuteInputSignal::V),
            z: values.get(ExecuteInputSignal::Z),
            c: values.get(ExecuteInputSignal::C),
            ctl_mem: values.get(ExecuteInputSignal::CtlMem),
            store_op_mem: values.get(ExecuteInputSignal::StoreOpMem),
            y_mem: values.get(ExecuteInputSignal::YMem),
            y_ex: values.get(ExecuteInputSignal::YEx),
        }
    }
}
