//! Control module fixture.
//!
//! The Control board drives the ID-stage inputs of the control module (instruction word,
//! the MEM-stage write-back selector and control bits, condition flags, clock, reset) and
//! samples its outputs (EX-stage control word and instruction bits, stall, and the six
//! operand-forwarding selects).
//!
//! # Driving chain (Rev A, 33 bits, first bit shifted first)
//!
//! `RST`, `Phi2`, `Phi1`, `n`, `v`, `z`, `c`, `Ins_ID[15:0]`, `Ctl_MEM[20:14]`, `SelC_MEM[2:0]`
//!
//! # Sampling chain (Rev A, 40 bits)
//!
//! one unused bit, `fwd_mem_to_b`, `fwd_ex_to_b`, `fwd_b`, `fwd_mem_to_a`, `fwd_ex_to_a`,
//! `fwd_a`, `stall`, `Ctl_EX[20:0]`, `Ins_EX[10:0]`

use serde::Deserialize;

use crate::clock::{ClockDiscipline, ClockPhase, ClockSequencer, Clocked};
use crate::codec::{InputDecoder, InputSnapshot, OutputEncoder, OutputState};
use crate::common::ConfigError;
use crate::common::constants::CTL_MEM_IDLE;
use crate::config::Config;
use crate::layout::{FieldValues, Signal, Slot};

use super::{TestFixture, resolve_layout};

/// Bits in the driving chain.
pub const OUTPUT_BITS: usize = 33;
/// Bits in the sampling chain.
pub const INPUT_BITS: usize = 40;

/// The Control board.
pub type ControlFixture = TestFixture<ControlOutputs, ControlInputs>;

/// Signals driven into the control module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlOutputSignal {
    /// Active-low reset.
    Rst,
    /// Clock phase 2.
    Phi2,
    /// Clock phase 1.
    Phi1,
    /// Negative flag.
    N,
    /// Overflow flag.
    V,
    /// Zero flag.
    Z,
    /// Carry flag.
    C,
    /// Instruction word in the ID stage.
    InsId,
    /// Bits 20..14 of the MEM-stage control word.
    CtlMem,
    /// Write-back register select in the MEM stage.
    SelCMem,
}

impl Signal for ControlOutputSignal {
    const ALL: &'static [Self] = &[
        Self::Rst,
        Self::Phi2,
        Self::Phi1,
        Self::N,
        Self::V,
        Self::Z,
        Self::C,
        Self::InsId,
        Self::CtlMem,
        Self::SelCMem,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Rst => "RST",
            Self::Phi2 => "Phi2",
            Self::Phi1 => "Phi1",
            Self::N => "n",
            Self::V => "v",
            Self::Z => "z",
            Self::C => "c",
            Self::InsId => "Ins_ID",
            Self::CtlMem => "Ctl_MEM",
            Self::SelCMem => "SelC_MEM",
        }
    }
}

/// Rev A wire order of the driving chain.
pub fn output_slots() -> Vec<Slot<ControlOutputSignal>> {
    use ControlOutputSignal as S;
    vec![
        Slot::bit(S::Rst),
        Slot::bit(S::Phi2),
        Slot::bit(S::Phi1),
        Slot::bit(S::N),
        Slot::bit(S::V),
        Slot::bit(S::Z),
        Slot::bit(S::C),
        Slot::msb(S::InsId, 16),
        Slot::msb(S::CtlMem, 7),
        Slot::msb(S::SelCMem, 3),
    ]
}

/// Signals sampled from the control module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlInputSignal {
    /// Pipeline stall request.
    Stall,
    /// Forward into operand A.
    FwdA,
    /// Forward the EX result into operand A.
    FwdExToA,
    /// Forward the MEM result into operand A.
    FwdMemToA,
    /// Forward into operand B.
    FwdB,
    /// Forward the EX result into operand B.
    FwdExToB,
    /// Forward the MEM result into operand B.
    FwdMemToB,
    /// Full EX-stage control word.
    CtlEx,
    /// Low eleven bits of the EX-stage instruction.
    InsEx,
}

impl Signal for ControlInputSignal {
    const ALL: &'static [Self] = &[
        Self::Stall,
        Self::FwdA,
        Self::FwdExToA,
        Self::FwdMemToA,
        Self::FwdB,
        Self::FwdExToB,
        Self::FwdMemToB,
        Self::CtlEx,
        Self::InsEx,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Stall => "stall",
            Self::FwdA => "fwd_a",
            Self::FwdExToA => "fwd_ex_to_a",
            Self::FwdMemToA => "fwd_mem_to_a",
            Self::FwdB => "fwd_b",
            Self::FwdExToB => "fwd_ex_to_b",
            Self::FwdMemToB => "fwd_mem_to_b",
            Self::CtlEx => "Ctl_EX",
            Self::InsEx => "Ins_EX",
        }
    }
}

/// Rev A wire order of the sampling chain.
pub fn input_slots() -> Vec<Slot<ControlInputSignal>> {
    use ControlInputSignal as S;
    vec![
        Slot::reserved(1),
        Slot::bit(S::FwdMemToB),
        Slot::bit(S::FwdExToB),
        Slot::bit(S::FwdB),
        Slot::bit(S::FwdMemToA),
        Slot::bit(S::FwdExToA),
        Slot::bit(S::FwdA),
        Slot::bit(S::Stall),
        Slot::msb(S::CtlEx, 21),
        Slot::msb(S::InsEx, 11),
    ]
}

/// Builds the Control board from configuration.
pub fn fixture(config: &Config) -> Result<ControlFixture, ConfigError> {
    let outputs = resolve_layout(config, "control.outputs", output_slots, OUTPUT_BITS)?;
    let inputs = resolve_layout(config, "control.inputs", input_slots, INPUT_BITS)?;
    Ok(TestFixture::new(
        "control",
        OutputEncoder::new(config.pins.output, outputs),
        InputDecoder::new(config.pins.input, inputs, config.timing.sample_edge),
        ClockSequencer::new(ClockDiscipline::SinglePhase),
    ))
}

/// Everything the Control board drives, at line level.
///
/// The default value is the idle state: no-op control bits, flags clear, clocks low, and
/// reset released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlOutputs {
    sel_c: u32,
    ctl: u32,
    ins: u32,
    c: u32,
    z: u32,
    v: u32,
    n: u32,
    phi1: u32,
    phi2: u32,
    rst: u32,
}

impl Default for ControlOutputs {
    fn default() -> Self {
        Self {
            sel_c: 0,
            ctl: CTL_MEM_IDLE,
            ins: 0,
            c: 0,
            z: 0,
            v: 0,
            n: 0,
            phi1: 0,
            phi2: 0,
            rst: 1,
        }
    }
}

impl ControlOutputs {
    /// Returns the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the MEM-stage write-back register select.
    #[must_use]
    pub const fn sel_c(self, index: u32) -> Self {
        Self {
            sel_c: index,
            ..self
        }
    }

    /// Sets bits 20..14 of the MEM-stage control word.
    #[must_use]
    pub const fn ctl(self, value: u32) -> Self {
        Self { ctl: value, ..self }
    }

    /// Sets the ID-stage instruction word.
    #[must_use]
    pub const fn ins(self, value: u32) -> Self {
        Self { ins: value, ..self }
    }

    /// Sets the carry flag.
    #[must_use]
    pub const fn carry(self, is_active: bool) -> Self {
        Self {
            c: is_active as u32,
            ..self
        }
    }

    /// Sets the zero flag.
    #[must_use]
    pub const fn zero(self, is_active: bool) -> Self {
        Self {
            z: is_active as u32,
            ..self
        }
    }

    /// Sets the overflow flag.
    #[must_use]
    pub const fn overflow(self, is_active: bool) -> Self {
        Self {
            v: is_active as u32,
            ..self
        }
    }

    /// Sets the negative flag.
    #[must_use]
    pub const fn negative(self, is_active: bool) -> Self {
        Self {
            n: is_active as u32,
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

    /// Asserts or releases reset. The line is active-low.
    #[must_use]
    pub const fn reset(self, is_active: bool) -> Self {
        Self {
            rst: !is_active as u32,
            ..self
        }
    }

    /// Returns `true` while reset is asserted.
    pub const fn is_resetting(&self) -> bool {
        self.rst & 1 == 0
    }
}

impl OutputState for ControlOutputs {
    type Signal = ControlOutputSignal;

    fn signal(&self, signal: ControlOutputSignal) -> u32 {
        match signal {
            ControlOutputSignal::Rst => self.rst,
            ControlOutputSignal::Phi2 => self.phi2,
            ControlOutputSignal::Phi1 => self.phi1,
            ControlOutputSignal::N => self.n,
            ControlOutputSignal::V => self.v,
            ControlOutputSignal::Z => self.z,
            ControlOutputSignal::C => self.c,
            ControlOutputSignal::InsId => self.ins,
            ControlOutputSignal::CtlMem => self.ctl,
            ControlOutputSignal::SelCMem => self.sel_c,
        }
    }

    fn with_signal(&self, signal: ControlOutputSignal, value: u32) -> Self {
        let mut next = *self;
        match signal {
            ControlOutputSignal::Rst => next.rst = value,
            ControlOutputSignal::Phi2 => next.phi2 = value,
            ControlOutputSignal::Phi1 => next.phi1 = value,
            ControlOutputSignal::N => next.n = value,
            ControlOutputSignal::V => next.v = value,
            ControlOutputSignal::Z => next.z = value,
            ControlOutputSignal::C => next.c = value,
            ControlOutputSignal::InsId => next.ins = value,
            ControlOutputSignal::CtlMem => next.ctl = value,
            ControlOutputSignal::SelCMem => next.sel_c = value,
        }
        next
    }
}

impl Clocked for ControlOutputs {
    fn tick(&self, level: bool) -> Self {
        self.phi1(level).phi2(level)
    }

    fn with_phase(&self, phase: ClockPhase) -> Self {
        let (phi1, phi2) = phase.levels();
        self.phi1(phi1).phi2(phi2)
    }
}

/// Control module outputs captured at one sampling instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlInputs {
    /// Low eleven bits of the EX-stage instruction.
    pub ins_ex: u32,
    /// EX-stage control word.
    pub ctl_ex: u32,
    /// Stall request.
    pub stall: u32,
    /// Forward into operand A.
    pub fwd_a: u32,
    /// Forward the EX result into operand A.
    pub fwd_ex_to_a: u32,
    /// Forward the MEM result into operand A.
    pub fwd_mem_to_a: u32,
    /// Forward into operand B.
    pub fwd_b: u32,
    /// Forward the EX result into operand B.
    pub fwd_ex_to_b: u32,
    /// Forward the MEM result into operand B.
    pub fwd_mem_to_b: u32,
}

impl InputSnapshot for ControlInputs {
    type Signal = ControlInputSignal;

    fn from_values(values: &FieldValues<ControlInputSignal>) -> Self {
        Self {
            ins_ex: values.get(ControlInputSignal::InsEx),
            ctl_ex: values.get(ControlInputSignal::CtlEx),
            stall: values.get(ControlInputSignal::Stall),
            fwd_a: values.get(ControlInputSignal::FwdA),
            fwd_ex_to_a: values.get(ControlInputSignal::FwdExToA),
            fwd_mem_to_a: values.get(ControlInputSignal::FwdMemToA),
            fwd_b: values.get(ControlInputSignal::FwdB),
            fwd_ex_to_b: values.get(ControlInputSignal::FwdExToB),
            fwd_mem_to_b: values.get(ControlInputSignal::FwdMemToB),
        }
    }
}
