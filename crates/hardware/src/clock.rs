//! Clock sequencing.
//!
//! Pulses a module's clock input(s) through one full cycle by pushing a short, fixed series of
//! output states. Everything except the clock lines is left as the caller built it, and the
//! last pushed state is returned so a test can keep composing from it.
//!
//! Two disciplines exist on the fixtures:
//! 1. **Single-phase:** every clock line high, then every clock line low (two pushes).
//! 2. **Two-phase:** non-overlapping phi1/phi2 as (0,1), (1,0), (0,1) (three pushes). The
//!    two phases are never high together and the cycle starts and ends in the idle phase.

use tracing::debug;

use crate::codec::{OutputEncoder, OutputState};
use crate::io::PinDriver;

/// Levels of the phi1/phi2 pair during a clock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPhase {
    /// Between cycles: phi1 low, phi2 high.
    Idle,
    /// phi1 high, phi2 low.
    Phase1Active,
    /// phi1 low, phi2 high.
    Phase2Active,
    /// Both phases low.
    BothLow,
}

impl ClockPhase {
    /// Phases pushed by one two-phase cycle, in order.
    pub const TWO_PHASE_CYCLE: [Self; 3] = [Self::Phase2Active, Self::Phase1Active, Self::Phase2Active];

    /// Line levels `(phi1, phi2)` of the phase.
    pub const fn levels(self) -> (bool, bool) {
        match self {
            Self::Idle | Self::Phase2Active => (false, true),
            Self::Phase1Active => (true, false),
            Self::BothLow => (false, false),
        }
    }
}

/// How a fixture's clock lines are cycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockDiscipline {
    /// All clock lines rise and fall together.
    SinglePhase,
    /// Non-overlapping phi1/phi2.
    TwoPhase,
}

/// Output states that carry clock lines.
pub trait Clocked: OutputState {
    /// Returns a copy with every clock line driven to `level`.
    #[must_use]
    fn tick(&self, level: bool) -> Self;

    /// Returns a copy with the clock lines driven to the levels of `phase`.
    ///
    /// Fixtures that only wire phi1 drive the phi1 component and ignore phi2.
    #[must_use]
    fn with_phase(&self, phase: ClockPhase) -> Self;
}

/// Pushes the states of one clock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSequencer {
    discipline: ClockDiscipline,
}

impl ClockSequencer {
    /// Creates a sequencer for the given discipline.
    pub const fn new(discipline: ClockDiscipline) -> Self {
        Self { discipline }
    }

    /// Discipline this sequencer follows.
    pub const fn discipline(&self) -> ClockDiscipline {
        self.discipline
    }

    /// States pushed by one cycle starting from `state`, in push order.
    pub fn schedule<O: Clocked>(&self, state: &O) -> Vec<O> {
        match self.discipline {
            ClockDiscipline::SinglePhase => vec![state.tick(true), state.tick(false)],
            ClockDiscipline::TwoPhase => ClockPhase::TWO_PHASE_CYCLE
                .iter()
                .map(|phase| state.with_phase(*phase))
                .collect(),
        }
    }

    /// Pushes one full clock cycle and returns the last pushed state.
    pub fn tick<O: Clocked, P: PinDriver + ?Sized>(
        &self,
        encoder: &OutputEncoder<O>,
        pins: &mut P,
        state: O,
    ) -> O {
        debug!(discipline = ?self.discipline, "clock cycle");
        let mut last = state;
        for next in self.schedule(&state) {
            encoder.push(pins, &next);
            last = next;
        }
        last
    }
}
