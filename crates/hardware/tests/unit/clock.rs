//! # Clock Sequencer Tests
//!
//! Verifies the pushed state sequence of single-phase and two-phase clock cycles, that the
//! two phases are never high together, and that non-clock fields ride through unchanged.

use fixture_core::clock::{ClockDiscipline, ClockPhase, ClockSequencer};
use fixture_core::codec::OutputState;
use fixture_core::config::Config;
use fixture_core::fixtures::control::{self, ControlOutputSignal, ControlOutputs};
use fixture_core::fixtures::execute::{self, ExecuteOutputSignal, ExecuteOutputs};
use fixture_core::fixtures::memory::{self, MemoryOutputSignal, MemoryOutputs};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::harness::{OUTPUTS, powered_bench_for};

fn memory_phases(states: &[MemoryOutputs]) -> Vec<(u32, u32)> {
    states
        .iter()
        .map(|s| {
            (
                s.signal(MemoryOutputSignal::Phi1),
                s.signal(MemoryOutputSignal::Phi2),
            )
        })
        .collect()
}

#[test]
fn fixtures_use_their_wired_discipline() {
    let config = Config::default();
    assert_eq!(
        control::fixture(&config).unwrap().clock().discipline(),
        ClockDiscipline::SinglePhase
    );
    assert_eq!(
        execute::fixture(&config).unwrap().clock().discipline(),
        ClockDiscipline::TwoPhase
    );
    assert_eq!(
        memory::fixture(&config).unwrap().clock().discipline(),
        ClockDiscipline::TwoPhase
    );
}

#[test]
fn single_phase_raises_then_lowers_both_clocks() {
    let sequencer = ClockSequencer::new(ClockDiscipline::SinglePhase);
    let states = sequencer.schedule(&ControlOutputs::new().ins(0x1234));

    let levels: Vec<(u32, u32)> = states
        .iter()
        .map(|s| {
            (
                s.signal(ControlOutputSignal::Phi1),
                s.signal(ControlOutputSignal::Phi2),
            )
        })
        .collect();
    assert_eq!(levels, vec![(1, 1), (0, 0)]);
    assert!(states.iter().all(|s| s.signal(ControlOutputSignal::InsId) == 0x1234));
}

#[test]
fn two_phase_cycle_is_idle_active_idle() {
    let sequencer = ClockSequencer::new(ClockDiscipline::TwoPhase);
    let states = sequencer.schedule(&MemoryOutputs::new());
    assert_eq!(memory_phases(&states), vec![(0, 1), (1, 0), (0, 1)]);
}

#[test]
fn execute_drives_only_phi1() {
    let sequencer = ClockSequencer::new(ClockDiscipline::TwoPhase);
    let states = sequencer.schedule(&ExecuteOutputs::new());
    let phi1: Vec<u32> = states
        .iter()
        .map(|s| s.signal(ExecuteOutputSignal::Phi1))
        .collect();
    assert_eq!(phi1, vec![0, 1, 0]);
}

#[test]
fn phase_levels_never_overlap() {
    for phase in [
        ClockPhase::Idle,
        ClockPhase::Phase1Active,
        ClockPhase::Phase2Active,
        ClockPhase::BothLow,
    ] {
        let (phi1, phi2) = phase.levels();
        assert!(!(phi1 && phi2), "{phase:?}");
    }
}

#[test]
fn tick_pushes_one_state_per_phase_and_returns_the_last() {
    let fixture = memory::fixture(&Config::default()).unwrap();
    let mut bench = powered_bench_for(&fixture);
    let start = MemoryOutputs::new().reset(false).y(0x0F0F);
    let before = bench.output_chain(OUTPUTS).unwrap().latches();

    let last = fixture.tick(&mut bench, start);

    let chain = bench.output_chain(OUTPUTS).unwrap();
    assert_eq!(chain.latches() - before, 3);
    assert_eq!(last, start.phi1(false).phi2(true));
    assert_eq!(chain.latched(), fixture.outputs().bits(&last).as_slice());
}

#[test]
fn control_tick_leaves_clocks_low() {
    let fixture = control::fixture(&Config::default()).unwrap();
    let mut bench = powered_bench_for(&fixture);
    let before = bench.output_chain(OUTPUTS).unwrap().latches();

    let last = fixture.tick(&mut bench, ControlOutputs::new().carry(true));

    assert_eq!(bench.output_chain(OUTPUTS).unwrap().latches() - before, 2);
    assert_eq!(last, ControlOutputs::new().carry(true).phi1(false).phi2(false));
}

proptest! {
    #[test]
    fn two_phase_tick_preserves_every_other_field(
        y in any::<u16>(),
        pc in any::<u16>(),
        led in any::<u8>(),
        phi1 in any::<bool>(),
        phi2 in any::<bool>(),
    ) {
        let start = MemoryOutputs::new()
            .y(u32::from(y))
            .pc(u32::from(pc))
            .led(led)
            .phi1(phi1)
            .phi2(phi2);
        let states = ClockSequencer::new(ClockDiscipline::TwoPhase).schedule(&start);

        prop_assert_eq!(states.len(), 3);
        for state in &states {
            let (p1, p2) = (
                state.signal(MemoryOutputSignal::Phi1),
                state.signal(MemoryOutputSignal::Phi2),
            );
            prop_assert!(p1 + p2 == 1);
            prop_assert_eq!(state.phi1(phi1).phi2(phi2), start);
        }
    }
}
