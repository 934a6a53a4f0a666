//! # Output-State Builder Tests
//!
//! Verifies the idle state of every fixture board, the line-level encoding of the
//! active-low mutators, the bus output-enable masks, and (with `proptest`) that mutators
//! compose: disjoint fields commute and the last write to a field wins.

use fixture_core::codec::OutputState;
use fixture_core::fixtures::bus::{BusOutputSignal, BusOutputs};
use fixture_core::fixtures::control::{ControlOutputSignal, ControlOutputs};
use fixture_core::fixtures::execute::{ExecuteOutputSignal, ExecuteOutputs};
use fixture_core::fixtures::led::LedOutputs;
use fixture_core::fixtures::memory::{MemoryOutputSignal, MemoryOutputs};
use fixture_core::layout::Signal;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(ControlOutputSignal::SelCMem, 0)]
#[case(ControlOutputSignal::CtlMem, 0b111_1111)]
#[case(ControlOutputSignal::InsId, 0)]
#[case(ControlOutputSignal::C, 0)]
#[case(ControlOutputSignal::Z, 0)]
#[case(ControlOutputSignal::V, 0)]
#[case(ControlOutputSignal::N, 0)]
#[case(ControlOutputSignal::Phi1, 0)]
#[case(ControlOutputSignal::Phi2, 0)]
#[case(ControlOutputSignal::Rst, 1)]
fn control_idle_state(#[case] signal: ControlOutputSignal, #[case] expected: u32) {
    assert_eq!(ControlOutputs::new().signal(signal), expected, "{}", signal.name());
}

#[rstest]
#[case(ExecuteOutputSignal::Phi1, 0)]
#[case(ExecuteOutputSignal::PcEx, 0)]
#[case(ExecuteOutputSignal::B, 0)]
#[case(ExecuteOutputSignal::A, 0)]
#[case(ExecuteOutputSignal::InsEx, 0)]
#[case(ExecuteOutputSignal::CtlEx, 0x1F_FFFF)]
fn execute_idle_state(#[case] signal: ExecuteOutputSignal, #[case] expected: u32) {
    assert_eq!(ExecuteOutputs::new().signal(signal), expected, "{}", signal.name());
}

#[rstest]
#[case(MemoryOutputSignal::Led, 0)]
#[case(MemoryOutputSignal::SelCMem, 0)]
#[case(MemoryOutputSignal::Rst, 0)]
#[case(MemoryOutputSignal::Rdy, 1)]
#[case(MemoryOutputSignal::Phi1, 0)]
#[case(MemoryOutputSignal::Phi2, 1)]
#[case(MemoryOutputSignal::FlushIf, 1)]
#[case(MemoryOutputSignal::CtlMem, 0b111_1111)]
#[case(MemoryOutputSignal::StoreOpMem, 0)]
#[case(MemoryOutputSignal::YMem, 0)]
#[case(MemoryOutputSignal::PcMem, 0)]
fn memory_idle_state(#[case] signal: MemoryOutputSignal, #[case] expected: u32) {
    assert_eq!(MemoryOutputs::new().signal(signal), expected, "{}", signal.name());
}

#[rstest]
#[case(BusOutputSignal::Oe, 0b11_1111)]
#[case(BusOutputSignal::MemStore, 1)]
#[case(BusOutputSignal::MemLoad, 1)]
#[case(BusOutputSignal::Bank, 0)]
#[case(BusOutputSignal::Addr, 0)]
#[case(BusOutputSignal::Io, 0)]
fn bus_idle_state(#[case] signal: BusOutputSignal, #[case] expected: u32) {
    assert_eq!(BusOutputs::new().signal(signal), expected, "{}", signal.name());
}

#[test]
fn active_low_lines_are_inverted() {
    let control = ControlOutputs::new().reset(true);
    assert_eq!(control.signal(ControlOutputSignal::Rst), 0);
    assert!(control.is_resetting());
    assert_eq!(control.reset(false).signal(ControlOutputSignal::Rst), 1);

    let memory = MemoryOutputs::new().reset(false).ready(true).flush(true);
    assert_eq!(memory.signal(MemoryOutputSignal::Rst), 1);
    assert_eq!(memory.signal(MemoryOutputSignal::Rdy), 0);
    assert_eq!(memory.signal(MemoryOutputSignal::FlushIf), 0);
    assert!(MemoryOutputs::new().is_resetting());

    let bus = BusOutputs::new().mem_load(true);
    assert_eq!(bus.signal(BusOutputSignal::MemLoad), 0);
    assert_eq!(bus.signal(BusOutputSignal::MemStore), 1);
    assert_eq!(bus.mem_store(true).signal(BusOutputSignal::MemStore), 0);
}

#[test]
fn flags_and_clocks_are_single_bits() {
    let state = ControlOutputs::new()
        .carry(true)
        .zero(true)
        .overflow(false)
        .negative(true)
        .phi1(true);
    assert_eq!(state.signal(ControlOutputSignal::C), 1);
    assert_eq!(state.signal(ControlOutputSignal::Z), 1);
    assert_eq!(state.signal(ControlOutputSignal::V), 0);
    assert_eq!(state.signal(ControlOutputSignal::N), 1);
    assert_eq!(state.signal(ControlOutputSignal::Phi1), 1);
    assert_eq!(state.signal(ControlOutputSignal::Phi2), 0);
}

#[rstest]
#[case::load_store(BusOutputs::assert_mem_load_store_lines, 0b01_1111)]
#[case::bank(BusOutputs::assert_bank_lines, 0b10_1111)]
#[case::addr(BusOutputs::assert_addr_lines, 0b11_0011)]
#[case::data(BusOutputs::assert_data_lines, 0b11_1100)]
fn bus_line_groups_clear_their_enable_bits(
    #[case] assert_lines: fn(BusOutputs) -> BusOutputs,
    #[case] expected: u32,
) {
    assert_eq!(assert_lines(BusOutputs::new()).output_enables(), expected);
}

#[test]
fn bus_enables_accumulate_until_released() {
    let driving = BusOutputs::new()
        .addr(0x1234)
        .data(0xBEEF)
        .assert_addr_lines()
        .assert_data_lines();
    assert_eq!(driving.output_enables(), 0b11_0000);
    assert_eq!(driving.signal(BusOutputSignal::Addr), 0x1234);

    let released = driving.release_bus_lines();
    assert_eq!(released.output_enables(), 0b11_1111);
    assert_eq!(released.signal(BusOutputSignal::Io), 0xBEEF);
}

#[test]
fn builders_never_modify_the_original() {
    let idle = MemoryOutputs::new();
    let busy = idle.y(0x55AA).pc(0x0100).led(0x0F);
    assert_eq!(idle, MemoryOutputs::default());
    assert_ne!(idle, busy);
    assert_eq!(busy.signal(MemoryOutputSignal::Led), 0x0F);
}

#[test]
fn raw_signal_writes_bypass_active_low_conversion() {
    let state = ControlOutputs::new().with_signal(ControlOutputSignal::Rst, 0);
    assert!(state.is_resetting());
    assert_eq!(state, ControlOutputs::new().reset(true));
}

#[test]
fn led_panel_state_holds_one_byte() {
    let state = LedOutputs::new().led(0xA5);
    assert_eq!(state.pattern(), 0xA5);
    assert_eq!(LedOutputs::new().pattern(), 0);
}

proptest! {
    #[test]
    fn disjoint_mutators_commute(a in any::<u16>(), b in any::<u16>(), pc in any::<u16>()) {
        let (a, b, pc) = (u32::from(a), u32::from(b), u32::from(pc));
        let forward = ExecuteOutputs::new().a(a).b(b).pc(pc);
        let backward = ExecuteOutputs::new().pc(pc).b(b).a(a);
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn last_write_wins(first in any::<u32>(), second in any::<u32>()) {
        let state = MemoryOutputs::new().y(first).store_op(7).y(second);
        prop_assert_eq!(state, MemoryOutputs::new().store_op(7).y(second));
        prop_assert_eq!(state.signal(MemoryOutputSignal::YMem), second);
    }

    #[test]
    fn untouched_fields_keep_idle_values(ins in any::<u16>(), sel_c in 0u32..8) {
        let state = ControlOutputs::new().ins(u32::from(ins)).sel_c(sel_c);
        let idle = ControlOutputs::new();
        for signal in ControlOutputSignal::ALL {
            if matches!(signal, ControlOutputSignal::InsId | ControlOutputSignal::SelCMem) {
                continue;
            }
            prop_assert_eq!(state.signal(*signal), idle.signal(*signal));
        }
    }

    #[test]
    fn with_signal_matches_named_mutators(value in any::<u32>()) {
        prop_assert_eq!(
            BusOutputs::new().with_signal(BusOutputSignal::Addr, value),
            BusOutputs::new().addr(value)
        );
        prop_assert_eq!(
            ExecuteOutputs::new().with_signal(ExecuteOutputSignal::CtlEx, value),
            ExecuteOutputs::new().ctl(value)
        );
    }
}
