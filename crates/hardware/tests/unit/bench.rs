//! # Bench Tests
//!
//! Behaviour of the simulated bench itself: PISO loading and shifting, pin directions after
//! fixture initialization, and the recorded driver calls.

use fixture_core::common::{Level, Pin, PinMode};
use fixture_core::config::Config;
use fixture_core::fixtures::control;
use fixture_core::io::{InputPorts, PinDriver};
use fixture_core::sim::{Bench, PinEvent};
use pretty_assertions::assert_eq;

use crate::common::harness::{INPUTS, OUTPUTS, bench_for, rising_edges, writes_to};

const PISO: InputPorts = InputPorts::new(Pin(1), Pin(2), Pin(3));

fn piso_bench(bits: &[bool]) -> Bench {
    let mut bench = Bench::new().with_input_chain("in", PISO, 4);
    bench.write(PISO.pl, Level::High);
    bench.write(PISO.sck, Level::High);
    assert!(bench.set_inputs("in", bits));
    bench
}

fn clock(bench: &mut Bench) {
    bench.write(PISO.sck, Level::Low);
    bench.write(PISO.sck, Level::High);
}

#[test]
fn piso_presents_loaded_bits_one_clock_at_a_time() {
    let mut bench = piso_bench(&[true, false, true, true]);
    let parked = bench.input_chain("in").unwrap().shift_clocks();

    bench.write(PISO.pl, Level::Low);
    bench.write(PISO.pl, Level::High);

    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(bench.read(PISO.so).is_high());
        clock(&mut bench);
    }
    assert_eq!(seen, vec![true, false, true, true]);
    assert_eq!(bench.read(PISO.so), Level::Low);

    let chain = bench.input_chain("in").unwrap();
    assert_eq!(chain.loads(), 1);
    assert_eq!(chain.shift_clocks() - parked, 4);
}

#[test]
fn piso_holds_the_first_bit_while_loading() {
    let mut bench = piso_bench(&[false, true, false, false]);

    bench.write(PISO.pl, Level::Low);
    clock(&mut bench);
    assert_eq!(bench.read(PISO.so), Level::Low);

    bench.write(PISO.pl, Level::High);
    clock(&mut bench);
    assert_eq!(bench.read(PISO.so), Level::High);
}

#[test]
fn inputs_are_padded_and_truncated_to_the_chain() {
    let mut bench = piso_bench(&[true]);
    assert_eq!(
        bench.input_chain("in").unwrap().inputs(),
        &[true, false, false, false]
    );

    assert!(bench.set_inputs("in", &[true; 6]));
    assert_eq!(bench.input_chain("in").unwrap().inputs(), &[true; 4]);
    assert!(!bench.set_inputs("missing", &[true]));
}

#[test]
fn fixture_initialization_sets_pin_directions() {
    let config = Config::default();
    let fixture = control::fixture(&config).unwrap();
    let mut bench = bench_for(&fixture);

    fixture.initialize_hardware(&mut bench);

    let output = config.pins.output;
    let input = config.pins.input;
    for pin in [output.si, output.rclk, output.sck, output.clr, input.pl, input.sck] {
        assert_eq!(bench.mode(pin), Some(PinMode::Output), "{pin}");
    }
    assert_eq!(bench.mode(input.so), Some(PinMode::Input));
    assert_eq!(bench.mode(config.pins.led.si), None);
    assert_eq!(bench.level(input.pl), Level::High);
    assert_eq!(bench.level(output.clr), Level::High);
}

#[test]
fn initialization_clears_then_latches_zeros() {
    let config = Config::default();
    let fixture = control::fixture(&config).unwrap();
    let mut bench = bench_for(&fixture);

    fixture.initialize_hardware(&mut bench);

    let events = bench.events();
    let clr = writes_to(events, config.pins.output.clr);
    assert_eq!(clr, vec![Level::High, Level::High, Level::Low, Level::High]);
    let rclk = writes_to(events, config.pins.output.rclk);
    assert_eq!(rising_edges(Level::High, &rclk), 1);
    let latched = bench.output_chain(OUTPUTS).unwrap().latched();
    assert!(latched.iter().all(|bit| !bit));
}

#[test]
fn reads_are_logged_with_their_level() {
    let fixture = control::fixture(&Config::default()).unwrap();
    let mut bench = bench_for(&fixture);
    fixture.initialize_hardware(&mut bench);
    assert!(bench.set_inputs(INPUTS, &[true]));
    let _ = bench.take_events();

    let _ = fixture.read(&mut bench);

    let so = fixture.inputs().ports().so;
    let reads: Vec<Level> = bench
        .events()
        .iter()
        .filter_map(|event| match event {
            PinEvent::Read(pin, level) if *pin == so => Some(*level),
            _ => None,
        })
        .collect();
    assert_eq!(reads.len(), control::INPUT_BITS);
    assert_eq!(reads[0], Level::High);
    assert!(reads[1..].iter().all(|level| *level == Level::Low));
}

#[test]
fn delays_accumulate() {
    let mut bench = Bench::new();
    bench.delay_ms(100);
    bench.delay_ms(25);
    assert_eq!(bench.elapsed_ms(), 125);
    assert_eq!(bench.events(), &[PinEvent::Delay(100), PinEvent::Delay(25)]);
}
