//! # Indicator Tests
//!
//! Frame sequences of the error, success, and chaser animations, and LED panels driving a
//! simulated chain.

use std::panic::{AssertUnwindSafe, catch_unwind};

use fixture_core::codec::OutputState;
use fixture_core::config::Config;
use fixture_core::fixtures::{led, memory};
use fixture_core::fixtures::memory::{MemoryOutputSignal, MemoryOutputs};
use fixture_core::indicator::{Indicator, IndicatorSink, LedPanel};
use fixture_core::sim::Bench;
use pretty_assertions::assert_eq;

use crate::common::harness::{OUTPUTS, RecordingSink, StopAfter, init_tracing, powered_bench_for};

const LED_CHAIN: &str = "led";

fn frames(mut indicator: Indicator, count: usize) -> Vec<u8> {
    (0..count).map(|_| indicator.step()).collect()
}

/// Runs `body` until the sink stops it and returns the frames it showed.
fn run_until_stopped(limit: usize, body: impl FnOnce(&mut StopAfter)) -> Vec<u8> {
    init_tracing();
    let mut sink = StopAfter::new(limit);
    let observer = sink.clone();
    let outcome = catch_unwind(AssertUnwindSafe(|| body(&mut sink)));
    assert!(outcome.is_err(), "the loop returned on its own");
    observer.shown()
}

#[test]
fn error_flashes_twice_then_holds() {
    assert_eq!(
        frames(Indicator::error(), 8),
        vec![0xFF, 0x00, 0xFF, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]
    );
}

#[test]
fn error_wraps_to_the_first_frame() {
    let mut indicator = Indicator::error();
    for _ in 0..8 {
        let _ = indicator.step();
    }
    assert_eq!(indicator, Indicator::error());
    assert_eq!(indicator.step(), 0xFF);
    assert_eq!(indicator.step(), 0x00);
}

#[test]
fn out_of_range_counters_wrap_instead_of_panicking() {
    let mut error = Indicator::Error { step: 8 };
    assert_eq!(error.step(), 0xFF);
    assert_eq!(error, Indicator::Error { step: 1 });

    let mut late = Indicator::Error { step: usize::MAX };
    let _ = late.step();

    let mut chaser = Indicator::Chaser { step: 27 };
    assert_eq!(chaser.step(), 0x01);
}

#[test]
fn success_alternates_leds() {
    assert_eq!(frames(Indicator::success(), 4), vec![0xAA; 4]);
}

#[test]
fn chaser_bounces_between_the_ends() {
    let sweep = vec![
        0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01,
    ];
    let observed = frames(Indicator::chaser(), 28);
    assert_eq!(&observed[..14], sweep.as_slice());
    assert_eq!(&observed[14..], sweep.as_slice());
    assert!(observed.iter().all(|frame| frame.count_ones() == 1));
}

#[test]
fn run_steps_pauses_after_every_frame() {
    let mut sink = RecordingSink::default();
    let mut indicator = Indicator::chaser();

    indicator.run_steps(&mut sink, 3, 75);

    assert_eq!(sink.frames, vec![0x02, 0x04, 0x08]);
    assert_eq!(sink.pauses, vec![75, 75, 75]);
    assert_eq!(indicator, Indicator::Chaser { step: 3 });
}

#[test]
fn run_forever_keeps_stepping() {
    let shown = run_until_stopped(10, |sink| Indicator::error().run_forever(sink, 0));
    assert_eq!(
        shown,
        vec![0xFF, 0x00, 0xFF, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00]
    );
}

#[test]
fn led_panel_latches_each_frame_on_its_chain() {
    init_tracing();
    let config = Config::default();
    let encoder = led::encoder(&config).unwrap();
    let mut bench = Bench::new().with_output_chain(LED_CHAIN, config.pins.led, 8);
    encoder.initialize_hardware(&mut bench);

    let mut panel = led::panel(&mut bench, &config).unwrap();
    panel.show(0b1000_0001);
    panel.pause(40);
    assert_eq!(panel.state().pattern(), 0b1000_0001);
    drop(panel);

    let chain = bench.output_chain(LED_CHAIN).unwrap();
    assert_eq!(
        chain.latched(),
        &[true, false, false, false, false, false, false, true]
    );
    assert_eq!(bench.elapsed_ms(), 40);
}

#[test]
fn fixture_panel_keeps_the_other_signals() {
    let fixture = memory::fixture(&Config::default()).unwrap();
    let mut bench = powered_bench_for(&fixture);
    let state = MemoryOutputs::new().reset(false).y(0x1234);

    let mut panel = LedPanel::new(&mut bench, fixture.outputs().clone(), state);
    Indicator::success().run_steps(&mut panel, 2, 5);
    let shown = *panel.state();
    drop(panel);

    assert_eq!(shown, state.led(0xAA));
    assert_eq!(shown.signal(MemoryOutputSignal::YMem), 0x1234);
    assert_eq!(
        bench.output_chain(OUTPUTS).unwrap().latched(),
        fixture.outputs().bits(&shown).as_slice()
    );
    assert_eq!(bench.elapsed_ms(), 10);
}
