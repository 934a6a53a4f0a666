//! # Assertion Tests
//!
//! Mismatch reports carry the caller's location and both values; a failing `assert_equal`
//! hands the LEDs to the error animation and never returns.

use std::panic::{AssertUnwindSafe, catch_unwind};

use fixture_core::Assertions;
use fixture_core::indicator::Indicator;
use pretty_assertions::assert_eq;

use crate::common::harness::{RecordingSink, StopAfter, init_tracing};

fn halted_frames(limit: usize, body: impl FnOnce(&mut Assertions<StopAfter>)) -> Vec<u8> {
    init_tracing();
    let sink = StopAfter::new(limit);
    let mut assertions = Assertions::new(sink.clone(), 0);
    let outcome = catch_unwind(AssertUnwindSafe(|| body(&mut assertions)));
    assert!(outcome.is_err(), "assertion boundary returned");
    sink.shown()
}

#[test]
fn equal_values_pass() {
    let assertions = Assertions::new(RecordingSink::default(), 100);
    assert_eq!(assertions.check_equal(0x42, 0x42, "ALU result"), Ok(()));
}

#[test]
fn mismatch_reports_the_calling_line() {
    let assertions = Assertions::new(RecordingSink::default(), 100);

    let (failure, line) = (assertions.check_equal(0x10, 0x1F, "Y_MEM").unwrap_err(), line!());

    assert!(failure.file.ends_with("assertion.rs"), "{}", failure.file);
    assert_eq!(failure.line, line);
    assert_eq!(failure.message, "Y_MEM");
    assert_eq!(failure.expected, 0x10);
    assert_eq!(failure.actual, 0x1F);
}

#[test]
fn diagnostic_shows_both_values_in_hex() {
    let assertions = Assertions::new(RecordingSink::default(), 100);
    let failure = assertions.check_equal(0xBEEF, 0, "store operand").unwrap_err();
    let text = failure.to_string();
    assert!(
        text.ends_with(&format!(
            ":{}: store operand: expected 0xbeef, got 0x0",
            failure.line
        )),
        "{text}"
    );
    assert!(text.starts_with(failure.file));
}

#[test]
fn passing_assert_leaves_the_leds_alone() {
    let mut assertions = Assertions::new(RecordingSink::default(), 100);
    assertions.assert_equal(7, 7, "Sel_C");
    assertions.assert_equal(0, 0, "stall");
    assert!(assertions.sink().frames.is_empty());
    assert!(assertions.sink().pauses.is_empty());
}

#[test]
fn failing_assert_runs_the_error_animation() {
    let shown = halted_frames(8, |assertions| assertions.assert_equal(1, 0, "Z flag"));
    assert_eq!(shown, vec![0xFF, 0x00, 0xFF, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn success_holds_the_alternating_pattern() {
    let shown = halted_frames(3, |assertions| assertions.succeed());
    assert_eq!(shown, vec![0xAA, 0xAA, 0xAA]);
}

#[test]
fn progress_can_share_the_sink_between_checks() {
    let mut assertions = Assertions::new(RecordingSink::default(), 20);
    Indicator::chaser().run_steps(assertions.sink_mut(), 2, 20);
    assertions.assert_equal(3, 3, "count");
    assert_eq!(assertions.sink().frames, vec![0x02, 0x04]);
}
