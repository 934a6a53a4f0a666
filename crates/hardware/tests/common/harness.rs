use std::sync::{Arc, Mutex};

use fixture_core::TestFixture;
use fixture_core::codec::{InputSnapshot, OutputState};
use fixture_core::common::{Level, Pin};
use fixture_core::indicator::IndicatorSink;
use fixture_core::sim::{Bench, PinEvent};
use tracing_subscriber::EnvFilter;

/// Name of the driving chain on benches built by [`bench_for`].
pub const OUTPUTS: &str = "outputs";
/// Name of the sampling chain on benches built by [`bench_for`].
pub const INPUTS: &str = "inputs";

/// Routes library logs to the test writer; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A bench with the fixture's driving and sampling chains attached.
pub fn bench_for<O: OutputState, I: InputSnapshot>(fixture: &TestFixture<O, I>) -> Bench {
    init_tracing();
    Bench::new()
        .with_output_chain(
            OUTPUTS,
            *fixture.outputs().ports(),
            fixture.outputs().layout().len(),
        )
        .with_input_chain(
            INPUTS,
            *fixture.inputs().ports(),
            fixture.inputs().layout().len(),
        )
}

/// Like [`bench_for`], with the hardware initialized and the event log emptied.
pub fn powered_bench_for<O: OutputState, I: InputSnapshot>(fixture: &TestFixture<O, I>) -> Bench {
    let mut bench = bench_for(fixture);
    fixture.initialize_hardware(&mut bench);
    let _ = bench.take_events();
    bench
}

/// Levels written to `pin`, in order.
pub fn writes_to(events: &[PinEvent], pin: Pin) -> Vec<Level> {
    events
        .iter()
        .filter_map(|event| match event {
            PinEvent::Write(p, level) if *p == pin => Some(*level),
            _ => None,
        })
        .collect()
}

/// Number of low-to-high transitions in a write sequence that starts from `initial`.
pub fn rising_edges(initial: Level, levels: &[Level]) -> usize {
    let mut previous = initial;
    let mut count = 0;
    for level in levels {
        if previous == Level::Low && *level == Level::High {
            count += 1;
        }
        previous = *level;
    }
    count
}

/// Sink that records every frame and pause.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<u8>,
    pub pauses: Vec<u32>,
}

impl IndicatorSink for RecordingSink {
    fn show(&mut self, pattern: u8) {
        self.frames.push(pattern);
    }

    fn pause(&mut self, ms: u32) {
        self.pauses.push(ms);
    }
}

/// Sink that panics once it has shown `limit` frames, so a never-returning loop can be
/// observed from a test with `catch_unwind`.
#[derive(Debug, Clone)]
pub struct StopAfter {
    pub frames: Arc<Mutex<Vec<u8>>>,
    limit: usize,
}

impl StopAfter {
    pub fn new(limit: usize) -> Self {
        Self {
            frames: Arc::new(Mutex::new(Vec::new())),
            limit,
        }
    }

    pub fn shown(&self) -> Vec<u8> {
        self.frames.lock().unwrap().clone()
    }
}

impl IndicatorSink for StopAfter {
    fn show(&mut self, pattern: u8) {
        let mut frames = self.frames.lock().unwrap();
        frames.push(pattern);
        if frames.len() >= self.limit {
            drop(frames);
            panic!("indicator stopped after {} frames", self.limit);
        }
    }

    fn pause(&mut self, _ms: u32) {}
}
