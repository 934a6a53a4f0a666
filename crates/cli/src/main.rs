//! Fixture driver CLI.
//!
//! Host-side companion to the fixture firmware. It performs:
//! 1. **Layout:** Prints the wire order of a board's chains.
//! 2. **Encode:** Prints the bits a board state shifts into its driving chain.
//! 3. **Demo:** Runs init, push, clock, and read against the simulated bench.
//! 4. **Indicator:** Prints the frames of an LED animation.

use std::fmt::Debug;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fixture_core::clock::Clocked;
use fixture_core::codec::{InputSnapshot, OutputState};
use fixture_core::config::Config;
use fixture_core::fixtures::{FixtureKind, TestFixture, bus, control, execute, memory};
use fixture_core::indicator::{Indicator, IndicatorSink};
use fixture_core::layout::Signal;
use fixture_core::sim::Bench;

#[derive(Parser, Debug)]
#[command(
    name = "fixture",
    author,
    version,
    about = "Inspect and dry-run CPU module test fixtures",
    long_about = "Inspect the shift-register layouts of the Control, Execute and Memory fixture boards, and dry-run their protocol on a simulated bench.\n\nExamples:\n  fixture layout control\n  fixture encode execute --set a=0x1234 --set b=0x0042\n  fixture demo memory\n  fixture indicator chaser --steps 14"
)]
struct Cli {
    /// JSON configuration file (pins, timing, layout overrides).
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the driving and sampling chain layouts of a board.
    Layout {
        /// Board: control, execute, or memory.
        fixture: FixtureKind,
    },

    /// Print the wire bits of the idle state with raw signal overrides.
    Encode {
        /// Board: control, execute, or memory.
        fixture: FixtureKind,

        /// Raw line-level override, e.g. `--set ctl_ex=0x1fffff`. Repeatable.
        #[arg(long = "set", value_parser = parse_assignment)]
        assignments: Vec<(String, u32)>,
    },

    /// Initialize, push the idle state, clock once, and read back on the simulated bench.
    Demo {
        /// Board: control, execute, or memory.
        fixture: FixtureKind,
    },

    /// Print the frames of a status animation.
    Indicator {
        /// Animation to print.
        kind: IndicatorKind,

        /// Number of frames.
        #[arg(long, default_value_t = 16)]
        steps: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IndicatorKind {
    Error,
    Success,
    Chaser,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    let result = match cli.command {
        Commands::Layout { fixture } => cmd_layout(fixture, &config),
        Commands::Encode {
            fixture,
            assignments,
        } => cmd_encode(fixture, &config, &assignments),
        Commands::Demo { fixture } => cmd_demo(fixture, &config),
        Commands::Indicator { kind, steps } => {
            cmd_indicator(kind, steps, config.timing.indicator_interval_ms);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Loads the configuration file, or the Rev A defaults when none is given.
fn load_config(path: Option<&str>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let config = Config::from_file(path).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    info!(path, "loaded configuration");
    config
}

/// Parses `name=value`, with `value` in decimal, `0x` hex, or `0b` binary.
fn parse_assignment(arg: &str) -> Result<(String, u32), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected `name=value`, got `{arg}`"))?;
    let value = value.trim();
    let parsed = if let Some(hex) = value.strip_prefix("0x") {
        u32::from_str_radix(hex, 16)
    } else if let Some(bin) = value.strip_prefix("0b") {
        u32::from_str_radix(bin, 2)
    } else {
        value.parse()
    };
    parsed
        .map(|v| (name.trim().to_owned(), v))
        .map_err(|e| format!("bad value in `{arg}`: {e}"))
}

fn cmd_layout(fixture: FixtureKind, config: &Config) -> Result<(), String> {
    match fixture {
        FixtureKind::Control => print_layouts(&control::fixture(config).map_err(|e| e.to_string())?),
        FixtureKind::Execute => print_layouts(&execute::fixture(config).map_err(|e| e.to_string())?),
        FixtureKind::Memory => {
            print_layouts(&memory::fixture(config).map_err(|e| e.to_string())?);
            let port = bus::interface(config).map_err(|e| e.to_string())?;
            println!("{}", port.outputs().layout());
            println!("{}", port.inputs().layout());
        }
    }
    Ok(())
}

fn print_layouts<O: OutputState, I: InputSnapshot>(fixture: &TestFixture<O, I>) {
    println!("{}", fixture.outputs().layout());
    println!("{}", fixture.inputs().layout());
}

fn cmd_encode(
    fixture: FixtureKind,
    config: &Config,
    assignments: &[(String, u32)],
) -> Result<(), String> {
    match fixture {
        FixtureKind::Control => {
            encode(&control::fixture(config).map_err(|e| e.to_string())?, assignments)
        }
        FixtureKind::Execute => {
            encode(&execute::fixture(config).map_err(|e| e.to_string())?, assignments)
        }
        FixtureKind::Memory => {
            encode(&memory::fixture(config).map_err(|e| e.to_string())?, assignments)
        }
    }
}

fn encode<O: OutputState, I: InputSnapshot>(
    fixture: &TestFixture<O, I>,
    assignments: &[(String, u32)],
) -> Result<(), String> {
    let layout = fixture.outputs().layout();
    let mut state = O::default();
    for (name, value) in assignments {
        let signal = find_signal::<O::Signal>(name).ok_or_else(|| {
            let known: Vec<&str> = O::Signal::ALL.iter().map(|s| s.name()).collect();
            format!("`{name}` is not a signal of {} (known: {})", layout.name(), known.join(", "))
        })?;
        state = state.with_signal(signal, *value);
    }

    let bits = fixture.outputs().bits(&state);
    println!("{} ({} bits)", layout.name(), bits.len());
    println!("{}", bit_string(&bits));
    for signal in O::Signal::ALL {
        println!("  {:<12} {:#x}", signal.name(), state.signal(*signal));
    }
    Ok(())
}

/// Finds a signal by net name, ignoring case and underscores (`sel_c_mem` matches `SelC_MEM`).
fn find_signal<S: Signal>(name: &str) -> Option<S> {
    let wanted = normalize(name);
    S::ALL.iter().copied().find(|s| normalize(s.name()) == wanted)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn bit_string(bits: &[bool]) -> String {
    bits.iter().map(|b| if *b { '1' } else { '0' }).collect()
}

fn cmd_demo(fixture: FixtureKind, config: &Config) -> Result<(), String> {
    match fixture {
        FixtureKind::Control => demo(&control::fixture(config).map_err(|e| e.to_string())?),
        FixtureKind::Execute => demo(&execute::fixture(config).map_err(|e| e.to_string())?),
        FixtureKind::Memory => demo(&memory::fixture(config).map_err(|e| e.to_string())?),
    }
    Ok(())
}

fn demo<O: Clocked, I: InputSnapshot + Debug>(fixture: &TestFixture<O, I>) {
    let out_layout = fixture.outputs().layout();
    let in_layout = fixture.inputs().layout();
    let mut bench = Bench::new()
        .with_output_chain("outputs", *fixture.outputs().ports(), out_layout.len())
        .with_input_chain("inputs", *fixture.inputs().ports(), in_layout.len());

    // Alternate the sampled lines so every field decodes to something visible.
    let pattern: Vec<bool> = (0..in_layout.len()).map(|i| i % 2 == 0).collect();
    let _ = bench.set_inputs("inputs", &pattern);
    debug!(fixture = fixture.name(), "bench assembled");

    fixture.initialize_hardware(&mut bench);
    let idle = O::default();
    fixture.set(&mut bench, &idle);
    let last = fixture.tick(&mut bench, idle);
    let snapshot = fixture.read(&mut bench);

    println!("{} on simulated bench", fixture.name());
    if let Some(chain) = bench.output_chain("outputs") {
        let matches = chain.latched() == fixture.outputs().bits(&last).as_slice();
        println!(
            "  driving chain: {} shift clocks, {} latches, outputs {}",
            chain.shift_clocks(),
            chain.latches(),
            if matches { "match last state" } else { "DIFFER from last state" }
        );
        println!("  latched: {}", bit_string(chain.latched()));
    }
    if let Some(chain) = bench.input_chain("inputs") {
        println!(
            "  sampling chain: {} shift clocks, {} loads",
            chain.shift_clocks(),
            chain.loads()
        );
    }
    println!("  pin events: {}", bench.events().len());
    println!("  snapshot: {snapshot:#?}");
}

/// Prints frames instead of lighting LEDs.
struct PrintSink;

impl IndicatorSink for PrintSink {
    fn show(&mut self, pattern: u8) {
        let leds: String = (0..8)
            .rev()
            .map(|bit| if (pattern >> bit) & 1 == 1 { '*' } else { '.' })
            .collect();
        println!("{leds}  {pattern:#04x}");
    }

    fn pause(&mut self, _ms: u32) {}
}

fn cmd_indicator(kind: IndicatorKind, steps: usize, interval_ms: u32) {
    let mut indicator = match kind {
        IndicatorKind::Error => Indicator::error(),
        IndicatorKind::Success => Indicator::success(),
        IndicatorKind::Chaser => Indicator::chaser(),
    };
    println!("{kind:?}: {steps} frames, {interval_ms} ms apart");
    indicator.run_steps(&mut PrintSink, steps, interval_ms);
}
