//! Number Bands
//!
//! Drives a value through three counting states until it falls out of range.
//!
//! Key concepts:
//! - Handler structs bound to string-named states
//! - An end state with no handler of its own
//! - Optional step/time budgets and run snapshots
//!
//! Run with: cargo run --example number_bands -- --start 1.0 --max-steps 50

use clap::Parser;
use fsmdrive::core::{Handler, HandlerResult, Transition};
use fsmdrive::engine::{Machine, NoopObserver, RunLimits, RunOptions};
use fsmdrive::snapshot::RunSnapshot;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const OUT_OF_RANGE: &str = "outofrange";

#[derive(Parser, Debug)]
#[command(name = "number_bands", about = "Fold a number through ones/tens/twenties bands")]
struct Args {
    /// Starting value
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    start: f64,

    /// Stop after this many transitions
    #[arg(long)]
    max_steps: Option<usize>,

    /// Stop after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print a JSON snapshot of the run when it finishes
    #[arg(long)]
    snapshot: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Clone, Copy, PartialEq)]
enum Band {
    Ones,
    Tens,
    Twenties,
}

impl Band {
    fn name(self) -> &'static str {
        match self {
            Self::Ones => "ones",
            Self::Tens => "tens",
            Self::Twenties => "twenties",
        }
    }

    fn label(self) -> (&'static str, char) {
        match self {
            Self::Ones => ("1s", '@'),
            Self::Tens => ("10s", '#'),
            Self::Twenties => ("20s", '*'),
        }
    }

    fn of(value: f64) -> Option<Self> {
        if value >= 20.0 {
            Some(Self::Twenties)
        } else if value >= 10.0 {
            Some(Self::Tens)
        } else if value >= 1.0 {
            Some(Self::Ones)
        } else {
            None
        }
    }
}

fn do_math(value: f64) -> f64 {
    (value.sin() * 31.0).abs()
}

/// Keeps folding the value while it stays in its own band (or in (0, 1)),
/// printing each intermediate value.
struct Counter {
    band: Band,
}

impl Handler<f64> for Counter {
    fn transition(&self, mut value: f64) -> HandlerResult<f64> {
        let (label, marker) = self.band.label();
        print!("{label} State:\t");

        let next = loop {
            if value <= 0.0 || value >= 30.0 {
                break OUT_OF_RANGE;
            }
            match Band::of(value) {
                Some(band) if band != self.band => break band.name(),
                _ => print!(" {marker}{value:2.1}+"),
            }
            value = do_math(value);
        };

        println!(" >>");
        Ok(Transition::to(next, value))
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.json_logs);

    println!("=== Number Bands ===\n");

    let mut machine = Machine::new("ones");
    for band in [Band::Ones, Band::Tens, Band::Twenties] {
        machine.add_state(band.name(), Counter { band });
    }
    machine.add_end_state(OUT_OF_RANGE);

    let mut limits = RunLimits::new();
    if let Some(n) = args.max_steps {
        limits = limits.max_steps(n);
    }
    if let Some(ms) = args.timeout_ms {
        limits = limits.timeout(Duration::from_millis(ms));
    }
    let options = RunOptions::new()
        .limits(limits)
        .record_history(args.snapshot);

    let report = match machine.run_with(args.start, &options, &mut NoopObserver) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Run failed: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "\nHalted in '{}' after {} transitions ({:?}), final value {:.3}",
        report.final_state, report.steps, report.halt, report.cargo
    );

    if args.snapshot {
        match RunSnapshot::capture(&report).to_json_pretty() {
            Ok(json) => println!("\n{json}"),
            Err(e) => eprintln!("Snapshot failed: {e}"),
        }
    }

    println!("\n=== Example Complete ===");
}
