//! Iteration style: sums a random `f64` sequence with `Iterator::for_each`,
//! a `for` loop and `fold`.
//!
//! Run:   `cargo run --release --bin iteration`
//! Quick: `cargo run --release --bin iteration -- --sizes 1000,10000 --warmup 5 -q`

use clap::Parser;
use tracing::{error, info};

use idiom_bench::alloc::CountingAllocator;
use idiom_bench::config::{RunArgs, RunConfig};
use idiom_bench::runner::Runner;
use idiom_bench::workloads::iteration;
use idiom_bench::Result;

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator;

#[derive(Debug, Parser)]
#[command(version, about = "Compare for_each, for-loop and fold summation")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

fn run(config: RunConfig) -> Result<()> {
    let mut runner = Runner::new(iteration::NAME, config);
    runner.sweep(&iteration::scenarios())?;
    runner.finish()?;
    Ok(())
}

fn main() {
    idiom_bench::init_logging();
    let cli = Cli::parse();
    let config = cli.run.resolve(&iteration::DEFAULTS);

    if let Err(e) = run(config) {
        error!(error = %e, "experiment aborted");
        std::process::exit(1);
    }
    info!("experiment completed");
}
