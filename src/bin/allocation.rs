//! Allocation patterns: copy-on-every-step against in-place mutation, and
//! by-value against by-reference record transforms. Memory is measured.
//!
//! Run: `cargo run --release --bin allocation`

use clap::Parser;
use tracing::{error, info};

use idiom_bench::alloc::CountingAllocator;
use idiom_bench::config::{RunArgs, RunConfig};
use idiom_bench::runner::Runner;
use idiom_bench::workloads::allocation;
use idiom_bench::Result;

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator;

#[derive(Debug, Parser)]
#[command(version, about = "Compare copying and in-place allocation patterns")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

fn run(config: RunConfig) -> Result<()> {
    let mut runner = Runner::new(allocation::NAME, config);
    runner.sweep(&allocation::scenarios())?;
    runner.finish()?;
    Ok(())
}

fn main() {
    idiom_bench::init_logging();
    let cli = Cli::parse();
    let config = cli.run.resolve(&allocation::DEFAULTS);

    if let Err(e) = run(config) {
        error!(error = %e, "experiment aborted");
        std::process::exit(1);
    }
    info!("experiment completed");
}
