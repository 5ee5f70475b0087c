//! Key/value storage: `HashMap` against `BTreeMap` for fill, exists, get,
//! iterate and clear, followed by a retained-memory sweep.
//!
//! Run:   `cargo run --release --bin key-store`
//! Quick: `cargo run --release --bin key-store -- --sizes 100,1000 --trials 3 --skip-memory`

use clap::Parser;
use tracing::{error, info};

use idiom_bench::alloc::CountingAllocator;
use idiom_bench::config::{RunArgs, RunConfig};
use idiom_bench::runner::Runner;
use idiom_bench::workloads::key_store;
use idiom_bench::Result;

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator;

#[derive(Debug, Parser)]
#[command(version, about = "Compare HashMap and BTreeMap as key/value stores")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    /// Skip the retained-memory sweep
    #[arg(long)]
    skip_memory: bool,
}

fn run(config: RunConfig, skip_memory: bool) -> Result<()> {
    let mut runner = Runner::new(key_store::NAME, config);
    runner.sweep(&key_store::scenarios())?;
    if !skip_memory {
        runner.memory_sweep(&key_store::memory(), key_store::MEMORY_SIZES)?;
    }
    runner.finish()?;
    Ok(())
}

fn main() {
    idiom_bench::init_logging();
    let cli = Cli::parse();
    let config = cli.run.resolve(&key_store::DEFAULTS);

    if let Err(e) = run(config, cli.skip_memory) {
        error!(error = %e, "experiment aborted");
        std::process::exit(1);
    }
    info!("experiment completed");
}
