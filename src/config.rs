//! Command-line configuration shared by the experiment binaries.

use std::path::PathBuf;

use clap::Args;

use crate::harness::Plan;

/// Per-binary defaults, mirroring the constants of each experiment.
#[derive(Debug, Clone, Copy)]
pub struct Defaults {
    pub trials: usize,
    pub warmup_cycles: usize,
    pub warmup_size: Option<usize>,
    /// Empty means every scenario sweeps its own sizes.
    pub sizes: &'static [usize],
    pub memory: bool,
}

/// Flags accepted by every experiment binary.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Measured trials per input size
    #[arg(long)]
    pub trials: Option<usize>,

    /// Warm-up cycles before the first measured trial
    #[arg(long)]
    pub warmup: Option<usize>,

    /// Input size used during warm-up
    #[arg(long)]
    pub warmup_size: Option<usize>,

    /// Comma-separated input sizes to sweep
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<usize>>,

    /// Seed for reproducible input data (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Measure heap deltas around every measured section
    #[arg(long)]
    pub memory: bool,

    /// Write a JSON result file
    #[arg(long)]
    pub save: bool,

    /// Directory for JSON result files
    #[arg(long, default_value = "results")]
    pub results_dir: PathBuf,

    /// Only print ratio lines
    #[arg(short, long)]
    pub quiet: bool,
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub plan: Plan,
    pub sizes: Vec<usize>,
    /// Whether `sizes` came from the command line and applies to every scenario.
    pub sizes_overridden: bool,
    pub seed: Option<u64>,
    pub save: bool,
    pub results_dir: PathBuf,
    pub quiet: bool,
}

impl RunArgs {
    pub fn resolve(&self, defaults: &Defaults) -> RunConfig {
        RunConfig {
            plan: Plan {
                trials: self.trials.unwrap_or(defaults.trials),
                warmup_cycles: self.warmup.unwrap_or(defaults.warmup_cycles),
                warmup_size: self.warmup_size.or(defaults.warmup_size),
                memory: self.memory || defaults.memory,
            },
            sizes: self
                .sizes
                .clone()
                .unwrap_or_else(|| defaults.sizes.to_vec()),
            sizes_overridden: self.sizes.is_some(),
            seed: self.seed,
            save: self.save,
            results_dir: self.results_dir.clone(),
            quiet: self.quiet,
        }
    }
}
