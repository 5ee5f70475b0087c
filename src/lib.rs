//! Microbenchmarks comparing semantically equivalent Rust idioms.
//!
//! Every experiment follows the same pipeline:
//!
//! - generate synthetic input ([`generate`]),
//! - warm up and time each candidate on identical input ([`measure`], [`harness`]),
//! - verify the candidates agree ([`check`]), aborting on the first mismatch,
//! - fold trials into totals and ratios ([`aggregate`]),
//! - print a grouped report ([`report`]) and optionally save JSON ([`recorder`]).
//!
//! The sample workloads live in [`workloads`]; each has a standalone binary.
//!
//! ```rust,no_run
//! use idiom_bench::{generate::DataGen, harness::{Plan, Scenario}, workloads::iteration};
//!
//! let experiment = iteration::experiment();
//! let mut gen = DataGen::seeded(7);
//! let report = experiment.run(&mut gen, 10_000, &Plan::default()).unwrap();
//! println!("correct: {}", report.correct);
//! ```

#![warn(clippy::all)]

pub mod aggregate;
pub mod alloc;
pub mod check;
pub mod config;
pub mod error;
pub mod generate;
pub mod harness;
pub mod measure;
pub mod recorder;
pub mod report;
pub mod runner;
pub mod schema;
pub mod workloads;

pub use aggregate::AggregateReport;
pub use error::{HarnessError, Result};
pub use harness::{Candidate, Experiment, Plan, Scenario};
pub use measure::Meter;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
