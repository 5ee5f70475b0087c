//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use idiom_bench::config::RunConfig;
use idiom_bench::harness::{Candidate, Experiment, Plan};
use idiom_bench::check::exact;

// =============================================================================
// Plans and configs
// =============================================================================

pub const SEED: u64 = 42;

/// A short plan: a few trials, a couple of warm-up cycles, no memory.
pub fn plan(trials: usize) -> Plan {
    Plan {
        trials,
        warmup_cycles: 2,
        warmup_size: None,
        memory: false,
    }
}

pub fn memory_plan() -> Plan {
    Plan {
        trials: 1,
        warmup_cycles: 0,
        warmup_size: None,
        memory: true,
    }
}

pub fn run_config(sizes: &[usize], trials: usize) -> RunConfig {
    RunConfig {
        plan: plan(trials),
        sizes: sizes.to_vec(),
        sizes_overridden: true,
        seed: Some(SEED),
        save: false,
        results_dir: PathBuf::from("results"),
        quiet: false,
    }
}

// =============================================================================
// Experiments
// =============================================================================

/// Sums a fixed input regardless of the requested size.
pub fn fixed_sum(values: Vec<i64>) -> Experiment<Vec<i64>, i64> {
    Experiment::new(
        "fixed",
        "sum",
        move |_, _| values.clone(),
        exact::<i64>,
    )
    .candidate(Candidate::timed("loop", |v: &Vec<i64>| {
        let mut s = 0;
        for x in v {
            s += x;
        }
        s
    }))
    .candidate(Candidate::timed("iter_sum", |v: &Vec<i64>| v.iter().sum::<i64>()))
}

/// Like [`fixed_sum`] plus a candidate that is off by one.
pub fn broken_sum(values: Vec<i64>) -> Experiment<Vec<i64>, i64> {
    fixed_sum(values).candidate(Candidate::timed("off_by_one", |v: &Vec<i64>| {
        v.iter().sum::<i64>() + 1
    }))
}
