//! Result comparison tool.
//!
//! Compares two JSON result files and prints a table of mean-time deltas per
//! experiment, size and candidate.
//!
//! Usage: `cargo run --bin bench-compare -- <baseline.json> <candidate.json>`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::error;

use idiom_bench::recorder;
use idiom_bench::report::format_duration;
use idiom_bench::schema::{CandidateRecord, ResultsFile};

#[derive(Debug, Parser)]
#[command(version, about = "Compare two saved result files")]
struct Cli {
    /// Earlier result file
    baseline: PathBuf,
    /// Newer result file
    candidate: PathBuf,
}

type Key = (String, String, usize, String);

fn index(file: &ResultsFile) -> HashMap<Key, &CandidateRecord> {
    let mut map = HashMap::new();
    for exp in &file.experiments {
        for c in &exp.candidates {
            map.insert(
                (exp.experiment.clone(), exp.operation.clone(), exp.size, c.name.clone()),
                c,
            );
        }
    }
    map
}

fn load(path: &Path) -> ResultsFile {
    recorder::load(path).unwrap_or_else(|e| {
        error!(path = %path.display(), error = %e, "cannot load result file");
        std::process::exit(1);
    })
}

fn main() {
    idiom_bench::init_logging();
    let cli = Cli::parse();

    let baseline = load(&cli.baseline);
    let candidate = load(&cli.candidate);
    let base_map = index(&baseline);
    let cand_map = index(&candidate);

    eprintln!("Baseline: {} ({})", cli.baseline.display(), baseline.metadata.timestamp);
    eprintln!("Candidate: {} ({})", cli.candidate.display(), candidate.metadata.timestamp);
    eprintln!();

    println!(
        "{:<48} | {:>12} | {:>12} | {:>8}",
        "Benchmark", "Base mean", "New mean", "Delta"
    );
    println!("{}", "-".repeat(90));

    let mut matched = 0u32;
    let mut only_cand = 0u32;

    let mut keys: Vec<&Key> = cand_map.keys().collect();
    keys.sort();
    for key in keys {
        let cand = cand_map[key];
        match base_map.get(key) {
            Some(base) => {
                matched += 1;
                let label = format!("{}/{}/{}/{}", key.0, key.1, key.2, key.3);
                print_comparison(&label, base, cand);
            }
            None => only_cand += 1,
        }
    }
    let only_base = base_map.keys().filter(|k| !cand_map.contains_key(*k)).count();

    println!("{}", "-".repeat(90));
    println!(
        "Compared: {} | Baseline only: {} | Candidate only: {}",
        matched, only_base, only_cand
    );
}

fn print_comparison(name: &str, base: &CandidateRecord, cand: &CandidateRecord) {
    let delta_pct = if base.mean_ns > 0 {
        ((cand.mean_ns as f64 - base.mean_ns as f64) / base.mean_ns as f64) * 100.0
    } else {
        0.0
    };

    let hint = if delta_pct < -1.0 {
        "faster"
    } else if delta_pct > 1.0 {
        "slower"
    } else {
        "~same"
    };

    println!(
        "{:<48} | {:>12} | {:>12} | {:>+.1}% ({})",
        name,
        format_duration(std::time::Duration::from_nanos(base.mean_ns)),
        format_duration(std::time::Duration::from_nanos(cand.mean_ns)),
        delta_pct,
        hint,
    );
}
