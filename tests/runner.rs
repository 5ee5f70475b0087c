//! Size sweeps driven through the runner, with output captured in memory.

use idiom_bench::report::Reporter;
use idiom_bench::runner::Runner;
use idiom_bench::workloads::{iteration, key_store};
use idiom_bench::Scenario;

mod common;

fn output(runner: Runner<Vec<u8>>) -> String {
    String::from_utf8(runner.into_reporter().into_inner()).unwrap()
}

#[test]
fn sweep_groups_reports_by_size() {
    let config = common::run_config(&[10, 100], 2);
    let mut runner = Runner::with_reporter("iteration", config, Reporter::new(Vec::new(), false));
    let reports = runner.sweep(&iteration::scenarios()).unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].size, 10);
    assert_eq!(reports[1].size, 100);
    assert!(reports.iter().all(|r| r.correct));

    let text = output(runner);
    let first = text.find("=== Size: 10 ===").unwrap();
    let second = text.find("=== Size: 100 ===").unwrap();
    assert!(first < second);
    assert!(text.contains("--- iteration/sum (size 10, 2 trials) ---"));
    assert!(text.contains("correct: true"));
    assert!(text.contains("baseline"));
}

#[test]
fn quiet_output_prints_only_ratios() {
    let mut config = common::run_config(&[50], 1);
    config.quiet = true;
    let mut runner = Runner::with_reporter("iteration", config, Reporter::new(Vec::new(), true));
    runner.sweep(&iteration::scenarios()).unwrap();

    let text = output(runner);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("iteration/sum/50: for_each vs for_loop = "));
    assert!(!text.contains("==="));
}

#[test]
fn scenario_sizes_apply_unless_overridden() {
    let mut config = common::run_config(&[], 1);
    config.sizes_overridden = false;
    let scenarios: Vec<Box<dyn Scenario>> = vec![
        Box::new(key_store::exists().with_sizes(&[20, 40])),
        Box::new(key_store::get().with_sizes(&[40])),
    ];
    let mut runner = Runner::with_reporter("key_store", config, Reporter::new(Vec::new(), false));
    let reports = runner.sweep(&scenarios).unwrap();

    let seen: Vec<(&str, usize)> = reports.iter().map(|r| (r.operation.as_str(), r.size)).collect();
    assert_eq!(seen, vec![("exists", 20), ("exists", 40), ("get", 40)]);
}

#[test]
fn mismatch_stops_the_sweep() {
    let config = common::run_config(&[3, 4], 1);
    let scenarios: Vec<Box<dyn Scenario>> = vec![Box::new(common::broken_sum(vec![1, 2, 3]))];
    let mut runner = Runner::with_reporter("broken", config, Reporter::new(Vec::new(), false));
    assert!(runner.sweep(&scenarios).is_err());
    assert!(!output(runner).contains("correct:"));
}

#[test]
fn saving_writes_into_results_dir() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::run_config(&[10], 1);
    config.save = true;
    config.results_dir = dir.path().to_path_buf();

    let mut runner = Runner::with_reporter("iteration", config, Reporter::new(Vec::new(), false));
    runner.sweep(&iteration::scenarios()).unwrap();
    let path = runner.finish().unwrap().unwrap();
    assert!(path.starts_with(dir.path()));

    let file = idiom_bench::recorder::load(&path).unwrap();
    assert_eq!(file.experiments.len(), 1);
    assert_eq!(file.metadata.seed, Some(common::SEED));
}

#[test]
fn nothing_saved_without_flag() {
    let config = common::run_config(&[10], 1);
    let mut runner = Runner::with_reporter("iteration", config, Reporter::new(Vec::new(), false));
    runner.sweep(&iteration::scenarios()).unwrap();
    assert!(runner.finish().unwrap().is_none());
}
