//! Saving and loading JSON result files.

use std::time::Duration;

use idiom_bench::aggregate::{Accumulator, TrialResult};
use idiom_bench::measure::Sample;
use idiom_bench::recorder::{self, ResultRecorder};
use idiom_bench::schema::SCHEMA_VERSION;

fn report(size: usize) -> idiom_bench::AggregateReport {
    let names = vec!["for_loop".to_string(), "fold".to_string()];
    Accumulator::new("iteration", "sum", size, &names, 0)
        .add(TrialResult {
            trial: 0,
            samples: vec![
                Sample { elapsed: Duration::from_nanos(400), memory: None },
                Sample { elapsed: Duration::from_nanos(600), memory: None },
            ],
            correct: true,
        })
        .finish()
}

#[test]
fn save_then_load_round_trips_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut rec = ResultRecorder::new("iteration", Some(7));
    assert!(rec.is_empty());
    rec.record(&report(10));
    rec.record(&report(100));
    assert_eq!(rec.len(), 2);

    let path = rec.save(dir.path()).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("iteration-"));
    assert!(name.ends_with(".json"));
    assert!(!name.contains(':'));

    let file = recorder::load(&path).unwrap();
    assert_eq!(file.schema_version, SCHEMA_VERSION);
    assert_eq!(file.metadata.seed, Some(7));
    assert_eq!(file.experiments.len(), 2);

    let first = &file.experiments[0];
    assert_eq!(first.size, 10);
    assert_eq!(first.baseline, "for_loop");
    assert!(first.correct);
    assert_eq!(first.candidates[1].mean_ns, 600);
    let ratio = first.candidates[1].ratio.unwrap();
    assert!((ratio - 1.5).abs() < 1e-9);
}

#[test]
fn save_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let mut rec = ResultRecorder::new("alloc", None);
    rec.record(&report(1));
    let path = rec.save(&nested).unwrap();
    assert!(path.starts_with(&nested));
    assert!(path.exists());
}

#[test]
fn loading_garbage_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(recorder::load(&path).is_err());
    assert!(recorder::load(&dir.path().join("missing.json")).is_err());
}
