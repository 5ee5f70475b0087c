//! The bundled workloads run cleanly at small sizes.

use idiom_bench::generate::DataGen;
use idiom_bench::workloads::{allocation, iteration, key_store};
use idiom_bench::Scenario;

mod common;

fn run_all(scenarios: Vec<Box<dyn Scenario>>, size: usize) {
    let mut gen = DataGen::seeded(common::SEED);
    let plan = common::plan(1);
    for s in scenarios {
        s.warm_up(&mut gen, &idiom_bench::Plan { warmup_size: Some(size), ..plan.clone() })
            .unwrap();
        let report = s.run(&mut gen, size, &plan).unwrap();
        assert!(report.correct, "{}/{}", s.name(), s.operation());
        assert_eq!(report.trials, 1);
    }
}

#[test]
fn iteration_scenarios_agree() {
    run_all(iteration::scenarios(), 1_000);
}

#[test]
fn key_store_scenarios_agree() {
    run_all(key_store::scenarios(), 300);
}

#[test]
fn allocation_scenarios_agree() {
    run_all(allocation::scenarios(), 40);
}

#[test]
fn default_sizes_match_binaries() {
    assert_eq!(iteration::DEFAULTS.sizes.first(), Some(&1_000));
    assert!(allocation::DEFAULTS.memory);
    assert!(allocation::DEFAULTS.sizes.is_empty());
    assert!(allocation::scenarios().iter().all(|s| !s.sizes().is_empty()));
    assert_eq!(key_store::memory().sizes(), key_store::MEMORY_SIZES);
}
