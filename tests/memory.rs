//! Heap measurement with the counting allocator installed.
//!
//! Other test threads allocate concurrently, so assertions are lower bounds.

use idiom_bench::alloc::{self, CountingAllocator};
use idiom_bench::check::exact;
use idiom_bench::generate::DataGen;
use idiom_bench::harness::{Candidate, Experiment, Scenario};
use idiom_bench::measure::{CountingProbe, MemoryProbe};
use idiom_bench::report::Reporter;
use idiom_bench::runner::Runner;
use idiom_bench::workloads::{allocation, key_store};

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator;

mod common;

#[test]
fn probe_sees_allocations() {
    let probe = CountingProbe;
    let before = probe.snapshot().unwrap();
    let v: Vec<u64> = std::hint::black_box(Vec::with_capacity(4_096));
    let after = probe.snapshot().unwrap();

    assert!(alloc::installed());
    assert!(!probe.try_force_collection());
    assert!(after.allocated >= before.allocated + 4_096 * 8);
    drop(v);
}

#[test]
fn memory_plan_reports_allocated_bytes() {
    let exp: Experiment<Vec<i64>, usize> =
        Experiment::new("mem", "grow", |_, n| vec![0; n], exact::<usize>)
            .candidate(Candidate::timed("collect", |v: &Vec<i64>| {
                let copy: Vec<i64> = v.iter().map(|x| x + 1).collect();
                copy.len()
            }))
            .candidate(Candidate::timed("len", |v: &Vec<i64>| v.len()));

    let mut gen = DataGen::seeded(common::SEED);
    let report = exp.run(&mut gen, 10_000, &common::memory_plan()).unwrap();

    let collect = report.candidates[0].memory.unwrap();
    assert!(collect.allocated >= 10_000 * 8);
}

#[test]
fn in_place_concat_allocates_less() {
    let mut gen = DataGen::seeded(common::SEED);
    let report = allocation::concat().run(&mut gen, 500, &common::memory_plan()).unwrap();
    assert!(report.correct);

    let copy = report.candidates[0].memory.unwrap();
    let in_place = report.baseline().memory.unwrap();
    assert_eq!(report.baseline().name, "extend_in_place");
    assert!(copy.allocated > in_place.allocated);
}

#[test]
fn memory_sweep_prints_retained_sizes() {
    let config = common::run_config(&[], 1);
    let mut runner = Runner::with_reporter("key_store", config, Reporter::new(Vec::new(), false));
    let reports = runner.memory_sweep(&key_store::memory(), &[100, 1_000]).unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.candidates.iter().all(|c| c.memory.is_some())));

    let text = String::from_utf8(runner.into_reporter().into_inner()).unwrap();
    assert!(text.contains("=== Memory consumption ==="));
    assert!(text.contains("hash_map size: 1000 memory used: "));
    assert!(!text.contains("unsupported"));
}
