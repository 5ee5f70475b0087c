//! Without the counting allocator installed, memory is reported as unsupported
//! rather than as zero.

use idiom_bench::alloc;
use idiom_bench::generate::DataGen;
use idiom_bench::measure::{CountingProbe, MemoryProbe};
use idiom_bench::report::Reporter;
use idiom_bench::runner::Runner;
use idiom_bench::workloads::key_store;
use idiom_bench::Scenario;

mod common;

#[test]
fn probe_reports_nothing() {
    let _v = vec![0u8; 1024];
    assert!(!alloc::installed());
    assert!(CountingProbe.snapshot().is_none());
}

#[test]
fn memory_plan_still_times() {
    let mut gen = DataGen::seeded(common::SEED);
    let report = key_store::fill().run(&mut gen, 100, &common::memory_plan()).unwrap();
    assert!(report.correct);
    assert!(report.candidates.iter().all(|c| c.memory.is_none()));
}

#[test]
fn sweep_prints_unsupported() {
    let config = common::run_config(&[], 1);
    let mut runner = Runner::with_reporter("key_store", config, Reporter::new(Vec::new(), false));
    runner.memory_sweep(&key_store::memory(), &[10]).unwrap();
    let text = String::from_utf8(runner.into_reporter().into_inner()).unwrap();
    assert!(text.contains("btree_map size: 10 memory used: unsupported"));
}
