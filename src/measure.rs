//! Timing and memory measurement of a single candidate invocation.

use std::time::{Duration, Instant};

use crate::alloc;

/// Measure wall-clock time for a synchronous operation.
pub fn measure<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    (result, elapsed)
}

/// Heap counters at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapSnapshot {
    /// Bytes currently allocated.
    pub live: usize,
    /// Bytes allocated since process start.
    pub allocated: u64,
}

/// Heap change across a measured section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryDelta {
    /// Net growth of live bytes; negative when the section freed more than it kept.
    pub retained: i64,
    /// Bytes allocated inside the section, whether or not they were freed again.
    pub allocated: u64,
}

impl MemoryDelta {
    pub fn between(before: HeapSnapshot, after: HeapSnapshot) -> Self {
        Self {
            retained: after.live as i64 - before.live as i64,
            allocated: after.allocated.saturating_sub(before.allocated),
        }
    }
}

/// Optional heap introspection capability.
///
/// Runtimes differ in what they expose; both methods degrade instead of
/// failing when the capability is missing.
pub trait MemoryProbe {
    /// Ask the runtime to collect garbage. Returns whether a collection ran.
    fn try_force_collection(&self) -> bool;

    /// Current heap counters, or `None` when they cannot be read.
    fn snapshot(&self) -> Option<HeapSnapshot>;
}

/// Probe backed by [`alloc::CountingAllocator`].
///
/// Memory is freed deterministically on drop, so there is never anything to
/// collect.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingProbe;

impl MemoryProbe for CountingProbe {
    fn try_force_collection(&self) -> bool {
        false
    }

    fn snapshot(&self) -> Option<HeapSnapshot> {
        if !alloc::installed() {
            return None;
        }
        Some(HeapSnapshot {
            live: alloc::live_bytes(),
            allocated: alloc::allocated_bytes(),
        })
    }
}

/// Result of one measured section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub elapsed: Duration,
    pub memory: Option<MemoryDelta>,
}

/// Handed to a candidate for one invocation; the candidate wraps the code
/// under test in [`Meter::measure`] and keeps setup outside of it.
pub struct Meter<'a> {
    probe: Option<&'a dyn MemoryProbe>,
    sample: Option<Sample>,
    calls: usize,
}

impl<'a> Meter<'a> {
    pub fn new(probe: Option<&'a dyn MemoryProbe>) -> Self {
        Self {
            probe,
            sample: None,
            calls: 0,
        }
    }

    /// Time `f`, bracketing it with heap snapshots when a probe is attached.
    ///
    /// Snapshots are taken immediately around the timed region so that no
    /// other candidate's work lands between them.
    pub fn measure<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.calls += 1;
        let before = self.probe.and_then(|p| {
            p.try_force_collection();
            p.snapshot()
        });

        let (out, elapsed) = measure(f);

        let after = self.probe.and_then(|p| p.snapshot());
        let memory = match (before, after) {
            (Some(b), Some(a)) => Some(MemoryDelta::between(b, a)),
            _ => None,
        };
        self.sample = Some(Sample { elapsed, memory });
        out
    }

    /// The recorded sample, if `measure` ran exactly once.
    pub fn finish(self) -> Option<Sample> {
        if self.calls == 1 {
            self.sample
        } else {
            None
        }
    }
}
