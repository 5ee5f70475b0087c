//! Folding trial results into a per-experiment summary.
//!
//! The accumulator is a plain value passed through the trial loop and
//! consumed by [`Accumulator::finish`]; nothing is shared across experiments.

use std::time::Duration;

use crate::measure::{MemoryDelta, Sample};

/// One measured trial: a sample per candidate, in registration order.
#[derive(Debug, Clone)]
pub struct TrialResult {
    pub trial: usize,
    pub samples: Vec<Sample>,
    /// Whether every candidate agreed with the baseline.
    pub correct: bool,
}

/// Memory totals for one candidate across all trials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemorySummary {
    pub retained: i64,
    pub allocated: u64,
    /// Allocated bytes relative to the baseline's, baseline clamped to one byte.
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSummary {
    pub name: String,
    pub total: Duration,
    pub mean: Duration,
    /// `total / baseline_total`; [`f64::INFINITY`] when the baseline total is zero.
    pub ratio: f64,
    /// `None` when memory was not measured or the probe was unavailable.
    pub memory: Option<MemorySummary>,
}

/// Summary of one experiment at one input size.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub experiment: String,
    pub operation: String,
    pub size: usize,
    pub trials: usize,
    pub baseline: usize,
    pub candidates: Vec<CandidateSummary>,
    /// AND of every trial's correctness flag.
    pub correct: bool,
}

impl AggregateReport {
    pub fn baseline(&self) -> &CandidateSummary {
        &self.candidates[self.baseline]
    }

    /// Candidates other than the baseline.
    pub fn alternatives(&self) -> impl Iterator<Item = &CandidateSummary> {
        let baseline = self.baseline;
        self.candidates
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != baseline)
            .map(|(_, c)| c)
    }
}

/// `total / baseline`, or [`f64::INFINITY`] when `baseline` is zero.
pub fn time_ratio(total: Duration, baseline: Duration) -> f64 {
    if baseline.is_zero() {
        f64::INFINITY
    } else {
        total.as_secs_f64() / baseline.as_secs_f64()
    }
}

/// `allocated / max(baseline, 1)`.
pub fn memory_ratio(allocated: u64, baseline: u64) -> f64 {
    allocated as f64 / baseline.max(1) as f64
}

/// `total / trials`, exact while the trial count fits a `u32`.
pub fn mean(total: Duration, trials: usize) -> Duration {
    match u32::try_from(trials) {
        Ok(0) => Duration::ZERO,
        Ok(n) => total / n,
        Err(_) => total.div_f64(trials as f64),
    }
}

#[derive(Debug, Clone)]
struct Running {
    name: String,
    total: Duration,
    memory: Option<MemoryDelta>,
}

/// Running totals for one experiment.
#[derive(Debug, Clone)]
pub struct Accumulator {
    experiment: String,
    operation: String,
    size: usize,
    baseline: usize,
    running: Vec<Running>,
    trials: usize,
    correct: bool,
}

impl Accumulator {
    pub fn new(experiment: &str, operation: &str, size: usize, names: &[String], baseline: usize) -> Self {
        Self {
            experiment: experiment.to_string(),
            operation: operation.to_string(),
            size,
            baseline,
            running: names
                .iter()
                .map(|name| Running {
                    name: name.clone(),
                    total: Duration::ZERO,
                    memory: Some(MemoryDelta::default()),
                })
                .collect(),
            trials: 0,
            correct: true,
        }
    }

    /// Fold one trial in.
    pub fn add(mut self, result: TrialResult) -> Self {
        for (run, sample) in self.running.iter_mut().zip(&result.samples) {
            run.total += sample.elapsed;
            run.memory = match (run.memory, sample.memory) {
                (Some(acc), Some(d)) => Some(MemoryDelta {
                    retained: acc.retained + d.retained,
                    allocated: acc.allocated + d.allocated,
                }),
                _ => None,
            };
        }
        self.trials += 1;
        self.correct &= result.correct;
        self
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn finish(self) -> AggregateReport {
        let baseline_total = self
            .running
            .get(self.baseline)
            .map(|r| r.total)
            .unwrap_or_default();
        let baseline_alloc = self
            .running
            .get(self.baseline)
            .and_then(|r| r.memory)
            .map(|m| m.allocated)
            .unwrap_or(0);
        // Zero trials means no memory was measured either.
        let measured = self.trials > 0;

        let candidates = self
            .running
            .into_iter()
            .map(|run| CandidateSummary {
                mean: mean(run.total, self.trials),
                ratio: time_ratio(run.total, baseline_total),
                memory: run.memory.filter(|_| measured).map(|m| MemorySummary {
                    retained: m.retained,
                    allocated: m.allocated,
                    ratio: memory_ratio(m.allocated, baseline_alloc),
                }),
                total: run.total,
                name: run.name,
            })
            .collect();

        AggregateReport {
            experiment: self.experiment,
            operation: self.operation,
            size: self.size,
            trials: self.trials,
            baseline: self.baseline,
            candidates,
            correct: self.correct,
        }
    }
}
