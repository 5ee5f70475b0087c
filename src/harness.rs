//! Generic experiment harness.
//!
//! An [`Experiment`] bundles an input generator, named [`Candidate`]s and an
//! equality predicate. Each run walks Generate -> Warm-up -> Measure ->
//! Aggregate; the first disagreement between candidates aborts the run and
//! no report is produced.

use tracing::debug;

use crate::aggregate::{Accumulator, AggregateReport, TrialResult};
use crate::check::{check_outputs, Equality};
use crate::error::{HarnessError, Result};
use crate::generate::DataGen;
use crate::measure::{CountingProbe, Meter, MemoryProbe, Sample};

static PROBE: CountingProbe = CountingProbe;

/// How much work one experiment does per input size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Measured trials per size.
    pub trials: usize,
    /// Unmeasured cycles run once before the first size.
    pub warmup_cycles: usize,
    /// Input size for warm-up; `None` uses the experiment's first size.
    pub warmup_size: Option<usize>,
    /// Take heap snapshots around every measured section.
    pub memory: bool,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            trials: 20,
            warmup_cycles: 100,
            warmup_size: None,
            memory: false,
        }
    }
}

type Run<I, O> = Box<dyn Fn(&I, &mut Meter<'_>) -> O>;

/// One implementation variant under comparison.
///
/// The closure receives the shared input and a [`Meter`]. Setup that must
/// not be timed (building a store to query, cloning input to consume) goes
/// outside `meter.measure`, the operation itself inside it.
pub struct Candidate<I, O> {
    name: String,
    run: Run<I, O>,
}

impl<I: 'static, O: 'static> Candidate<I, O> {
    pub fn new<F>(name: &str, run: F) -> Self
    where
        F: Fn(&I, &mut Meter<'_>) -> O + 'static,
    {
        Self {
            name: name.to_string(),
            run: Box::new(run),
        }
    }

    /// Candidate whose whole body is the measured operation.
    pub fn timed<F>(name: &str, op: F) -> Self
    where
        F: Fn(&I) -> O + 'static,
    {
        Self::new(name, move |input, meter| meter.measure(|| op(input)))
    }
}

impl<I, O> Candidate<I, O> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Anything the [`Runner`](crate::runner::Runner) can warm up and measure.
pub trait Scenario {
    fn name(&self) -> &str;

    fn operation(&self) -> &str;

    /// Input sizes this scenario sweeps when none are configured.
    fn sizes(&self) -> &[usize];

    /// Run every candidate `plan.warmup_cycles` times without recording.
    fn warm_up(&self, gen: &mut DataGen, plan: &Plan) -> Result<()>;

    /// Measure `plan.trials` trials at `size`.
    fn run(&self, gen: &mut DataGen, size: usize, plan: &Plan) -> Result<AggregateReport>;
}

/// A named comparison between semantically equivalent candidates.
pub struct Experiment<I, O> {
    name: String,
    operation: String,
    generate: Box<dyn Fn(&mut DataGen, usize) -> I>,
    candidates: Vec<Candidate<I, O>>,
    equality: Equality<O>,
    validate: Option<Box<dyn Fn(&O) -> bool>>,
    baseline: usize,
    sizes: Vec<usize>,
    warmup_multiplier: usize,
}

impl<I: 'static, O: 'static> Experiment<I, O> {
    pub fn new<G, E>(name: &str, operation: &str, generate: G, equality: E) -> Self
    where
        G: Fn(&mut DataGen, usize) -> I + 'static,
        E: Fn(&O, &O) -> bool + 'static,
    {
        Self {
            name: name.to_string(),
            operation: operation.to_string(),
            generate: Box::new(generate),
            candidates: Vec::new(),
            equality: Box::new(equality),
            validate: None,
            baseline: 0,
            sizes: Vec::new(),
            warmup_multiplier: 1,
        }
    }

    pub fn candidate(mut self, candidate: Candidate<I, O>) -> Self {
        self.candidates.push(candidate);
        self
    }

    /// Index of the candidate other totals are divided by. Defaults to 0.
    pub fn baseline(mut self, index: usize) -> Self {
        self.baseline = index;
        self
    }

    /// Reject outputs that agree with each other but are still wrong,
    /// such as a store that is not empty after clearing.
    pub fn validate<V>(mut self, check: V) -> Self
    where
        V: Fn(&O) -> bool + 'static,
    {
        self.validate = Some(Box::new(check));
        self
    }

    pub fn with_sizes(mut self, sizes: &[usize]) -> Self {
        self.sizes = sizes.to_vec();
        self
    }

    /// Run `factor` times the planned warm-up cycles. Cheap loops need more
    /// iterations than expensive ones before their timing settles.
    pub fn warmup_multiplier(mut self, factor: usize) -> Self {
        self.warmup_multiplier = factor;
        self
    }
}

impl<I, O> Experiment<I, O> {
    pub fn candidate_names(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.name.clone()).collect()
    }

    fn ensure_runnable(&self) -> Result<()> {
        if self.candidates.is_empty() {
            return Err(HarnessError::NoCandidates {
                experiment: self.name.clone(),
            });
        }
        if self.baseline >= self.candidates.len() {
            return Err(HarnessError::BadBaseline {
                experiment: self.name.clone(),
                index: self.baseline,
            });
        }
        Ok(())
    }

    /// Run every candidate once on `input`, back to back, then check outputs.
    fn run_candidates(
        &self,
        input: &I,
        probe: Option<&dyn MemoryProbe>,
        trial: Option<usize>,
    ) -> Result<(Vec<O>, Vec<Sample>)> {
        let mut outputs = Vec::with_capacity(self.candidates.len());
        let mut samples = Vec::with_capacity(self.candidates.len());

        for candidate in &self.candidates {
            let mut meter = Meter::new(probe);
            let out = (candidate.run)(input, &mut meter);
            let sample = meter.finish().ok_or_else(|| HarnessError::Unmeasured {
                experiment: self.name.clone(),
                candidate: candidate.name.clone(),
            })?;
            outputs.push(out);
            samples.push(sample);
        }

        if let Some(check) = &self.validate {
            if let Some(bad) = outputs.iter().position(|o| !check(o)) {
                let err = HarnessError::InvalidOutput {
                    experiment: self.name.clone(),
                    candidate: self.candidates[bad].name.clone(),
                    trial,
                };
                debug!(error = %err, "candidate output rejected");
                return Err(err);
            }
        }

        if let Err(bad) = check_outputs(&outputs, self.baseline, &*self.equality) {
            let err = HarnessError::Mismatch {
                experiment: self.name.clone(),
                operation: self.operation.clone(),
                baseline: self.candidates[self.baseline].name.clone(),
                candidate: self.candidates[bad].name.clone(),
                trial,
            };
            debug!(error = %err, "candidates disagree");
            return Err(err);
        }

        Ok((outputs, samples))
    }
}

impl<I, O> Scenario for Experiment<I, O> {
    fn name(&self) -> &str {
        &self.name
    }

    fn operation(&self) -> &str {
        &self.operation
    }

    fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    fn warm_up(&self, gen: &mut DataGen, plan: &Plan) -> Result<()> {
        self.ensure_runnable()?;
        let cycles = plan.warmup_cycles.saturating_mul(self.warmup_multiplier);
        if cycles == 0 {
            return Ok(());
        }
        let size = plan
            .warmup_size
            .or_else(|| self.sizes.first().copied())
            .unwrap_or(0);
        debug!(
            experiment = %self.name,
            operation = %self.operation,
            cycles,
            size,
            "warming up"
        );
        for _ in 0..cycles {
            let input = (self.generate)(gen, size);
            self.run_candidates(&input, None, None)?;
        }
        Ok(())
    }

    fn run(&self, gen: &mut DataGen, size: usize, plan: &Plan) -> Result<AggregateReport> {
        self.ensure_runnable()?;
        let probe: Option<&dyn MemoryProbe> = if plan.memory { Some(&PROBE) } else { None };
        let names = self.candidate_names();
        let mut acc = Accumulator::new(&self.name, &self.operation, size, &names, self.baseline);

        for trial in 0..plan.trials {
            let input = (self.generate)(gen, size);
            let (outputs, samples) = self.run_candidates(&input, probe, Some(trial))?;
            debug!(
                experiment = %self.name,
                operation = %self.operation,
                size,
                trial,
                "trial complete"
            );
            drop(outputs);
            acc = acc.add(TrialResult {
                trial,
                samples,
                correct: true,
            });
        }

        Ok(acc.finish())
    }
}
