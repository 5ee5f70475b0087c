//! Drives scenarios over their size sweeps, printing and recording results.

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::info;

use crate::aggregate::AggregateReport;
use crate::config::RunConfig;
use crate::error::Result;
use crate::generate::DataGen;
use crate::harness::{Plan, Scenario};
use crate::recorder::ResultRecorder;
use crate::report::Reporter;

pub struct Runner<W: Write> {
    gen: DataGen,
    config: RunConfig,
    reporter: Reporter<W>,
    recorder: Option<ResultRecorder>,
}

impl Runner<io::Stdout> {
    pub fn new(category: &str, config: RunConfig) -> Self {
        let reporter = Reporter::stdout(config.quiet);
        Self::with_reporter(category, config, reporter)
    }
}

impl<W: Write> Runner<W> {
    pub fn with_reporter(category: &str, config: RunConfig, reporter: Reporter<W>) -> Self {
        let recorder = config
            .save
            .then(|| ResultRecorder::new(category, config.seed));
        Self {
            gen: DataGen::new(config.seed),
            config,
            reporter,
            recorder,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    fn sizes_for<'a>(&'a self, scenario: &'a dyn Scenario) -> &'a [usize] {
        if !self.config.sizes_overridden && !scenario.sizes().is_empty() {
            scenario.sizes()
        } else {
            &self.config.sizes
        }
    }

    /// Warm every scenario up, then measure them size by size.
    ///
    /// Output is grouped by size; within a size, scenarios run in the order
    /// given. Returns on the first correctness failure.
    pub fn sweep(&mut self, scenarios: &[Box<dyn Scenario>]) -> Result<Vec<AggregateReport>> {
        let plan = self.config.plan.clone();

        info!(scenarios = scenarios.len(), cycles = plan.warmup_cycles, "warming up");
        for scenario in scenarios {
            scenario.warm_up(&mut self.gen, &plan)?;
        }
        info!("warm-up completed");

        let mut sizes: Vec<usize> = Vec::new();
        for scenario in scenarios {
            for &size in self.sizes_for(scenario.as_ref()) {
                if !sizes.contains(&size) {
                    sizes.push(size);
                }
            }
        }

        let mut reports = Vec::new();
        for size in sizes {
            self.reporter.section(&format!("Size: {}", size))?;
            for scenario in scenarios {
                if !self.sizes_for(scenario.as_ref()).contains(&size) {
                    continue;
                }
                info!(
                    experiment = scenario.name(),
                    operation = scenario.operation(),
                    size,
                    trials = plan.trials,
                    "measuring"
                );
                let report = scenario.run(&mut self.gen, size, &plan)?;
                self.emit(&report)?;
                reports.push(report);
            }
        }
        Ok(reports)
    }

    /// One memory-enabled trial per size, reported as retained bytes per
    /// candidate. No warm-up: retained size does not depend on it.
    pub fn memory_sweep(&mut self, scenario: &dyn Scenario, sizes: &[usize]) -> Result<Vec<AggregateReport>> {
        let plan = Plan {
            trials: 1,
            warmup_cycles: 0,
            warmup_size: None,
            memory: true,
        };
        self.reporter.section("Memory consumption")?;

        let mut reports = Vec::new();
        for &size in sizes {
            let report = scenario.run(&mut self.gen, size, &plan)?;
            for c in &report.candidates {
                self.reporter
                    .memory_usage(&c.name, size, c.memory.map(|m| m.retained))?;
            }
            if let Some(rec) = self.recorder.as_mut() {
                rec.record(&report);
            }
            reports.push(report);
        }
        Ok(reports)
    }

    fn emit(&mut self, report: &AggregateReport) -> Result<()> {
        self.reporter.report(report)?;
        if let Some(rec) = self.recorder.as_mut() {
            rec.record(report);
        }
        Ok(())
    }

    /// Save recorded results when `--save` was given.
    pub fn finish(self) -> Result<Option<PathBuf>> {
        match self.recorder {
            Some(rec) if !rec.is_empty() => Ok(Some(rec.save(&self.config.results_dir)?)),
            _ => Ok(None),
        }
    }

    pub fn into_reporter(self) -> Reporter<W> {
        self.reporter
    }
}
