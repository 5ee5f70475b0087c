//! JSON result types.
//!
//! Written by [`crate::recorder::ResultRecorder`] and read back by the
//! `bench-compare` tool, so two runs can be diffed.

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateReport;

/// Current value of [`ResultsFile::schema_version`].
pub const SCHEMA_VERSION: u32 = 1;

/// Top-level result file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsFile {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Metadata about this run (hardware, git, timestamp).
    pub metadata: RunMetadata,
    /// One record per experiment and input size.
    pub experiments: Vec<ExperimentRecord>,
}

/// Metadata captured at the start of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// ISO 8601 timestamp of the run start.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_dirty: Option<bool>,
    pub crate_version: String,
    /// Data seed, when the run was reproducible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub hardware: HardwareInfo,
}

/// Hardware information for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareInfo {
    /// CPU model string.
    pub cpu: String,
    /// Number of logical cores.
    pub cores: usize,
    /// Total RAM in GB.
    pub ram_gb: u64,
    pub os: String,
    pub arch: String,
}

/// Aggregate of one experiment at one input size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub experiment: String,
    pub operation: String,
    pub size: usize,
    pub trials: usize,
    /// Name of the baseline candidate.
    pub baseline: String,
    pub correct: bool,
    pub candidates: Vec<CandidateRecord>,
}

/// Totals for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub total_ns: u64,
    pub mean_ns: u64,
    /// Time relative to the baseline; `null` when the baseline total was zero.
    pub ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub retained_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub allocated_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub memory_ratio: Option<f64>,
}

impl From<&AggregateReport> for ExperimentRecord {
    fn from(report: &AggregateReport) -> Self {
        Self {
            experiment: report.experiment.clone(),
            operation: report.operation.clone(),
            size: report.size,
            trials: report.trials,
            baseline: report.baseline().name.clone(),
            correct: report.correct,
            candidates: report
                .candidates
                .iter()
                .map(|c| CandidateRecord {
                    name: c.name.clone(),
                    total_ns: c.total.as_nanos() as u64,
                    mean_ns: c.mean.as_nanos() as u64,
                    ratio: Some(c.ratio).filter(|r| r.is_finite()),
                    retained_bytes: c.memory.map(|m| m.retained),
                    allocated_bytes: c.memory.map(|m| m.allocated),
                    memory_ratio: c.memory.map(|m| m.ratio),
                })
                .collect(),
        }
    }
}
