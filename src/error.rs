//! Error taxonomy for experiment runs.
//!
//! Every variant except the I/O and JSON ones aborts the experiment that
//! raised it: timing data gathered before a correctness failure is discarded.

use thiserror::Error;

/// Errors raised while running or recording an experiment.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Two candidates disagreed on the output for identical input.
    #[error(
        "{experiment}/{operation}: `{candidate}` disagrees with baseline `{baseline}` ({})",
        trial_label(.trial)
    )]
    Mismatch {
        experiment: String,
        operation: String,
        baseline: String,
        candidate: String,
        /// `None` when the mismatch was detected during warm-up.
        trial: Option<usize>,
    },

    /// An output was rejected by the experiment's validation predicate.
    #[error("{experiment}: output of `{candidate}` failed validation ({})", trial_label(.trial))]
    InvalidOutput {
        experiment: String,
        candidate: String,
        trial: Option<usize>,
    },

    /// A candidate returned without running its measured section exactly once.
    #[error("{experiment}: candidate `{candidate}` must call Meter::measure exactly once")]
    Unmeasured {
        experiment: String,
        candidate: String,
    },

    #[error("{experiment}: no candidates registered")]
    NoCandidates { experiment: String },

    #[error("{experiment}: baseline index {index} out of range")]
    BadBaseline { experiment: String, index: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    /// Whether this error means the candidates computed different results.
    pub fn is_correctness_failure(&self) -> bool {
        matches!(self, Self::Mismatch { .. } | Self::InvalidOutput { .. })
    }
}

fn trial_label(trial: &Option<usize>) -> String {
    match trial {
        Some(t) => format!("trial {}", t),
        None => "warm-up".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
