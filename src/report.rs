//! Human-readable reporting.
//!
//! Output is grouped: a size header, then one block per operation with
//! absolute totals, ratios against the baseline and the correctness flag.

use std::io::{self, Write};
use std::time::Duration;

use crate::aggregate::{AggregateReport, CandidateSummary};

const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Scale a byte count to B/KB/MB/GB with at most two decimals.
///
/// Trailing zeros are dropped: `1536` formats as `1.5 KB`.
pub fn format_bytes(bytes: i64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let sign = if bytes < 0 { "-" } else { "" };
    let mut value = bytes.unsigned_abs() as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{}{} {}", sign, trim_decimals(value), BYTE_UNITS[unit])
}

fn trim_decimals(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

pub fn format_duration(d: Duration) -> String {
    let ns = d.as_nanos();
    if ns < 1_000 {
        format!("{} ns", ns)
    } else if ns < 1_000_000 {
        format!("{:.2} us", ns as f64 / 1_000.0)
    } else if ns < 1_000_000_000 {
        format!("{:.2} ms", ns as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", ns as f64 / 1_000_000_000.0)
    }
}

/// `2.31x`, or `n/a` for the zero-baseline sentinel.
pub fn format_ratio(ratio: f64) -> String {
    if ratio.is_finite() {
        format!("{:.2}x", ratio)
    } else {
        "n/a".to_string()
    }
}

/// Writes reports to a sink, stdout by default.
pub struct Reporter<W: Write> {
    out: W,
    quiet: bool,
}

impl Reporter<io::Stdout> {
    pub fn stdout(quiet: bool) -> Self {
        Self::new(io::stdout(), quiet)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Group header, e.g. the input size of a sweep step.
    pub fn section(&mut self, title: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(self.out, "\n=== {} ===", title)?;
        }
        Ok(())
    }

    pub fn report(&mut self, report: &AggregateReport) -> io::Result<()> {
        if self.quiet {
            return self.report_quiet(report);
        }

        writeln!(
            self.out,
            "--- {}/{} (size {}, {} trials) ---",
            report.experiment, report.operation, report.size, report.trials
        )?;
        let width = report
            .candidates
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max(8);

        for (i, c) in report.candidates.iter().enumerate() {
            let role = if i == report.baseline {
                "baseline".to_string()
            } else {
                format!("ratio {}", format_ratio(c.ratio))
            };
            writeln!(
                self.out,
                "  {:<width$}  total {:>11}  mean {:>11}  {}",
                c.name,
                format_duration(c.total),
                format_duration(c.mean),
                role,
                width = width
            )?;
            self.memory_line(c)?;
        }
        writeln!(self.out, "  correct: {}", report.correct)?;
        Ok(())
    }

    fn memory_line(&mut self, c: &CandidateSummary) -> io::Result<()> {
        match c.memory {
            Some(m) => writeln!(
                self.out,
                "    memory: retained {}, allocated {} ({} of baseline)",
                format_bytes(m.retained),
                format_bytes(m.allocated.min(i64::MAX as u64) as i64),
                format_ratio(m.ratio)
            ),
            None => Ok(()),
        }
    }

    fn report_quiet(&mut self, report: &AggregateReport) -> io::Result<()> {
        let baseline = &report.baseline().name;
        for c in report.alternatives() {
            writeln!(
                self.out,
                "{}/{}/{}: {} vs {} = {}",
                report.experiment,
                report.operation,
                report.size,
                c.name,
                baseline,
                format_ratio(c.ratio)
            )?;
        }
        Ok(())
    }

    /// Standalone memory line used by the retained-size sweeps.
    pub fn memory_usage(&mut self, label: &str, entries: usize, retained: Option<i64>) -> io::Result<()> {
        match retained {
            Some(bytes) => writeln!(
                self.out,
                "  {} size: {} memory used: {}",
                label,
                entries,
                format_bytes(bytes)
            ),
            None => writeln!(self.out, "  {} size: {} memory used: unsupported", label, entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_scale_and_trim() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1024 * 1024), "1 MB");
        assert_eq!(format_bytes(-2048), "-2 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn ratio_sentinel_prints_na() {
        assert_eq!(format_ratio(f64::INFINITY), "n/a");
        assert_eq!(format_ratio(1.5), "1.50x");
    }

    #[test]
    fn durations_pick_unit() {
        assert_eq!(format_duration(Duration::from_nanos(999)), "999 ns");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.50 ms");
    }
}
