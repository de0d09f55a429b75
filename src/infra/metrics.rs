// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file, one row per
// reporting interval.
//
// Metrics recorded per row:
//   - step:     the training step the interval ended on
//   - avg_loss: average loss over the interval's batches
//
// Output file: checkpoints/metrics.csv
//
// Example CSV output:
//   step,avg_loss
//   2000,5.124500
//   4000,4.890100
//   ...
//
// How to read the metrics:
//   - avg_loss should decrease over time (the model is learning)
//   - A flat curve usually means the learning rate is too low,
//     a diverging one that it is too high
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single reporting interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepMetrics {
    /// The training step this interval ended on
    pub step: usize,

    /// Average loss over the interval's batches — lower is better.
    /// Random initialisation gives roughly ln(vocab_size)
    pub avg_loss: f64,
}

impl StepMetrics {
    pub fn new(step: usize, avg_loss: f64) -> Self {
        Self { step, avg_loss }
    }

    /// The CSV row for this record (no trailing newline)
    pub fn csv_row(&self) -> String {
        format!("{},{:.6}", self.step, self.avg_loss)
    }

    /// Returns true if this interval improved over the previous best loss
    pub fn is_improvement(&self, best_loss: f64) -> bool {
        self.avg_loss < best_loss
    }
}

/// Logs interval metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        // Write the header only if the file is new, so an existing log
        // keeps accumulating across runs
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "step,avg_loss")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one interval's metrics as a new row in the CSV.
    pub fn log(&self, m: &StepMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(f, "{}", m.csv_row())?;

        tracing::debug!("Logged step {} metrics: avg_loss={:.4}", m.step, m.avg_loss);
        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_row_format() {
        let m = StepMetrics::new(2000, 5.12345678);
        assert_eq!(m.csv_row(), "2000,5.123457");
    }

    #[test]
    fn test_is_improvement() {
        let m = StepMetrics::new(4000, 2.3);
        assert!(m.is_improvement(3.0));
        assert!(!m.is_improvement(2.0));
    }
}
