//! Per-file outcomes and the batch report they fold into
//!
//! A failing file is a value, not an early return: the batch keeps going and
//! the failure shows up in the summary.

use ewp_common::human_bytes::{format_bytes, format_savings};
use ewp_common::imaging::{Dimensions, EncodedVariant};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Number of failures repeated in the end-of-batch summary
pub const SUMMARY_FAILURE_LIMIT: usize = 5;

/// A successfully optimized source image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedImage {
    pub source: PathBuf,
    pub role: String,
    pub source_dimensions: Dimensions,
    pub input_bytes: u64,
    pub variants: Vec<EncodedVariant>,
}

impl ConvertedImage {
    pub fn output_bytes(&self) -> u64 {
        self.variants.iter().map(|v| v.bytes).sum()
    }
}

/// Result of processing one source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Converted(ConvertedImage),
    /// Nothing to do (e.g. zero-sized frame)
    Skipped { file: String, reason: String },
    Failed { file: String, message: String },
}

/// A failure as listed in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub file: String,
    pub message: String,
}

/// Aggregate counts for one optimizer run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub by_role: BTreeMap<String, usize>,
    pub failures: Vec<Failure>,
}

impl BatchReport {
    /// Fold step: account for one outcome
    pub fn record(mut self, outcome: &FileOutcome) -> Self {
        match outcome {
            FileOutcome::Converted(converted) => {
                self.processed += 1;
                self.input_bytes += converted.input_bytes;
                self.output_bytes += converted.output_bytes();
                *self.by_role.entry(converted.role.clone()).or_insert(0) += 1;
            }
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Failed { file, message } => {
                self.failed += 1;
                self.failures.push(Failure {
                    file: file.clone(),
                    message: message.clone(),
                });
            }
        }
        self
    }

    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }

    /// Output size reduction across all converted files, e.g. `"63.2%"`
    pub fn compression_ratio(&self) -> String {
        format_savings(self.input_bytes, self.output_bytes)
    }

    /// Log the end-of-batch summary
    pub fn log_summary(&self) {
        info!("{}", "=".repeat(60));
        info!("Optimization complete");
        info!("  Processed: {}", self.processed);
        info!("  Skipped:   {}", self.skipped);
        info!("  Failed:    {}", self.failed);
        info!("  Input size:  {}", format_bytes(self.input_bytes));
        info!("  Output size: {}", format_bytes(self.output_bytes));
        info!("  Saved: {}", self.compression_ratio());

        for (role, count) in &self.by_role {
            info!("  {}: {} images", role, count);
        }

        if !self.failures.is_empty() {
            warn!("Failures:");
            for failure in self.failures.iter().take(SUMMARY_FAILURE_LIMIT) {
                warn!("  - {}: {}", failure.file, failure.message);
            }
            if self.failures.len() > SUMMARY_FAILURE_LIMIT {
                warn!("  ... and {} more", self.failures.len() - SUMMARY_FAILURE_LIMIT);
            }
        }
    }
}
