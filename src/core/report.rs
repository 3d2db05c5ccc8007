use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::normalize::NormalizeSummary;
use crate::core::params::CleaningParams;
use crate::core::pipeline::CleanedTable;
use crate::types::Check;

/// Summary of one cleaned file, written as a JSON sidecar on request
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub passed: usize,
    pub flagged: usize,
    pub checks: Vec<Check>,
    /// Rows failing each check; a row can fail several
    pub failures: BTreeMap<Check, usize>,
    pub normalize: NormalizeSummary,
    pub tool: String,
    pub version: String,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn new(input: &Path, output: &Path, cleaned: &CleanedTable, params: &CleaningParams) -> Self {
        let checks = params.active_checks();
        let mut failures: BTreeMap<Check, usize> = checks.iter().map(|c| (*c, 0)).collect();
        for verdict in &cleaned.verdicts {
            for check in verdict.failed_checks() {
                *failures.entry(check).or_default() += 1;
            }
        }

        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            rows: cleaned.table.len(),
            passed: cleaned.passed(),
            flagged: cleaned.failed(),
            checks,
            failures,
            normalize: cleaned.normalize.clone(),
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            finished_at: Utc::now(),
        }
    }
}
