//! High-level, ergonomic library API: clean one CSV to a path, clean with
//! caller-supplied lookup and validator implementations, and batch helpers
//! for directories. Prefer these entrypoints over the `core` building blocks
//! when embedding coordclean.
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::lookup::CountryLookup;
use crate::core::params::CleaningParams;
use crate::core::pipeline::{CleanedTable, clean_table};
use crate::core::report::RunReport;
use crate::core::validator::{CoordinateValidator, ReferenceValidator};
use crate::error::{Error, Result};
use crate::io::reader::read_table;
use crate::io::writers::write_cleaned_csv;
use crate::reference::Gazetteer;

/// Load and clean a CSV in memory with the built-in reference data (no output written)
pub fn clean_csv(input: &Path, params: &CleaningParams) -> Result<CleanedTable> {
    let gazetteer = Gazetteer::builtin()?;
    let validator = ReferenceValidator::new(gazetteer);
    let table = read_table(input, &params.columns)?;
    clean_table(table, gazetteer, &validator, params)
}

/// Clean `input` into `output` using the built-in gazetteer for both
/// country lookup and coordinate validation
pub fn clean_csv_to_path(input: &Path, output: &Path, params: &CleaningParams) -> Result<RunReport> {
    let gazetteer = Gazetteer::builtin()?;
    let validator = ReferenceValidator::new(gazetteer);
    clean_csv_with(input, output, params, gazetteer, &validator)
}

/// Clean `input` into `output` with caller-supplied lookup and validator.
/// Nothing is written unless every stage succeeds.
pub fn clean_csv_with(
    input: &Path,
    output: &Path,
    params: &CleaningParams,
    lookup: &dyn CountryLookup,
    validator: &dyn CoordinateValidator,
) -> Result<RunReport> {
    let table = read_table(input, &params.columns)?;
    let cleaned = clean_table(table, lookup, validator, params)?;
    write_cleaned_csv(&cleaned, output, params)?;

    let report = RunReport::new(input, output, &cleaned, params);
    info!(
        "Cleaned {:?}: {} rows, {} passed, {} flagged",
        input, report.rows, report.passed, report.flagged
    );
    Ok(report)
}

/// Outcome of a directory run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Per-file reports for the files that were cleaned
    pub files: Vec<RunReport>,
}

fn is_csv(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Return the `*.csv` files directly inside `input_dir`, sorted by name,
/// and the number of other entries that were passed over
pub fn iterate_csv_files(input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
    let mut files = Vec::new();
    let mut skipped = 0;
    for entry in std::fs::read_dir(input_dir).map_err(|source| Error::Read {
        path: input_dir.to_path_buf(),
        source,
    })? {
        let path = entry?.path();
        if is_csv(&path) {
            files.push(path);
        } else {
            debug!("Skipping non-CSV entry: {:?}", path);
            skipped += 1;
        }
    }
    files.sort();
    Ok((files, skipped))
}

/// Clean every CSV in `input_dir` into `output_dir` under the same file name.
/// If `continue_on_error` is true, failures are counted in the report and
/// processing continues; otherwise the first error is returned.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &CleaningParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    if !input_dir.is_dir() {
        return Err(Error::InvalidArgument {
            arg: "input_dir",
            value: input_dir.display().to_string(),
        });
    }
    params.validate()?;
    std::fs::create_dir_all(output_dir).map_err(|e| Error::write(output_dir, e))?;

    let gazetteer = Gazetteer::builtin()?;
    let validator = ReferenceValidator::new(gazetteer);

    let (files, skipped) = iterate_csv_files(input_dir)?;
    let mut report = BatchReport {
        skipped,
        ..Default::default()
    };

    for path in files {
        let Some(name) = path.file_name() else {
            report.skipped += 1;
            continue;
        };
        let output_path = output_dir.join(name);
        info!("Processing: {:?} -> {:?}", path, output_path);

        match clean_csv_with(&path, &output_path, params, gazetteer, &validator) {
            Ok(file_report) => {
                report.processed += 1;
                report.files.push(file_report);
            }
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Batch complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_only_csv_files_sorted() {
        let tmp = TempDir::new().unwrap();
        for name in ["b.csv", "a.CSV", "notes.txt"] {
            std::fs::write(tmp.path().join(name), "x\n").unwrap();
        }
        std::fs::create_dir(tmp.path().join("sub.csv")).unwrap();

        let (files, skipped) = iterate_csv_files(tmp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn missing_input_dir_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = process_directory_to_path(
            &tmp.path().join("nope"),
            &tmp.path().join("out"),
            &CleaningParams::default(),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }
}
