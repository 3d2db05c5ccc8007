#![doc = r#"
coordclean: flag suspicious geographic coordinates in species occurrence CSVs.

This crate reads a CSV of occurrence records, resolves free-text country names to
ISO3 codes, runs a configurable set of coordinate checks (seas, zeros, equal,
centroids, countries, duplicates) and writes the table back with a `country_iso3`
column and a `cc_valid` verdict per row. It powers the `coordclean` CLI and can be
embedded in your own Rust applications.

Reference data
--------------
Country names, country and province centroids, and coarse land bounding boxes are
compiled into the binary. They are parsed once on first use and shared afterwards.
The checks are deliberately coarse: they catch placeholder and data-entry errors,
not points a few kilometres off a coastline.

Quick start: clean a CSV to a file
----------------------------------
```rust,no_run
use std::path::Path;
use coordclean::{clean_csv_to_path, CleaningParams};

fn main() -> coordclean::Result<()> {
    let report = clean_csv_to_path(
        Path::new("/data/occurrences.csv"),
        Path::new("/out/occurrences.cleaned.csv"),
        &CleaningParams::default(),
    )?;
    println!("{} of {} rows passed", report.passed, report.rows);
    Ok(())
}
```

Choosing checks
---------------
```rust,no_run
use std::path::Path;
use coordclean::{clean_csv_to_path, Check, CleaningParams, EqualMode};

fn main() -> coordclean::Result<()> {
    let params = CleaningParams {
        checks: vec![Check::Zeros, Check::Equal, Check::Countries, Check::Duplicates],
        equal_mode: EqualMode::Absolute,
        emit_flags: true, // one cc_* column per check
        ..Default::default()
    };
    clean_csv_to_path(Path::new("in.csv"), Path::new("out.csv"), &params)?;
    Ok(())
}
```

Bring your own lookup or validator
----------------------------------
```rust,no_run
use std::path::Path;
use coordclean::{
    clean_csv_with, CleaningParams, CountryLookup, Gazetteer, Iso3, LookupOutcome,
    ReferenceValidator,
};

struct OnlyKenya;

impl CountryLookup for OnlyKenya {
    fn lookup(&self, name: &str) -> LookupOutcome {
        match (name, Iso3::new("KEN")) {
            ("Kenya", Some(code)) => LookupOutcome::Matched(code),
            _ => LookupOutcome::Unmatched,
        }
    }
}

fn main() -> coordclean::Result<()> {
    let validator = ReferenceValidator::new(Gazetteer::builtin()?);
    clean_csv_with(
        Path::new("in.csv"),
        Path::new("out.csv"),
        &CleaningParams::default(),
        &OnlyKenya,
        &validator,
    )?;
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use coordclean::{process_directory_to_path, CleaningParams};

fn main() -> coordclean::Result<()> {
    let report = process_directory_to_path(
        Path::new("/data/csv_root"),
        Path::new("/out"),
        &CleaningParams::default(),
        true, // continue_on_error
    )?;

    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);
    Ok(())
}
```

Error handling
--------------
All public functions return `coordclean::Result<T>`; match on `coordclean::Error` to
handle specific cases.

```rust,no_run
use std::path::Path;
use coordclean::{clean_csv_to_path, CleaningParams, Error};

fn main() {
    match clean_csv_to_path(Path::new("/bad/in.csv"), Path::new("/out.csv"), &CleaningParams::default()) {
        Ok(_) => {}
        Err(Error::Read { path, .. }) => eprintln!("cannot read {}", path.display()),
        Err(Error::MissingColumn { column, .. }) => eprintln!("no `{column}` column"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`]: high-level, ergonomic entry points.
- [`core`]: normalizer, checks, validator and pipeline building blocks.
- [`reference`]: the compiled-in gazetteer.
- [`types`]: `Check`, `EqualMode` and `Iso3`.
- [`io`]: CSV reader and writers.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod reference;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::lookup::{CountryLookup, LookupOutcome};
pub use crate::core::params::{CleaningParams, ColumnNames};
pub use crate::core::pipeline::CleanedTable;
pub use crate::core::report::RunReport;
pub use crate::core::validator::{CoordinateValidator, ReferenceValidator, RowVerdict};
pub use error::{Error, Result};
pub use reference::Gazetteer;
pub use types::{Check, EqualMode, Iso3};

// High-level API re-exports
pub use api::{
    BatchReport, clean_csv, clean_csv_to_path, clean_csv_with, iterate_csv_files,
    process_directory_to_path,
};
