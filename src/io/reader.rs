//! CSV loader: reads a header row plus records into a [`RecordTable`],
//! resolving the configured column names once.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::core::params::ColumnNames;
use crate::core::record::{ColumnMap, Record, RecordTable};
use crate::error::{Error, Result};

const UTF8_BOM: char = '\u{feff}';

/// Read a CSV file from disk
pub fn read_table(path: &Path, names: &ColumnNames) -> Result<RecordTable> {
    info!("Reading {}", path.display());
    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut table = read_table_from(file, names, &path.display().to_string())?;
    table.source = Some(path.to_path_buf());
    Ok(table)
}

/// Read CSV from any reader; `source_name` only appears in error messages
pub fn read_table_from<R: Read>(
    reader: R,
    names: &ColumnNames,
    source_name: &str,
) -> Result<RecordTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    // Header text is kept as written (minus a BOM) so the output round-trips;
    // matching against configured names ignores surrounding whitespace.
    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { h.trim_start_matches(UTF8_BOM) } else { h };
            h.to_string()
        })
        .collect();

    let find = |column: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| Error::MissingColumn {
                column: column.to_string(),
                source_name: source_name.to_string(),
            })
    };
    let columns = ColumnMap {
        latitude: find(&names.latitude)?,
        longitude: find(&names.longitude)?,
        country: find(&names.country)?,
        species: headers.iter().position(|h| h.trim() == names.species),
    };
    debug!("Resolved columns {:?} in {}", columns, source_name);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let cells = record.iter().map(str::to_string).collect();
        rows.push(Record::new(line, cells, &columns));
    }
    debug!("Read {} records from {}", rows.len(), source_name);

    Ok(RecordTable {
        headers,
        columns,
        rows,
        source: None,
    })
}
