//! In-memory record table: raw cells in header order plus typed fields that the
//! loader and normalizer fill in once, so later stages never look columns up by name.
use std::path::PathBuf;

use crate::types::Iso3;

/// Positions of the columns the pipeline reads, resolved against the header once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub latitude: usize,
    pub longitude: usize,
    pub country: usize,
    pub species: Option<usize>,
}

/// One input row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line of the row in its source, for diagnostics
    pub line: u64,
    /// Original cells, same length and order as the table headers
    pub cells: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub species: Option<String>,
    pub country_iso3: Option<Iso3>,
}

impl Record {
    pub fn new(line: u64, cells: Vec<String>, columns: &ColumnMap) -> Self {
        let text = |idx: usize| {
            cells
                .get(idx)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let country = text(columns.country);
        let species = columns.species.and_then(text);
        Self {
            line,
            cells,
            latitude: None,
            longitude: None,
            country,
            species,
            country_iso3: None,
        }
    }

    pub fn raw(&self, idx: usize) -> &str {
        self.cells.get(idx).map(String::as_str).unwrap_or("")
    }

    /// Both coordinates, when both parsed
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Ordered rows sharing one header
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    pub headers: Vec<String>,
    pub columns: ColumnMap,
    pub rows: Vec<Record>,
    /// File the table was read from, if any
    pub source: Option<PathBuf>,
}

impl RecordTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column whose header matches `name`, ignoring surrounding whitespace
    pub fn header_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn source_name(&self) -> String {
        self.source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string())
    }
}
