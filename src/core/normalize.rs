use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{info, warn};

use crate::core::lookup::{CountryLookup, LookupOutcome};
use crate::core::record::RecordTable;
use crate::types::Iso3;

/// What the normalizer could not resolve; none of it is fatal
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizeSummary {
    /// Non-empty latitude or longitude cells that did not parse as a finite number
    pub unparsed_coordinates: usize,
    /// Rows without a usable country value
    pub missing_country: usize,
    /// Distinct country names with no match
    pub unmatched_countries: BTreeSet<String>,
    /// Distinct country names matching several codes
    pub ambiguous_countries: BTreeMap<String, Vec<Iso3>>,
}

/// Parse a coordinate cell; blanks and anything non-finite become `None`
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce coordinates and resolve country codes for every row, in place
pub fn normalize_table(table: &mut RecordTable, lookup: &dyn CountryLookup) -> NormalizeSummary {
    let mut summary = NormalizeSummary::default();
    let columns = table.columns;
    let mut resolved: BTreeMap<String, LookupOutcome> = BTreeMap::new();

    for record in &mut table.rows {
        for (idx, slot) in [
            (columns.latitude, &mut record.latitude),
            (columns.longitude, &mut record.longitude),
        ] {
            let raw = record.cells.get(idx).map(String::as_str).unwrap_or("");
            *slot = parse_coordinate(raw);
            if slot.is_none() && !raw.trim().is_empty() {
                summary.unparsed_coordinates += 1;
            }
        }

        let Some(country) = record.country.as_deref() else {
            summary.missing_country += 1;
            record.country_iso3 = None;
            continue;
        };
        let outcome = resolved
            .entry(country.to_string())
            .or_insert_with(|| lookup.lookup(country));
        record.country_iso3 = outcome.code();
    }

    for (name, outcome) in resolved {
        match outcome {
            LookupOutcome::Matched(_) => {}
            LookupOutcome::Unmatched => {
                summary.unmatched_countries.insert(name);
            }
            LookupOutcome::Ambiguous(codes) => {
                summary.ambiguous_countries.insert(name, codes);
            }
        }
    }

    if !summary.unmatched_countries.is_empty() {
        warn!(
            "Some country names were not matched: {}",
            join_names(summary.unmatched_countries.iter())
        );
    }
    if !summary.ambiguous_countries.is_empty() {
        warn!(
            "Some country names matched more than one code: {}",
            join_names(summary.ambiguous_countries.keys())
        );
    }
    if summary.unparsed_coordinates > 0 {
        info!(
            "{} coordinate values were not numeric and are treated as missing",
            summary.unparsed_coordinates
        );
    }

    summary
}

fn join_names<'a>(names: impl Iterator<Item = &'a String>) -> String {
    names
        .map(|n| format!("{n:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}
