//! Coordinate validation seam and the built-in reference validator.
//!
//! A validator is called once per table and must return exactly one
//! [`RowVerdict`] per row, in row order. An `Err` aborts the run.
use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::core::checks::{
    passes_centroids, passes_countries, passes_equal, passes_seas, passes_zeros, valid_point,
};
use crate::core::params::CleaningParams;
use crate::core::record::RecordTable;
use crate::error::Result;
use crate::reference::Gazetteer;
use crate::types::Check;

/// Per-row outcome of every check that was run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowVerdict {
    /// `None` means the check ran but could not be evaluated for this row
    outcomes: BTreeMap<Check, Option<bool>>,
}

impl RowVerdict {
    pub fn set(&mut self, check: Check, outcome: Option<bool>) {
        self.outcomes.insert(check, outcome);
    }

    pub fn outcome(&self, check: Check) -> Option<bool> {
        self.outcomes.get(&check).copied().flatten()
    }

    /// True iff validity passed and no evaluated check failed
    pub fn passed(&self) -> bool {
        self.outcome(Check::Validity) == Some(true)
            && self.outcomes.values().all(|o| *o != Some(false))
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = Check> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, o)| **o == Some(false))
            .map(|(check, _)| *check)
    }
}

pub trait CoordinateValidator {
    fn validate(&self, table: &RecordTable, params: &CleaningParams) -> Result<Vec<RowVerdict>>;
}

/// Validator backed by the compiled-in reference data
pub struct ReferenceValidator<'a> {
    gazetteer: &'a Gazetteer,
}

impl<'a> ReferenceValidator<'a> {
    pub fn new(gazetteer: &'a Gazetteer) -> Self {
        Self { gazetteer }
    }
}

impl ReferenceValidator<'static> {
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(Gazetteer::builtin()?))
    }
}

impl CoordinateValidator for ReferenceValidator<'_> {
    fn validate(&self, table: &RecordTable, params: &CleaningParams) -> Result<Vec<RowVerdict>> {
        let checks = params.active_checks();
        debug!("Running checks: {:?}", checks);

        // (species, lat bits, lon bits) already seen
        let mut seen: HashSet<(Option<&str>, u64, u64)> = HashSet::new();
        let mut verdicts = Vec::with_capacity(table.len());

        for record in &table.rows {
            let mut verdict = RowVerdict::default();
            let point = valid_point(record.latitude, record.longitude);
            verdict.set(Check::Validity, Some(point.is_some()));

            for &check in &checks {
                let outcome = match (check, point) {
                    (Check::Validity, _) => continue,
                    (_, None) => None,
                    (Check::Zeros, Some(p)) => Some(passes_zeros(p, params.zeros_radius_deg)),
                    (Check::Equal, Some(p)) => Some(passes_equal(p, params.equal_mode)),
                    (Check::Centroids, Some(p)) => Some(passes_centroids(
                        p,
                        params.centroids_radius_m,
                        self.gazetteer,
                    )),
                    (Check::Seas, Some(p)) => {
                        Some(passes_seas(p, params.seas_buffer_deg, self.gazetteer))
                    }
                    (Check::Countries, Some(p)) => passes_countries(
                        p,
                        record.country_iso3,
                        params.countries_buffer_deg,
                        self.gazetteer,
                    ),
                    (Check::Duplicates, Some(p)) => {
                        // -0.0 and 0.0 compare equal
                        let key = (
                            record.species.as_deref(),
                            (p.lat + 0.0).to_bits(),
                            (p.lon + 0.0).to_bits(),
                        );
                        Some(seen.insert(key))
                    }
                };
                verdict.set(check, outcome);
            }
            verdicts.push(verdict);
        }

        Ok(verdicts)
    }
}
