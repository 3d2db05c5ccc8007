use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Check, EqualMode};

/// Input column names the loader resolves once per table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnNames {
    pub latitude: String,
    pub longitude: String,
    pub country: String,
    /// Optional; used by the `duplicates` check when the column exists
    pub species: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            latitude: "latitude".to_string(),
            longitude: "longitude".to_string(),
            country: "country".to_string(),
            species: "species".to_string(),
        }
    }
}

/// Cleaning parameters suitable for config files and CLI overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleaningParams {
    pub checks: Vec<Check>,
    pub equal_mode: EqualMode,
    /// Radius in degrees around (0, 0) flagged by `zeros`
    pub zeros_radius_deg: f64,
    /// Great-circle radius in meters around each centroid flagged by `centroids`
    pub centroids_radius_m: f64,
    /// Degrees added around every land box before `seas` flags a point
    pub seas_buffer_deg: f64,
    /// Degrees added around the resolved country's land boxes before
    /// `countries` flags a point
    pub countries_buffer_deg: f64,
    pub columns: ColumnNames,
    /// Emit one `cc_*` column per check next to `cc_valid`
    pub emit_flags: bool,
}

impl Default for CleaningParams {
    fn default() -> Self {
        Self {
            checks: Check::DEFAULTS.to_vec(),
            equal_mode: EqualMode::Identical,
            zeros_radius_deg: 0.5,
            centroids_radius_m: 1000.0,
            seas_buffer_deg: 0.0,
            countries_buffer_deg: 0.0,
            columns: ColumnNames::default(),
            emit_flags: false,
        }
    }
}

impl CleaningParams {
    /// Load parameters from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let params: CleaningParams =
            serde_json::from_str(&content).map_err(|e| Error::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        let radii = [
            ("zeros_radius_deg", self.zeros_radius_deg),
            ("centroids_radius_m", self.centroids_radius_m),
            ("seas_buffer_deg", self.seas_buffer_deg),
            ("countries_buffer_deg", self.countries_buffer_deg),
        ];
        for (arg, value) in radii {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidArgument {
                    arg,
                    value: value.to_string(),
                });
            }
        }

        let names = [
            ("columns.latitude", &self.columns.latitude),
            ("columns.longitude", &self.columns.longitude),
            ("columns.country", &self.columns.country),
        ];
        for (arg, value) in names {
            if value.trim().is_empty() {
                return Err(Error::InvalidArgument {
                    arg,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Checks in evaluation order, validity first, without duplicates
    pub fn active_checks(&self) -> Vec<Check> {
        let mut checks = Vec::with_capacity(self.checks.len() + 1);
        checks.push(Check::Validity);
        checks.extend(self.checks.iter().copied());
        checks.sort();
        checks.dedup();
        checks
    }

    pub fn runs(&self, check: Check) -> bool {
        check == Check::Validity || self.checks.contains(&check)
    }
}
