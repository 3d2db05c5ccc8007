use tracing::{debug, info};

use crate::core::lookup::CountryLookup;
use crate::core::normalize::{NormalizeSummary, normalize_table};
use crate::core::params::CleaningParams;
use crate::core::record::RecordTable;
use crate::core::validator::{CoordinateValidator, RowVerdict};
use crate::error::{Error, Result};

/// A normalized table with one verdict per row, ready to be written
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub table: RecordTable,
    pub verdicts: Vec<RowVerdict>,
    pub normalize: NormalizeSummary,
}

impl CleanedTable {
    pub fn passed(&self) -> usize {
        self.verdicts.iter().filter(|v| v.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.verdicts.len() - self.passed()
    }
}

/// Normalize then validate; rows keep their order and count
pub fn clean_table(
    mut table: RecordTable,
    lookup: &dyn CountryLookup,
    validator: &dyn CoordinateValidator,
    params: &CleaningParams,
) -> Result<CleanedTable> {
    params.validate()?;

    info!("Normalizing {} records from {}", table.len(), table.source_name());
    let normalize = normalize_table(&mut table, lookup);

    info!("Validating coordinates");
    let verdicts = validator.validate(&table, params)?;
    if verdicts.len() != table.len() {
        return Err(Error::Validation(format!(
            "validator returned {} verdicts for {} records",
            verdicts.len(),
            table.len()
        )));
    }

    let cleaned = CleanedTable {
        table,
        verdicts,
        normalize,
    };
    debug!(
        "Validation done: {} passed, {} flagged",
        cleaned.passed(),
        cleaned.failed()
    );
    Ok(cleaned)
}
