use std::io::Write;
use std::path::Path;

use tempfile::Builder;
use tracing::info;

use crate::core::params::CleaningParams;
use crate::core::pipeline::CleanedTable;
use crate::error::{Error, Result};
use crate::types::Check;

pub const ISO3_COLUMN: &str = "country_iso3";
pub const VALID_COLUMN: &str = "cc_valid";

/// Output layout: original headers, then any derived column not already present
struct Layout {
    headers: Vec<String>,
    /// Target index for each derived column, in derived-column order
    derived: Vec<usize>,
}

fn derived_columns(params: &CleaningParams) -> Vec<(&'static str, Option<Check>)> {
    let mut columns = vec![(ISO3_COLUMN, None), (VALID_COLUMN, None)];
    if params.emit_flags {
        columns.extend(
            params
                .active_checks()
                .into_iter()
                .map(|c| (c.flag_column(), Some(c))),
        );
    }
    columns
}

fn layout(cleaned: &CleanedTable, derived: &[(&'static str, Option<Check>)]) -> Layout {
    let mut headers = cleaned.table.headers.clone();
    let derived = derived
        .iter()
        .map(|(name, _)| match cleaned.table.header_index(name) {
            Some(idx) => idx,
            None => {
                headers.push(name.to_string());
                headers.len() - 1
            }
        })
        .collect();
    Layout { headers, derived }
}

fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn format_flag(value: Option<bool>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Serialize the cleaned table to any writer
pub fn write_cleaned_to<W: Write>(
    cleaned: &CleanedTable,
    writer: W,
    params: &CleaningParams,
) -> std::result::Result<(), csv::Error> {
    let derived = derived_columns(params);
    let layout = layout(cleaned, &derived);
    let columns = cleaned.table.columns;

    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(&layout.headers)?;

    let mut cells: Vec<String> = Vec::with_capacity(layout.headers.len());
    for (record, verdict) in cleaned.table.rows.iter().zip(&cleaned.verdicts) {
        cells.clear();
        cells.extend(record.cells.iter().cloned());
        cells.resize(layout.headers.len(), String::new());

        cells[columns.latitude] = format_coordinate(record.latitude);
        cells[columns.longitude] = format_coordinate(record.longitude);

        for ((name, check), &idx) in derived.iter().zip(&layout.derived) {
            cells[idx] = match (*name, check) {
                (ISO3_COLUMN, _) => record
                    .country_iso3
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
                (VALID_COLUMN, _) => verdict.passed().to_string(),
                (_, Some(check)) => format_flag(verdict.outcome(*check)),
                (_, None) => String::new(),
            };
        }
        csv_writer.write_record(&cells)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the cleaned table to `output` atomically: a temporary file in the
/// same directory is persisted over the target only after a complete write.
/// An existing target keeps its mode; a new one gets the usual `0o666` less
/// the process umask instead of the temp file's private `0o600`.
pub fn write_cleaned_csv(cleaned: &CleanedTable, output: &Path, params: &CleaningParams) -> Result<()> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = std::fs::metadata(output).ok().map(|m| m.permissions());

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(|e| Error::write(output, e))?;
    if let Some(permissions) = existing {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| Error::write(output, e))?;
    }
    write_cleaned_to(cleaned, tmp.as_file_mut(), params).map_err(|e| Error::write(output, e))?;
    tmp.as_file().sync_all().map_err(|e| Error::write(output, e))?;
    tmp.persist(output).map_err(|e| Error::write(output, e.error))?;

    info!(
        "Wrote {} records to {}",
        cleaned.table.len(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize::NormalizeSummary;
    use crate::core::validator::RowVerdict;
    use crate::io::reader::read_table_from;
    use crate::core::params::ColumnNames;
    use crate::types::Iso3;
    use tempfile::TempDir;

    fn cleaned(text: &str, verdicts: Vec<RowVerdict>) -> CleanedTable {
        let mut table = read_table_from(text.as_bytes(), &ColumnNames::default(), "t").unwrap();
        for r in &mut table.rows {
            r.latitude = r.raw(table.columns.latitude).parse().ok();
            r.longitude = r.raw(table.columns.longitude).parse().ok();
        }
        CleanedTable {
            table,
            verdicts,
            normalize: NormalizeSummary::default(),
        }
    }

    fn verdict(valid: bool, zeros: Option<bool>) -> RowVerdict {
        let mut v = RowVerdict::default();
        v.set(Check::Validity, Some(valid));
        v.set(Check::Zeros, zeros);
        v
    }

    fn render(c: &CleanedTable, params: &CleaningParams) -> String {
        let mut buf = Vec::new();
        write_cleaned_to(c, &mut buf, params).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn appends_derived_columns_and_coerces_coordinates() {
        let mut c = cleaned(
            "id,latitude,longitude,country\n1,40.7128,-74.0060,United States\n2,abc,0,Testland\n",
            vec![verdict(true, Some(true)), verdict(false, None)],
        );
        c.table.rows[0].country_iso3 = Iso3::new("USA");

        let out = render(&c, &CleaningParams::default());
        assert_eq!(
            out,
            "id,latitude,longitude,country,country_iso3,cc_valid\n\
             1,40.7128,-74.006,United States,USA,true\n\
             2,,0,Testland,,false\n"
        );
    }

    #[test]
    fn existing_derived_columns_are_replaced_in_place() {
        let c = cleaned(
            "latitude,cc_valid,longitude,country,country_iso3\n1,false,2,X,OLD\n",
            vec![verdict(true, Some(true))],
        );
        let out = render(&c, &CleaningParams::default());
        assert_eq!(
            out,
            "latitude,cc_valid,longitude,country,country_iso3\n1,true,2,X,\n"
        );
    }

    #[test]
    fn header_text_is_written_back_unchanged() {
        let c = cleaned(
            "\u{feff}latitude,longitude ,country, notes, country_iso3\n1,2,X,keep me,OLD\n",
            vec![verdict(true, None)],
        );
        let out = render(&c, &CleaningParams::default());
        assert_eq!(
            out,
            "latitude,longitude ,country, notes, country_iso3,cc_valid\n1,2,X,keep me,,true\n"
        );
    }

    #[test]
    fn flag_columns_follow_active_checks() {
        let c = cleaned(
            "latitude,longitude,country\n1,2,X\n",
            vec![verdict(true, Some(false))],
        );
        let params = CleaningParams {
            checks: vec![Check::Zeros],
            emit_flags: true,
            ..Default::default()
        };
        let out = render(&c, &params);
        assert_eq!(
            out,
            "latitude,longitude,country,country_iso3,cc_valid,cc_val,cc_zer\n1,2,X,,false,true,false\n"
        );
    }

    #[test]
    fn atomic_write_creates_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.csv");
        let c = cleaned("latitude,longitude,country\n1,2,X\n", vec![verdict(true, None)]);
        write_cleaned_csv(&c, &path, &CleaningParams::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("latitude,longitude,country,country_iso3,cc_valid\n"));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn new_output_gets_default_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let plain = tmp.path().join("plain.txt");
        std::fs::write(&plain, "x").unwrap();
        let expected = std::fs::metadata(&plain).unwrap().permissions().mode() & 0o777;

        let path = tmp.path().join("out.csv");
        let c = cleaned("latitude,longitude,country\n1,2,X\n", vec![verdict(true, None)]);
        write_cleaned_csv(&c, &path, &CleaningParams::default()).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, expected);
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_existing_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.csv");
        std::fs::write(&path, "old\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        let c = cleaned("latitude,longitude,country\n1,2,X\n", vec![verdict(true, None)]);
        write_cleaned_csv(&c, &path, &CleaningParams::default()).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("latitude,"));
    }

    #[test]
    fn unwritable_destination_is_a_write_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing_dir").join("out.csv");
        let c = cleaned("latitude,longitude,country\n1,2,X\n", vec![verdict(true, None)]);
        let err = write_cleaned_csv(&c, &path, &CleaningParams::default()).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(!path.exists());
    }
}
