use std::fs;
use std::path::Path;

use coordclean::{
    Check, CleaningParams, Error, clean_csv, clean_csv_to_path, process_directory_to_path,
};
use tempfile::TempDir;

const SCENARIOS: &str = "\
id,latitude,longitude,country
1,91,0,Testland
2,40.7128,-74.0060,United States
3,0,0,Nigeria
";

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

fn write_input(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn scenario_rows_get_expected_codes_and_verdicts() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), "in.csv", SCENARIOS);
    let output = tmp.path().join("out.csv");

    let report = clean_csv_to_path(&input, &output, &CleaningParams::default()).unwrap();
    assert_eq!(report.rows, 3);
    assert_eq!(report.passed, 1);
    assert_eq!(report.flagged, 2);

    let rows = read_rows(&output);
    assert_eq!(
        rows[0],
        vec!["id", "latitude", "longitude", "country", "country_iso3", "cc_valid"]
    );
    assert_eq!(rows[1], vec!["1", "91", "0", "Testland", "", "false"]);
    assert_eq!(rows[2], vec!["2", "40.7128", "-74.006", "United States", "USA", "true"]);
    assert_eq!(rows[3], vec!["3", "0", "0", "Nigeria", "NGA", "false"]);
}

#[test]
fn row_count_order_and_column_set_are_preserved() {
    let tmp = TempDir::new().unwrap();
    let text = "\
species,country,latitude,longitude,notes
Panthera leo,Kenya,-1.2921,36.8219,a
Panthera leo,Kenya,-1.2921,36.8219,b
Lynx lynx,Atlantis,north,10,c
,,,,d
Bison bison,US,37.09,-95.71,e
";
    let input = write_input(tmp.path(), "in.csv", text);
    let output = tmp.path().join("out.csv");
    clean_csv_to_path(&input, &output, &CleaningParams::default()).unwrap();

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 6);
    assert_eq!(
        rows[0],
        vec!["species", "country", "latitude", "longitude", "notes", "country_iso3", "cc_valid"]
    );
    let notes: Vec<_> = rows[1..].iter().map(|r| r[4].as_str()).collect();
    assert_eq!(notes, vec!["a", "b", "c", "d", "e"]);

    // Unparseable latitude becomes an empty cell, unknown country an empty code
    assert_eq!(rows[3][2], "");
    assert_eq!(rows[3][5], "");
    assert_eq!(rows[3][6], "false");
    // Fully blank row is kept and fails
    assert_eq!(rows[4][6], "false");
    // Country centroid
    assert_eq!(rows[5][5], "USA");
    assert_eq!(rows[5][6], "false");
    // Duplicates are not a default check
    assert_eq!(rows[1][6], "true");
    assert_eq!(rows[2][6], "true");
}

#[test]
fn cleaning_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), "in.csv", SCENARIOS);
    let first = tmp.path().join("first.csv");
    let second = tmp.path().join("second.csv");
    let rerun = tmp.path().join("rerun.csv");
    let params = CleaningParams::default();

    clean_csv_to_path(&input, &first, &params).unwrap();
    clean_csv_to_path(&input, &second, &params).unwrap();
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

    // Cleaning our own output replaces derived columns instead of adding more
    clean_csv_to_path(&first, &rerun, &params).unwrap();
    assert_eq!(fs::read(&first).unwrap(), fs::read(&rerun).unwrap());
}

#[test]
fn optional_checks_and_flag_columns() {
    let tmp = TempDir::new().unwrap();
    let text = "\
species,latitude,longitude,country
A,-1.2921,36.8219,Kenya
A,-1.2921,36.8219,Kenya
B,12.5,12.5,Kenya
C,30,-40,Brazil
";
    let input = write_input(tmp.path(), "in.csv", text);
    let output = tmp.path().join("out.csv");
    let params = CleaningParams {
        checks: vec![Check::Seas, Check::Equal, Check::Countries, Check::Duplicates],
        emit_flags: true,
        ..Default::default()
    };
    let report = clean_csv_to_path(&input, &output, &params).unwrap();

    let rows = read_rows(&output);
    assert_eq!(
        rows[0][4..],
        ["country_iso3", "cc_valid", "cc_val", "cc_equ", "cc_sea", "cc_con", "cc_dpl"]
    );
    assert_eq!(rows[1][5..], ["true", "true", "true", "true", "true", "true"]);
    assert_eq!(rows[2][5..], ["false", "true", "true", "true", "true", "false"]);
    assert_eq!(rows[3][5..], ["false", "true", "false", "true", "false", "true"]);
    assert_eq!(rows[4][5..], ["false", "true", "true", "false", "false", "true"]);

    assert_eq!(report.failures[&Check::Duplicates], 1);
    assert_eq!(report.failures[&Check::Seas], 1);
    assert_eq!(report.failures[&Check::Countries], 2);
    assert_eq!(report.failures[&Check::Validity], 0);
}

#[test]
fn ambiguous_and_unmatched_names_are_reported_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let text = "latitude,longitude,country\n-1,15,Congo\n-1,36.8,Narnia\n";
    let input = write_input(tmp.path(), "in.csv", text);

    let cleaned = clean_csv(&input, &CleaningParams::default()).unwrap();
    assert_eq!(cleaned.table.rows[0].country_iso3, None);
    assert!(cleaned.normalize.ambiguous_countries.contains_key("Congo"));
    assert!(cleaned.normalize.unmatched_countries.contains("Narnia"));
}

#[test]
fn territories_codes_and_inverted_names_resolve_on_land() {
    let tmp = TempDir::new().unwrap();
    let text = "\
latitude,longitude,country
-17.65,-149.45,French Polynesia
22.32,114.17,HK
-51.69,-57.85,Falkland Islands (Malvinas)
37.57,126.98,\"Korea, Republic of\"
13.45,-16.58,\"Gambia, The\"
-1.2921,36.8219,KE
";
    let input = write_input(tmp.path(), "in.csv", text);
    let params = CleaningParams {
        checks: vec![Check::Seas, Check::Countries],
        ..Default::default()
    };

    let cleaned = clean_csv(&input, &params).unwrap();
    let codes: Vec<String> = cleaned
        .table
        .rows
        .iter()
        .map(|r| r.country_iso3.map(|c| c.to_string()).unwrap_or_default())
        .collect();
    assert_eq!(codes, vec!["PYF", "HKG", "FLK", "KOR", "GMB", "KEN"]);
    assert!(cleaned.verdicts.iter().all(|v| v.passed()));
    assert!(cleaned.normalize.unmatched_countries.is_empty());
}

#[test]
fn missing_column_fails_without_output() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), "in.csv", "lat,lon,country\n1,2,Kenya\n");
    let output = tmp.path().join("out.csv");

    let err = clean_csv_to_path(&input, &output, &CleaningParams::default()).unwrap_err();
    assert!(matches!(err, Error::MissingColumn { .. }));
    assert!(!output.exists());
}

#[test]
fn batch_continues_past_bad_files() {
    let tmp = TempDir::new().unwrap();
    let in_dir = tmp.path().join("in");
    let out_dir = tmp.path().join("out");
    fs::create_dir(&in_dir).unwrap();
    write_input(&in_dir, "a.csv", SCENARIOS);
    write_input(&in_dir, "b.csv", "no,coords\n1,2\n");
    write_input(&in_dir, "readme.txt", "ignored");

    let report =
        process_directory_to_path(&in_dir, &out_dir, &CleaningParams::default(), true).unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.errors, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.files[0].rows, 3);
    assert!(out_dir.join("a.csv").exists());
    assert!(!out_dir.join("b.csv").exists());

    let err = process_directory_to_path(&in_dir, &out_dir, &CleaningParams::default(), false)
        .unwrap_err();
    assert!(matches!(err, Error::MissingColumn { .. }));
}
