use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};

/// Write any serializable report as a pretty-printed JSON sidecar
pub fn write_report<T: Serialize>(report: &T, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json_string + "\n").map_err(|e| Error::write(path, e))?;
    info!("Report written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn writes_pretty_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.json");
        let mut report = BTreeMap::new();
        report.insert("rows", 3);
        write_report(&report, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"rows\": 3\n}\n");
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope").join("report.json");
        let err = write_report(&[1, 2], &path).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
