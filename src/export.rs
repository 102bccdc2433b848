//! CSV export of a snapshot's checks.
//!
//! Export always covers the full snapshot, independent of the target filter
//! active in the recent-checks view.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::source::{Check, Snapshot, WindowHours};

/// Header row, in column order.
pub const CSV_HEADER: [&str; 5] = ["timestamp", "url", "status_code", "is_up", "response_ms"];

/// Why an export did not produce a file.
#[derive(Error, Debug)]
pub enum ExportError {
    /// There are no checks to export; no file is written.
    #[error("No data to export yet")]
    Empty,
    /// Writing the file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Encode checks as CSV: one header row, then one row per check in order.
///
/// Absent values become empty cells. A cell is quoted, with inner quotes
/// doubled, only if it contains a comma or a double quote. Rows are joined
/// with `\n` and there is no trailing newline.
pub fn encode_csv(checks: &[Check]) -> String {
    let mut lines = Vec::with_capacity(checks.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for check in checks {
        let cells = [
            Some(check.timestamp.clone()),
            Some(check.url.clone()),
            check.status_code.map(|c| c.to_string()),
            Some(check.is_up.to_string()),
            check.response_ms.map(|ms| ms.to_string()),
        ];
        let line = cells.iter().map(|cell| escape_cell(cell.as_deref())).collect::<Vec<_>>();
        lines.push(line.join(","));
    }

    lines.join("\n")
}

fn escape_cell(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// File name for an export of the given window, e.g. `pulseping-24h-export.csv`.
pub fn export_filename(window: WindowHours) -> String {
    format!("pulseping-{}h-export.csv", window.get())
}

/// Write the snapshot's checks to `path`.
///
/// Returns [`ExportError::Empty`] without touching the filesystem when the
/// snapshot has no checks.
pub fn write_csv(snapshot: &Snapshot, path: &Path) -> Result<(), ExportError> {
    if snapshot.is_empty() {
        return Err(ExportError::Empty);
    }

    let csv = encode_csv(&snapshot.checks);
    fs::write(path, csv).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows = snapshot.checks.len(), "exported snapshot");
    Ok(())
}

/// Write the snapshot into `dir` under [`export_filename`].
///
/// Returns the path of the written file.
pub fn write_export(
    snapshot: &Snapshot,
    window: WindowHours,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_filename(window));
    write_csv(snapshot, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{filter_checks, TargetFilter};
    use tempfile::TempDir;

    fn check(url: &str, status: Option<u16>, is_up: bool, ms: Option<f64>) -> Check {
        Check {
            timestamp: "2024-05-01T09:00:00+00:00".to_string(),
            url: url.to_string(),
            status_code: status,
            is_up,
            response_ms: ms,
        }
    }

    fn snapshot(checks: Vec<Check>) -> Snapshot {
        Snapshot {
            period_hours: 24,
            total_checks: checks.len() as u64,
            generated_at: "2024-05-01T10:00:00+00:00".to_string(),
            checks,
        }
    }

    #[test]
    fn test_header_and_rows() {
        let csv = encode_csv(&[
            check("https://a.test", Some(200), true, Some(123.4)),
            check("https://b.test", Some(503), false, Some(80.0)),
        ]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "timestamp,url,status_code,is_up,response_ms");
        assert_eq!(lines[1], "2024-05-01T09:00:00+00:00,https://a.test,200,true,123.4");
        assert_eq!(lines[2], "2024-05-01T09:00:00+00:00,https://b.test,503,false,80");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_comma_is_quoted() {
        let csv = encode_csv(&[check("http://a,b", Some(200), true, Some(1.0))]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "2024-05-01T09:00:00+00:00,\"http://a,b\",200,true,1");
    }

    #[test]
    fn test_quote_is_doubled() {
        let csv = encode_csv(&[check("http://a\"b", None, false, None)]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "2024-05-01T09:00:00+00:00,\"http://a\"\"b\",,false,");
    }

    #[test]
    fn test_absent_values_are_empty_cells() {
        let csv = encode_csv(&[check("x", None, false, None)]);
        assert!(csv.ends_with("x,,false,"));
    }

    #[test]
    fn test_empty_input_is_header_only() {
        assert_eq!(encode_csv(&[]), "timestamp,url,status_code,is_up,response_ms");
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(WindowHours::new(6)), "pulseping-6h-export.csv");
    }

    #[test]
    fn test_empty_snapshot_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let err = write_export(&snapshot(Vec::new()), WindowHours::default(), dir.path())
            .unwrap_err();
        assert!(matches!(err, ExportError::Empty));
        assert!(!dir.path().join("pulseping-24h-export.csv").exists());
    }

    #[test]
    fn test_write_export_ignores_display_filter() {
        let dir = TempDir::new().unwrap();
        let snap = snapshot(vec![
            check("a", Some(200), true, Some(1.0)),
            check("b", Some(200), true, Some(2.0)),
        ]);

        // A narrowed display filter has no bearing on what gets exported
        let shown = filter_checks(&snap, &TargetFilter::Url("a".to_string()));
        assert_eq!(shown.len(), 1);

        let path = write_export(&snap, WindowHours::new(12), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "pulseping-12h-export.csv");

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);
        assert!(written.contains(",b,"));
    }

    #[test]
    fn test_write_to_missing_dir_is_io_error() {
        let snap = snapshot(vec![check("a", Some(200), true, None)]);
        let err = write_csv(&snap, Path::new("/nonexistent/dir/out.csv")).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
