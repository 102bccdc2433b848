//! File-based fetcher.
//!
//! Reads a snapshot JSON file from disk, e.g. one saved from the API with
//! `curl`. Useful for offline inspection.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{FetchError, Snapshot, SnapshotFetcher, WindowHours};

/// A fetcher that reads a saved snapshot from a JSON file.
///
/// The requested window is ignored: the file holds whatever window it was
/// saved with. Every fetch re-reads the file, so refreshing picks up edits.
#[derive(Debug)]
pub struct FileFetcher {
    path: PathBuf,
    description: String,
}

impl FileFetcher {
    /// Create a file fetcher for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotFetcher for FileFetcher {
    async fn fetch(&self, _window: WindowHours) -> Result<Snapshot, FetchError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Transport(format!("read error: {}", e)))?;
        serde_json::from_str(&content).map_err(|e| FetchError::Decode(e.to_string()))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "period_hours": 24,
            "total_checks": 1,
            "generated_at": "2024-05-01T10:00:00+00:00",
            "checks": [
                {"timestamp": "2024-05-01T09:00:00+00:00", "url": "https://example.com",
                 "status_code": 200, "is_up": true, "response_ms": 42}
            ]
        }"#
    }

    #[test]
    fn test_file_fetcher_new() {
        let fetcher = FileFetcher::new("/tmp/snapshot.json");
        assert_eq!(fetcher.path(), Path::new("/tmp/snapshot.json"));
        assert_eq!(fetcher.description(), "file: /tmp/snapshot.json");
    }

    #[tokio::test]
    async fn test_file_fetcher_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let fetcher = FileFetcher::new(file.path());
        let snapshot = fetcher.fetch(WindowHours::default()).await.unwrap();
        assert_eq!(snapshot.checks.len(), 1);
        assert_eq!(snapshot.checks[0].url, "https://example.com");
    }

    #[tokio::test]
    async fn test_file_fetcher_missing_file() {
        let fetcher = FileFetcher::new("/nonexistent/path/snapshot.json");
        let err = fetcher.fetch(WindowHours::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(ref msg) if msg.contains("read error")));
    }

    #[tokio::test]
    async fn test_file_fetcher_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let fetcher = FileFetcher::new(file.path());
        let err = fetcher.fetch(WindowHours::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
