//! Snapshot acquisition: wire types, fetchers, and the request-ordering client.
//!
//! A [`SnapshotFetcher`] performs one request for one window. The
//! [`SnapshotClient`] issues those requests in the background and feeds the
//! results through a [`SnapshotStore`], which decides whether a response may
//! replace the snapshot currently on screen.

mod client;
mod file;
mod http;
mod snapshot;
mod state;
mod window;

pub use client::SnapshotClient;
pub use file::FileFetcher;
pub use http::HttpFetcher;
pub use snapshot::{Check, Snapshot};
pub use state::{LoadedSnapshot, RequestId, Resolution, SnapshotStore};
pub use window::WindowHours;

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

/// Why a snapshot request failed.
///
/// None of these are fatal: the previous snapshot stays on screen and the
/// user sees a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be completed (network or I/O failure).
    #[error("transport error: {0}")]
    Transport(String),
    /// The API answered with a non-success status.
    #[error("API returned status {0}")]
    Status(u16),
    /// The body was not a valid snapshot.
    #[error("malformed snapshot: {0}")]
    Decode(String),
}

impl FetchError {
    /// Generic message suitable for the status bar.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Transport(_) | FetchError::Status(_) => {
                "Could not load data from the API"
            }
            FetchError::Decode(_) => "The API returned data that could not be read",
        }
    }
}

/// Something that can produce a [`Snapshot`] for a requested window.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use pulseping_dash::{HttpFetcher, SnapshotFetcher, WindowHours};
///
/// # tokio_test::block_on(async {
/// let fetcher = HttpFetcher::new("http://localhost:7071", Duration::from_secs(10)).unwrap();
/// let snapshot = fetcher.fetch(WindowHours::default()).await.unwrap();
/// println!("{} checks", snapshot.checks.len());
/// # });
/// ```
#[async_trait]
pub trait SnapshotFetcher: Send + Sync + Debug {
    /// Fetch one snapshot covering the last `window` hours.
    async fn fetch(&self, window: WindowHours) -> Result<Snapshot, FetchError>;

    /// Returns a human-readable description of where snapshots come from.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;
}
