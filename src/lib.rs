//! # pulseping-dash
//!
//! A terminal dashboard for PulsePing uptime checks.
//!
//! The collector probes configured urls and the Snapshot API serves the
//! checks of a recent time window. This crate fetches those snapshots and
//! turns them into per-target uptime and latency statistics, a filtered
//! list of recent checks, and a CSV export.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(stats,   │    │(render) │    │         │  │
//! │  └────┬────┘    │ filter)  │    └─────────┘    └─────────┘  │
//! │       │         └──────────┘                                │
//! │       ▼                          ┌──────────┐               │
//! │  ┌─────────┐                     │  export  │──▶ .csv file  │
//! │  │ source  │◀── HttpFetcher |    └──────────┘               │
//! │  │ (input) │    FileFetcher                                 │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Snapshot wire types, the [`SnapshotFetcher`] trait with
//!   HTTP and file implementations, and the [`SnapshotClient`] that orders
//!   overlapping requests so only the most recently started one can update
//!   the display
//! - **[`data`]**: Pure aggregation ([`aggregate`]) and filtering
//!   ([`filter_checks`]) over one snapshot
//! - **[`export`]**: CSV encoding and export files
//! - **[`app`]**, **[`events`]**, **[`ui`]**: TUI state, input handling and
//!   ratatui rendering
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the local API (default http://localhost:7071)
//! pulseping-dash
//!
//! # Another API, 6 hour window, refresh every 30 seconds
//! pulseping-dash --api https://status.example.com --hours 6 --refresh 30
//!
//! # Fetch once and write the CSV export without opening the TUI
//! pulseping-dash --export pulseping-24h-export.csv
//! ```
//!
//! ### As a library
//!
//! ```
//! use pulseping_dash::{aggregate, encode_csv, Check, Snapshot};
//!
//! let snapshot = Snapshot {
//!     period_hours: 24,
//!     total_checks: 1,
//!     generated_at: "2024-05-01T10:00:00+00:00".to_string(),
//!     checks: vec![Check {
//!         timestamp: "2024-05-01T09:00:00+00:00".to_string(),
//!         url: "https://example.com".to_string(),
//!         status_code: Some(200),
//!         is_up: true,
//!         response_ms: Some(120.0),
//!     }],
//! };
//!
//! let summary = aggregate(&snapshot);
//! assert_eq!(summary.overall.avg_uptime_percent, 100.0);
//! assert!(encode_csv(&snapshot.checks).starts_with("timestamp,url"));
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod export;
pub mod logging;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{
    aggregate, filter_checks, OverallStats, StatusSummary, TargetFilter, TargetStats,
    TargetSummary, UptimeGrade,
};
pub use export::{encode_csv, export_filename, write_csv, write_export, ExportError};
pub use settings::Settings;
pub use source::{
    Check, FetchError, FileFetcher, HttpFetcher, LoadedSnapshot, RequestId, Resolution,
    Snapshot, SnapshotClient, SnapshotFetcher, SnapshotStore, WindowHours,
};
