//! Wire types for status snapshots.
//!
//! These types match the JSON body returned by the Snapshot API
//! (`GET /api/status?hours=N`). They are the common data format between the
//! check collector and this dashboard.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A single probe result for one target at one point in time.
///
/// Checks are produced upstream and never modified here. In particular
/// `is_up` is trusted verbatim and never recomputed from `status_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    /// When the probe started, as an ISO-8601 UTC string.
    pub timestamp: String,
    /// The probed target.
    pub url: String,
    /// HTTP status, absent when the probe failed before a response arrived.
    #[serde(default)]
    pub status_code: Option<u16>,
    /// The producer's up/down classification.
    pub is_up: bool,
    /// Latency in milliseconds, absent on timeout or transport failure.
    #[serde(default)]
    pub response_ms: Option<f64>,
}

/// All checks and metadata for one requested time window.
///
/// `checks` keeps the producer's order; nothing in this crate re-sorts it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The window size the producer applied.
    pub period_hours: u32,
    /// Producer-reported count. May differ from `checks.len()` if the
    /// producer truncates; this crate does not reconcile the two.
    pub total_checks: u64,
    /// When the producer generated the snapshot.
    pub generated_at: String,
    /// Missing `checks` is read as "no data".
    #[serde(default)]
    pub checks: Vec<Check>,
}

impl Snapshot {
    /// Returns true if the snapshot carries no checks.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Distinct target urls in first-seen order.
    pub fn urls(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.checks.iter().map(|c| c.url.as_str()).filter(|url| seen.insert(*url)).collect()
    }
}
