//! Per-target and overall uptime statistics.
//!
//! Everything here is a pure function of one [`Snapshot`]: the same snapshot
//! always produces the same summary, and no state survives between calls.

use std::collections::HashMap;

use crate::source::Snapshot;

/// Uptime (in percent) at or above which a target is graded good.
pub const GOOD_UPTIME: f64 = 99.0;
/// Uptime (in percent) at or above which a target is graded degraded.
pub const DEGRADED_UPTIME: f64 = 95.0;

/// Statistics for one target within a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetStats {
    /// Number of checks for this target.
    pub total: u64,
    /// Number of those checks classified up.
    pub up: u64,
    /// `up / total * 100`, rounded to one decimal place.
    pub uptime_percent: f64,
    /// Mean of the present latencies, rounded to whole milliseconds.
    /// `None` when no check for this target carried a latency.
    pub avg_latency_ms: Option<u64>,
}

impl TargetStats {
    /// Badge grade for the uptime percentage.
    pub fn grade(&self) -> UptimeGrade {
        UptimeGrade::from_percent(self.uptime_percent)
    }
}

/// A target url together with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSummary {
    pub url: String,
    pub stats: TargetStats,
}

/// Snapshot-wide statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct OverallStats {
    /// Number of distinct urls in the snapshot.
    pub monitored_targets: usize,
    /// The producer-reported check count, as is.
    pub total_checks: u64,
    /// Unweighted mean of the per-target uptime percentages, rounded to one
    /// decimal place. A target with 2 checks counts as much as one with 200.
    pub avg_uptime_percent: f64,
}

/// Everything derived from a snapshot for display.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSummary {
    /// Per-target statistics in first-seen order.
    pub targets: Vec<TargetSummary>,
    pub overall: OverallStats,
}

impl StatusSummary {
    /// Look up the statistics for one url.
    pub fn get(&self, url: &str) -> Option<&TargetStats> {
        self.targets.iter().find(|t| t.url == url).map(|t| &t.stats)
    }
}

/// Coarse uptime classification used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UptimeGrade {
    Poor,
    Degraded,
    Good,
}

impl UptimeGrade {
    /// Grade an uptime percentage.
    pub fn from_percent(percent: f64) -> Self {
        if percent >= GOOD_UPTIME {
            UptimeGrade::Good
        } else if percent >= DEGRADED_UPTIME {
            UptimeGrade::Degraded
        } else {
            UptimeGrade::Poor
        }
    }

    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            UptimeGrade::Good => "OK",
            UptimeGrade::Degraded => "WARN",
            UptimeGrade::Poor => "BAD",
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    total: u64,
    up: u64,
    latency_sum: f64,
    latency_count: u64,
}

/// Derive per-target and overall statistics from a snapshot.
pub fn aggregate(snapshot: &Snapshot) -> StatusSummary {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<(&str, Tally)> = Vec::new();

    for check in &snapshot.checks {
        let slot = *index.entry(check.url.as_str()).or_insert_with(|| {
            tallies.push((check.url.as_str(), Tally::default()));
            tallies.len() - 1
        });
        let tally = &mut tallies[slot].1;

        tally.total += 1;
        if check.is_up {
            tally.up += 1;
        }
        // Missing latency is skipped, not counted as zero
        if let Some(ms) = check.response_ms {
            tally.latency_sum += ms;
            tally.latency_count += 1;
        }
    }

    let targets: Vec<TargetSummary> = tallies
        .into_iter()
        .map(|(url, tally)| TargetSummary {
            url: url.to_string(),
            stats: target_stats(&tally),
        })
        .collect();

    let avg_uptime_percent = if targets.is_empty() {
        0.0
    } else {
        let sum: f64 = targets.iter().map(|t| t.stats.uptime_percent).sum();
        round_to_tenth(sum / targets.len() as f64)
    };

    let overall = OverallStats {
        monitored_targets: targets.len(),
        total_checks: snapshot.total_checks,
        avg_uptime_percent,
    };

    StatusSummary { targets, overall }
}

fn target_stats(tally: &Tally) -> TargetStats {
    let uptime_percent = if tally.total == 0 {
        0.0
    } else {
        round_to_tenth(tally.up as f64 / tally.total as f64 * 100.0)
    };

    let avg_latency_ms = (tally.latency_count > 0)
        .then(|| (tally.latency_sum / tally.latency_count as f64).round().max(0.0) as u64);

    TargetStats {
        total: tally.total,
        up: tally.up,
        uptime_percent,
        avg_latency_ms,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
