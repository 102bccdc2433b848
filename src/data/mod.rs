//! Statistics and filtering over a status snapshot.
//!
//! Both engines are pure functions of the current [`Snapshot`](crate::source::Snapshot);
//! they never fail on empty input or on a selection that matches nothing.
//!
//! ## Data Flow
//!
//! ```text
//! Snapshot (raw JSON)
//!        │
//!        ├──▶ aggregate()      ──▶ StatusSummary (per-target + overall)
//!        │
//!        └──▶ filter_checks()  ──▶ checks for the selected target
//! ```

pub mod filter;
pub mod stats;

pub use filter::{filter_checks, TargetFilter};
pub use stats::{
    aggregate, OverallStats, StatusSummary, TargetStats, TargetSummary, UptimeGrade,
};
