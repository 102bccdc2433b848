//! Loading/error/staleness state for the displayed snapshot.
//!
//! The store is the only owner of the "current snapshot". Every request is
//! stamped with a monotonically increasing [`RequestId`]; a response is only
//! applied if no newer request has been started since. A slow, stale
//! response can therefore never overwrite a fresher one, regardless of the
//! order in which responses arrive.

use std::time::Instant;

use crate::data::{aggregate, StatusSummary};

use super::{FetchError, Snapshot, WindowHours};

/// Sequence number of a snapshot request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// The raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A snapshot together with the statistics derived from it.
///
/// Built in one step and swapped in with a single assignment, so readers
/// never see statistics from a different snapshot than the one displayed.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub snapshot: Snapshot,
    pub summary: StatusSummary,
    /// The window this snapshot was requested for.
    pub window: WindowHours,
    pub received_at: Instant,
}

impl LoadedSnapshot {
    /// Derive statistics for `snapshot` and bundle them.
    pub fn new(snapshot: Snapshot, window: WindowHours) -> Self {
        let summary = aggregate(&snapshot);
        Self {
            snapshot,
            summary,
            window,
            received_at: Instant::now(),
        }
    }
}

/// What happened to a response handed to [`SnapshotStore::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The response became the current snapshot.
    Applied,
    /// The latest request failed; the previous snapshot stays current.
    Failed(FetchError),
    /// A newer request was started after this one; the response was dropped.
    Superseded,
}

/// Owner of the current snapshot and its request bookkeeping.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    last_issued: u64,
    pending: Option<(RequestId, WindowHours)>,
    current: Option<LoadedSnapshot>,
    error: Option<FetchError>,
}

impl SnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of a request.
    ///
    /// Sets the loading flag and clears any previous error. The current
    /// snapshot stays visible while the request is in flight.
    pub fn begin(&mut self, window: WindowHours) -> RequestId {
        self.last_issued += 1;
        let id = RequestId(self.last_issued);
        self.pending = Some((id, window));
        self.error = None;
        id
    }

    /// Apply the outcome of request `id`, unless it has been superseded.
    pub fn resolve(&mut self, id: RequestId, result: Result<Snapshot, FetchError>) -> Resolution {
        let window = match self.pending {
            Some((pending_id, window)) if pending_id == id => window,
            _ => return Resolution::Superseded,
        };
        self.pending = None;

        match result {
            Ok(snapshot) => {
                self.current = Some(LoadedSnapshot::new(snapshot, window));
                self.error = None;
                Resolution::Applied
            }
            Err(err) => {
                self.error = Some(err.clone());
                Resolution::Failed(err)
            }
        }
    }

    /// The snapshot currently displayed, if any has loaded yet.
    pub fn current(&self) -> Option<&LoadedSnapshot> {
        self.current.as_ref()
    }

    /// True while the most recent request is still in flight.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// The error from the most recent request, if it failed.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// The id of the most recently started request.
    pub fn latest_request(&self) -> Option<RequestId> {
        (self.last_issued > 0).then_some(RequestId(self.last_issued))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Check;

    fn snapshot_with(url: &str) -> Snapshot {
        Snapshot {
            period_hours: 24,
            total_checks: 1,
            generated_at: "2024-05-01T10:00:00+00:00".to_string(),
            checks: vec![Check {
                timestamp: "2024-05-01T09:00:00+00:00".to_string(),
                url: url.to_string(),
                status_code: Some(200),
                is_up: true,
                response_ms: Some(10.0),
            }],
        }
    }

    fn current_url(store: &SnapshotStore) -> &str {
        &store.current().unwrap().snapshot.checks[0].url
    }

    #[test]
    fn test_begin_sets_loading_and_clears_error() {
        let mut store = SnapshotStore::new();
        let id = store.begin(WindowHours::default());
        store.resolve(id, Err(FetchError::Status(503)));
        assert!(store.error().is_some());
        assert!(!store.is_loading());

        store.begin(WindowHours::default());
        assert!(store.is_loading());
        assert!(store.error().is_none());
    }

    #[test]
    fn test_success_applies_snapshot_and_summary_together() {
        let mut store = SnapshotStore::new();
        let id = store.begin(WindowHours::new(6));
        assert_eq!(store.resolve(id, Ok(snapshot_with("a"))), Resolution::Applied);

        let loaded = store.current().unwrap();
        assert_eq!(loaded.window.get(), 6);
        assert_eq!(loaded.summary.targets.len(), 1);
        assert_eq!(loaded.summary.targets[0].url, "a");
        assert!(!store.is_loading());
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let mut store = SnapshotStore::new();
        let first = store.begin(WindowHours::default());
        store.resolve(first, Ok(snapshot_with("a")));

        let second = store.begin(WindowHours::default());
        assert!(store.current().is_some(), "old data stays visible while loading");

        let resolution = store.resolve(second, Err(FetchError::Transport("refused".into())));
        assert!(matches!(resolution, Resolution::Failed(FetchError::Transport(_))));
        assert_eq!(current_url(&store), "a");
        assert_eq!(
            store.error().map(FetchError::user_message),
            Some("Could not load data from the API")
        );
        assert!(!store.is_loading());
    }

    #[test]
    fn test_later_request_wins_when_it_resolves_first() {
        let mut store = SnapshotStore::new();
        let a = store.begin(WindowHours::default());
        let b = store.begin(WindowHours::default());

        assert_eq!(store.resolve(b, Ok(snapshot_with("b"))), Resolution::Applied);
        assert_eq!(store.resolve(a, Ok(snapshot_with("a"))), Resolution::Superseded);
        assert_eq!(current_url(&store), "b");
    }

    #[test]
    fn test_stale_response_is_dropped_while_newer_is_pending() {
        let mut store = SnapshotStore::new();
        let a = store.begin(WindowHours::default());
        let b = store.begin(WindowHours::default());

        assert_eq!(store.resolve(a, Ok(snapshot_with("a"))), Resolution::Superseded);
        assert!(store.current().is_none());
        assert!(store.is_loading(), "b is still in flight");

        assert_eq!(store.resolve(b, Ok(snapshot_with("b"))), Resolution::Applied);
        assert_eq!(current_url(&store), "b");
    }

    #[test]
    fn test_stale_failure_does_not_surface_error() {
        let mut store = SnapshotStore::new();
        let a = store.begin(WindowHours::default());
        let b = store.begin(WindowHours::default());

        assert_eq!(store.resolve(a, Err(FetchError::Status(500))), Resolution::Superseded);
        assert!(store.error().is_none());
        assert_eq!(store.resolve(b, Ok(snapshot_with("b"))), Resolution::Applied);
    }

    #[test]
    fn test_duplicate_resolution_is_ignored() {
        let mut store = SnapshotStore::new();
        let a = store.begin(WindowHours::default());
        assert_eq!(store.resolve(a, Ok(snapshot_with("a"))), Resolution::Applied);
        assert_eq!(store.resolve(a, Ok(snapshot_with("x"))), Resolution::Superseded);
        assert_eq!(current_url(&store), "a");
    }

    #[test]
    fn test_request_ids_are_monotonic() {
        let mut store = SnapshotStore::new();
        assert!(store.latest_request().is_none());
        let a = store.begin(WindowHours::default());
        let b = store.begin(WindowHours::default());
        assert!(b > a);
        assert_eq!(store.latest_request(), Some(b));
    }
}
