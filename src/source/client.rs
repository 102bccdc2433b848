//! Background snapshot requests with last-initiated-wins ordering.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{
    FetchError, LoadedSnapshot, RequestId, Resolution, Snapshot, SnapshotFetcher, SnapshotStore,
    WindowHours,
};

/// A finished request travelling back from its background task.
#[derive(Debug)]
struct Completion {
    id: RequestId,
    result: Result<Snapshot, FetchError>,
}

/// Issues snapshot requests without blocking the caller.
///
/// Requests run as tasks on the given tokio runtime. Their results come back
/// over a channel and are applied on the caller's thread, either by
/// [`poll`](Self::poll) from the TUI loop or by awaiting
/// [`settle`](Self::settle). The [`SnapshotStore`] discards any response
/// that a newer request has superseded.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use pulseping_dash::{FileFetcher, SnapshotClient, WindowHours};
///
/// # tokio_test::block_on(async {
/// let fetcher = Arc::new(FileFetcher::new("snapshot.json"));
/// let mut client = SnapshotClient::new(fetcher, tokio::runtime::Handle::current());
/// client.fetch_snapshot(WindowHours::default());
/// client.settle().await;
/// # });
/// ```
#[derive(Debug)]
pub struct SnapshotClient {
    fetcher: Arc<dyn SnapshotFetcher>,
    runtime: Handle,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    store: SnapshotStore,
}

impl SnapshotClient {
    /// Create a client that spawns requests onto `runtime`.
    pub fn new(fetcher: Arc<dyn SnapshotFetcher>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            fetcher,
            runtime,
            tx,
            rx,
            store: SnapshotStore::new(),
        }
    }

    /// Returns a description of where snapshots come from.
    pub fn description(&self) -> &str {
        self.fetcher.description()
    }

    /// Start fetching a snapshot for `window`.
    ///
    /// Any request still in flight is superseded: its response will be
    /// discarded when it arrives.
    pub fn fetch_snapshot(&mut self, window: WindowHours) -> RequestId {
        let id = self.store.begin(window);
        info!(request = id.get(), hours = window.get(), "fetching snapshot");

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = fetcher.fetch(window).await;
            // Only fails if the client was dropped
            let _ = tx.send(Completion { id, result });
        });

        id
    }

    /// Apply every response that has arrived, without blocking.
    ///
    /// Returns the outcome of the latest request if it resolved during this
    /// call, or `None` if nothing relevant arrived.
    pub fn poll(&mut self) -> Option<Resolution> {
        let mut outcome = None;
        while let Ok(completion) = self.rx.try_recv() {
            let resolution = self.apply(completion);
            if resolution != Resolution::Superseded {
                outcome = Some(resolution);
            }
        }
        outcome
    }

    /// Wait for the next response to arrive and apply it.
    ///
    /// Only call this with a request outstanding; otherwise it waits forever.
    pub async fn next_resolution(&mut self) -> Option<Resolution> {
        let completion = self.rx.recv().await?;
        Some(self.apply(completion))
    }

    /// Wait until the most recently started request has resolved.
    ///
    /// Returns `None` immediately if nothing is loading.
    pub async fn settle(&mut self) -> Option<Resolution> {
        while self.store.is_loading() {
            match self.next_resolution().await? {
                Resolution::Superseded => continue,
                resolution => return Some(resolution),
            }
        }
        None
    }

    fn apply(&mut self, completion: Completion) -> Resolution {
        let Completion { id, result } = completion;
        let resolution = self.store.resolve(id, result);
        match &resolution {
            Resolution::Applied => {
                let checks = self.store.current().map_or(0, |c| c.snapshot.checks.len());
                info!(request = id.get(), checks, "snapshot applied");
            }
            Resolution::Failed(err) => {
                warn!(request = id.get(), error = %err, "snapshot request failed");
            }
            Resolution::Superseded => {
                debug!(request = id.get(), "discarding superseded response");
            }
        }
        resolution
    }

    /// The snapshot currently displayed.
    pub fn current(&self) -> Option<&LoadedSnapshot> {
        self.store.current()
    }

    /// True while the latest request is in flight.
    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    /// The error from the latest request, if it failed.
    pub fn error(&self) -> Option<&FetchError> {
        self.store.error()
    }

    /// The underlying state container.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Check;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    type Reply = Result<Snapshot, FetchError>;

    /// A fetcher whose responses are released by the test, keyed by window.
    #[derive(Debug)]
    struct GatedFetcher {
        gates: Mutex<HashMap<u32, oneshot::Receiver<Reply>>>,
    }

    impl GatedFetcher {
        fn new(windows: &[u32]) -> (Self, HashMap<u32, oneshot::Sender<Reply>>) {
            let mut gates = HashMap::new();
            let mut senders = HashMap::new();
            for &w in windows {
                let (tx, rx) = oneshot::channel();
                gates.insert(w, rx);
                senders.insert(w, tx);
            }
            (
                Self {
                    gates: Mutex::new(gates),
                },
                senders,
            )
        }
    }

    #[async_trait]
    impl SnapshotFetcher for GatedFetcher {
        async fn fetch(&self, window: WindowHours) -> Result<Snapshot, FetchError> {
            let gate = self.gates.lock().unwrap().remove(&window.get());
            match gate {
                Some(rx) => rx.await.unwrap_or(Err(FetchError::Transport("gate dropped".into()))),
                None => Err(FetchError::Transport("unexpected request".into())),
            }
        }

        fn description(&self) -> &str {
            "gated"
        }
    }

    fn snapshot_with(url: &str) -> Snapshot {
        Snapshot {
            period_hours: 1,
            total_checks: 1,
            generated_at: "2024-05-01T10:00:00+00:00".to_string(),
            checks: vec![Check {
                timestamp: "2024-05-01T09:00:00+00:00".to_string(),
                url: url.to_string(),
                status_code: Some(200),
                is_up: true,
                response_ms: Some(5.0),
            }],
        }
    }

    fn current_url(client: &SnapshotClient) -> &str {
        &client.current().unwrap().snapshot.checks[0].url
    }

    #[tokio::test]
    async fn test_single_fetch_applies() {
        let (fetcher, mut gates) = GatedFetcher::new(&[24]);
        let mut client = SnapshotClient::new(Arc::new(fetcher), Handle::current());
        assert_eq!(client.description(), "gated");

        client.fetch_snapshot(WindowHours::new(24));
        assert!(client.is_loading());

        gates.remove(&24).unwrap().send(Ok(snapshot_with("a"))).unwrap();
        assert_eq!(client.settle().await, Some(Resolution::Applied));
        assert!(!client.is_loading());
        assert_eq!(current_url(&client), "a");
    }

    #[tokio::test]
    async fn test_later_request_wins_even_when_earlier_resolves_last() {
        let (fetcher, mut gates) = GatedFetcher::new(&[1, 2]);
        let mut client = SnapshotClient::new(Arc::new(fetcher), Handle::current());

        client.fetch_snapshot(WindowHours::new(1)); // A
        client.fetch_snapshot(WindowHours::new(2)); // B

        gates.remove(&2).unwrap().send(Ok(snapshot_with("b"))).unwrap();
        assert_eq!(client.settle().await, Some(Resolution::Applied));
        assert_eq!(current_url(&client), "b");

        gates.remove(&1).unwrap().send(Ok(snapshot_with("a"))).unwrap();
        assert_eq!(client.next_resolution().await, Some(Resolution::Superseded));
        assert_eq!(current_url(&client), "b");
        assert_eq!(client.current().unwrap().window.get(), 2);
    }

    #[tokio::test]
    async fn test_stale_response_arriving_first_is_discarded() {
        let (fetcher, mut gates) = GatedFetcher::new(&[1, 2]);
        let mut client = SnapshotClient::new(Arc::new(fetcher), Handle::current());

        client.fetch_snapshot(WindowHours::new(1));
        client.fetch_snapshot(WindowHours::new(2));

        gates.remove(&1).unwrap().send(Ok(snapshot_with("a"))).unwrap();
        assert_eq!(client.next_resolution().await, Some(Resolution::Superseded));
        assert!(client.current().is_none());
        assert!(client.is_loading());

        gates.remove(&2).unwrap().send(Ok(snapshot_with("b"))).unwrap();
        assert_eq!(client.settle().await, Some(Resolution::Applied));
        assert_eq!(current_url(&client), "b");
    }

    #[tokio::test]
    async fn test_failure_preserves_snapshot() {
        let (fetcher, mut gates) = GatedFetcher::new(&[1, 2]);
        let mut client = SnapshotClient::new(Arc::new(fetcher), Handle::current());

        client.fetch_snapshot(WindowHours::new(1));
        gates.remove(&1).unwrap().send(Ok(snapshot_with("a"))).unwrap();
        client.settle().await;

        client.fetch_snapshot(WindowHours::new(2));
        gates.remove(&2).unwrap().send(Err(FetchError::Status(502))).unwrap();
        assert_eq!(
            client.settle().await,
            Some(Resolution::Failed(FetchError::Status(502)))
        );
        assert_eq!(current_url(&client), "a");
        assert_eq!(client.error(), Some(&FetchError::Status(502)));
    }

    #[tokio::test]
    async fn test_poll_is_non_blocking() {
        let (fetcher, mut gates) = GatedFetcher::new(&[3]);
        let mut client = SnapshotClient::new(Arc::new(fetcher), Handle::current());

        assert!(client.poll().is_none());
        client.fetch_snapshot(WindowHours::new(3));
        assert!(client.poll().is_none());

        gates.remove(&3).unwrap().send(Ok(snapshot_with("c"))).unwrap();
        let mut outcome = None;
        for _ in 0..100 {
            tokio::task::yield_now().await;
            outcome = client.poll();
            if outcome.is_some() {
                break;
            }
        }
        assert_eq!(outcome, Some(Resolution::Applied));
        assert_eq!(current_url(&client), "c");
    }

    #[tokio::test]
    async fn test_settle_without_request_returns_none() {
        let (fetcher, _gates) = GatedFetcher::new(&[]);
        let mut client = SnapshotClient::new(Arc::new(fetcher), Handle::current());
        assert_eq!(client.settle().await, None);
    }
}
