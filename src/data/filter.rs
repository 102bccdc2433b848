//! Target selection for the recent-checks view.

use std::fmt;

use crate::source::{Check, Snapshot};

/// Which checks the recent-checks view shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetFilter {
    /// Every check in the snapshot.
    #[default]
    All,
    /// Only checks for this url. The url need not exist in the snapshot.
    Url(String),
}

impl TargetFilter {
    /// True if `check` passes this filter.
    pub fn matches(&self, check: &Check) -> bool {
        match self {
            TargetFilter::All => true,
            TargetFilter::Url(url) => check.url == *url,
        }
    }

    /// Step to the next option of the selector: All, then each url in
    /// first-seen order, then back to All.
    ///
    /// A selection that is no longer among `urls` restarts from All.
    pub fn next(&self, urls: &[&str]) -> Self {
        let position = self.position(urls);
        match position {
            None => urls.first().map_or(TargetFilter::All, |u| TargetFilter::Url(u.to_string())),
            Some(i) => {
                urls.get(i + 1).map_or(TargetFilter::All, |u| TargetFilter::Url(u.to_string()))
            }
        }
    }

    /// Step to the previous option of the selector.
    pub fn prev(&self, urls: &[&str]) -> Self {
        match self.position(urls) {
            None => urls.last().map_or(TargetFilter::All, |u| TargetFilter::Url(u.to_string())),
            Some(0) => TargetFilter::All,
            Some(i) => TargetFilter::Url(urls[i - 1].to_string()),
        }
    }

    /// Index of the selected url in `urls`, `None` for All or a stale url.
    fn position(&self, urls: &[&str]) -> Option<usize> {
        match self {
            TargetFilter::All => None,
            TargetFilter::Url(url) => urls.iter().position(|u| u == url),
        }
    }
}

impl fmt::Display for TargetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetFilter::All => write!(f, "all targets"),
            TargetFilter::Url(url) => write!(f, "{}", url),
        }
    }
}

/// The checks to display for `filter`, in snapshot order.
///
/// An unmatched url yields an empty result, never an error.
pub fn filter_checks<'a>(snapshot: &'a Snapshot, filter: &TargetFilter) -> Vec<&'a Check> {
    snapshot.checks.iter().filter(|c| filter.matches(c)).collect()
}
