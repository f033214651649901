// Metrics hooks for the domain matchers.
//
// Callers install a global `FindMetrics` implementation via [`set_find_metrics`];
// every `find*` call on a contact or place matcher then reports its latency and
// the number of entities returned.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::SearchScope;

/// Kind of domain matcher reporting a find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    Contact,
    Place,
}

impl MatcherKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatcherKind::Contact => "contact",
            MatcherKind::Place => "place",
        }
    }
}

/// Metrics observer for find operations.
pub trait FindMetrics: Send + Sync {
    /// Record the outcome of a successful find.
    ///
    /// `scope` is the index set that was searched, `latency` the wall-clock
    /// duration of the call and `hit_count` the number of entities returned.
    fn record_find(
        &self,
        kind: MatcherKind,
        scope: SearchScope,
        latency: Duration,
        hit_count: usize,
    );
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn FindMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn FindMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn FindMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global find metrics recorder.
///
/// Typically called once during startup so all matchers share the same
/// metrics backend.
pub fn set_find_metrics(recorder: Option<Arc<dyn FindMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
