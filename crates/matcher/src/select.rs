use std::sync::Arc;

use hashbrown::HashSet;
use index::Match;

use crate::target::Target;
use crate::types::MatcherConfig;

/// Turns ranked window hits into a short list of distinct entities.
///
/// Everything within `max(best * best_distance_multiplier,
/// max_distance_margin_returns)` of the best hit is kept, one entry per
/// entity, at most `max_returns` entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPolicy {
    pub max_returns: usize,
    pub max_distance_margin_returns: f64,
    pub best_distance_multiplier: f64,
}

impl SelectionPolicy {
    pub fn from_config(config: &MatcherConfig) -> Self {
        Self {
            max_returns: config.max_returns,
            max_distance_margin_returns: config.max_distance_margin_returns,
            best_distance_multiplier: config.best_distance_multiplier,
        }
    }

    /// Distance a candidate must stay strictly below to be selected.
    pub fn cutoff(&self, best: f64) -> f64 {
        (best * self.best_distance_multiplier).max(self.max_distance_margin_returns)
    }

    /// `candidates` must be ascending by distance. Stops at the first
    /// candidate at or beyond the cutoff.
    pub fn select<V>(&self, candidates: &[Match<&Target<V>>]) -> Vec<Arc<V>> {
        let Some(best) = candidates.first() else {
            return Vec::new();
        };
        let cutoff = self.cutoff(best.distance);

        let mut seen = HashSet::new();
        let mut selected = Vec::new();
        for candidate in candidates {
            if selected.len() >= self.max_returns || candidate.distance >= cutoff {
                break;
            }
            let target = candidate.element;
            if seen.insert(target.id) {
                selected.push(Arc::clone(&target.value));
            }
        }
        selected
    }
}

impl From<&MatcherConfig> for SelectionPolicy {
    fn from(config: &MatcherConfig) -> Self {
        Self::from_config(config)
    }
}

/// Merges two ascending hit lists into one ascending list.
///
/// On equal distances the second list's hit comes first.
pub fn merge_ascending<T>(first: Vec<Match<T>>, second: Vec<Match<T>>) -> Vec<Match<T>> {
    let mut merged = Vec::with_capacity(first.len() + second.len());
    let mut first = first.into_iter().peekable();
    let mut second = second.into_iter().peekable();

    loop {
        let take_first = match (first.peek(), second.peek()) {
            (Some(a), Some(b)) => a.distance < b.distance,
            _ => break,
        };
        let next = if take_first { first.next() } else { second.next() };
        merged.extend(next);
    }
    merged.extend(first);
    merged.extend(second);
    merged
}
