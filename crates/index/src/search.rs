//! Exhaustive k-nearest search over cached features.
//!
//! Two strategies share one contract: every target whose distance is
//! strictly below the limit competes, the `k` smallest win, ties go to the
//! lower target position.
//!
//! - **BruteForce**: a single-threaded scan in target order.
//! - **Accelerated**: the same scan split across the rayon pool. Partial
//!   top-k sets are merged, so the answer is identical to brute force.
//!
//! Acceleration only pays off on large target sets; below
//! `min_targets_for_acceleration` the linear scan is used regardless.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Which scan implementation answers a query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    #[default]
    BruteForce,
    Accelerated,
}

/// Configuration for nearest-neighbour search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Scan implementation.
    /// Default: BruteForce
    #[serde(default)]
    pub strategy: SearchStrategy,
    /// Minimum number of targets before the accelerated scan is used.
    /// Default: 1024
    #[serde(default = "SearchConfig::default_min_targets")]
    pub min_targets_for_acceleration: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::BruteForce,
            min_targets_for_acceleration: Self::default_min_targets(),
        }
    }
}

impl SearchConfig {
    fn default_min_targets() -> usize {
        1024
    }

    pub fn accelerated() -> Self {
        Self::default().with_strategy(SearchStrategy::Accelerated)
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_min_targets_for_acceleration(mut self, min: usize) -> Self {
        self.min_targets_for_acceleration = min;
        self
    }

    /// Check if the accelerated scan should be used for `num_targets`.
    pub fn should_accelerate(&self, num_targets: usize) -> bool {
        self.strategy == SearchStrategy::Accelerated
            && num_targets >= self.min_targets_for_acceleration
    }
}

/// A scored target position.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub(crate) index: usize,
    pub(crate) distance: f64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.index.cmp(&other.index))
    }
}

/// Keeps the `k` smallest candidates seen so far.
pub(crate) struct TopK {
    k: usize,
    heap: BinaryHeap<Candidate>,
}

impl TopK {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.saturating_add(1)),
        }
    }

    pub(crate) fn offer(&mut self, candidate: Candidate) {
        if self.heap.len() < self.k {
            self.heap.push(candidate);
        } else if let Some(worst) = self.heap.peek() {
            if candidate < *worst {
                self.heap.pop();
                self.heap.push(candidate);
            }
        }
    }

    fn merge(mut self, other: TopK) -> TopK {
        for candidate in other.heap {
            self.offer(candidate);
        }
        self
    }

    /// Winners in ascending (distance, index) order.
    pub(crate) fn into_sorted(self) -> Vec<Candidate> {
        self.heap.into_sorted_vec()
    }
}

/// Scans positions `0..len` in order.
pub(crate) fn linear_scan<E>(
    len: usize,
    k: usize,
    limit: f64,
    distance_at: impl Fn(usize) -> Result<f64, E>,
) -> Result<Vec<Candidate>, E> {
    let mut top = TopK::new(k);
    for index in 0..len {
        let distance = distance_at(index)?;
        if distance < limit {
            top.offer(Candidate { index, distance });
        }
    }
    Ok(top.into_sorted())
}

/// Scans positions `0..len` on the rayon pool.
pub(crate) fn parallel_scan<E: Send>(
    len: usize,
    k: usize,
    limit: f64,
    distance_at: impl Fn(usize) -> Result<f64, E> + Sync,
) -> Result<Vec<Candidate>, E> {
    let top = (0..len)
        .into_par_iter()
        .try_fold(
            || TopK::new(k),
            |mut top, index| {
                let distance = distance_at(index)?;
                if distance < limit {
                    top.offer(Candidate { index, distance });
                }
                Ok(top)
            },
        )
        .try_reduce(|| TopK::new(k), |left, right| Ok(left.merge(right)))?;
    Ok(top.into_sorted())
}
