//! # Fuzzy index
//!
//! Generic nearest-neighbour search where "distance" is whatever the caller
//! says it is: edit distance over spellings, a phonetic distance over
//! pronunciations, or a weighted mix of both.
//!
//! ## Core Types
//!
//! - [`DistanceMetric`]: capability trait for `distance(a, b) -> f64`.
//!   Closures of the right shape implement it.
//! - [`FuzzyMatcher`]: immutable list of targets plus a lazily filled
//!   per-target feature cache. Answers `nearest`, `nearest_within`,
//!   `k_nearest` and `k_nearest_within`.
//! - [`Match`]: a hit and its distance.
//! - [`SearchConfig`]: brute-force or accelerated (parallel) scan. Both
//!   return identical results.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use index::{FuzzyMatcher, MetricError};
//!
//! let names = vec!["andrew".to_string(), "john".to_string(), "jennifer".to_string()];
//! let edits = |a: &String, b: &String| -> Result<f64, MetricError> {
//!     Ok(a.chars().zip(b.chars()).filter(|(x, y)| x != y).count() as f64
//!         + a.chars().count().abs_diff(b.chars().count()) as f64)
//! };
//!
//! let matcher = FuzzyMatcher::<String, String>::builder(names, Arc::new(edits))
//!     .build()
//!     .unwrap();
//!
//! let hit = matcher.nearest(&"jon".to_string()).unwrap().unwrap();
//! assert_eq!(hit.element, "john");
//! ```

mod cache;
mod error;
mod matcher;
mod metric;
mod query;
mod search;

pub use crate::error::IndexError;
pub use crate::matcher::{FuzzyMatcher, FuzzyMatcherBuilder};
pub use crate::metric::{DistanceMetric, MetricError};
pub use crate::query::Match;
pub use crate::search::{SearchConfig, SearchStrategy};
