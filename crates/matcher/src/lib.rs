//! # Phrase matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` finds contacts and places from noisy text: a query typed with
//! typos or produced by speech recognition ("call jon", "navigate to king
//! st"). It sits on top of `canonical` (text preprocessing) and `index`
//! (generic nearest-neighbour search) and adds the domain pieces:
//!
//! - phrase windows so partial names match,
//! - a hybrid distance mixing spelling and pronunciation,
//! - length-normalized thresholds,
//! - a selection policy that keeps only hits close to the best one.
//!
//! ## Core Types
//!
//! - [`ContactMatcher`]: searches names and aliases, separately or merged.
//! - [`PlaceMatcher`]: searches names, addresses and categories in one index.
//! - [`MatcherConfig`]: phonetic weight, threshold and selection knobs.
//! - [`NormalizedMatcher`]: a `FuzzyMatcher` whose limits and distances are
//!   relative to the query length.
//! - [`HybridDistance`]: `w * phonetic + (1 - w) * lexical`.
//! - [`PhoneticBackend`]: an injected [`Pronouncer`] plus a distance over
//!   [`Pronunciation`]s.
//! - [`WindowGenerator`]: prefix and suffix windows at token boundaries.
//! - [`SelectionPolicy`] and [`merge_ascending`]: turn window hits into a
//!   short list of distinct entities.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{ContactFields, ContactMatcher, MatcherConfig};
//!
//! let contacts = vec![
//!     ContactFields::named("Andrew Smith"),
//!     ContactFields::named("John B"),
//!     ContactFields::named("John C").with_alias("Johnny"),
//! ];
//! let config = MatcherConfig {
//!     phonetic_weight_percentage: 0.0,
//!     ..MatcherConfig::contact_defaults()
//! };
//! let matcher = ContactMatcher::builder(contacts)
//!     .config(config)
//!     .build()
//!     .unwrap();
//!
//! let found = matcher.find("john").unwrap();
//! assert_eq!(found.len(), 2);
//! ```
//!
//! A positive phonetic weight needs a [`PhoneticBackend`]; `build` fails
//! with [`MatchError::InvalidArgument`] without one.
//!
//! ## Observability
//!
//! Every find runs in a `matcher.find` tracing span and logs its hit count
//! and latency. Install a [`FindMetrics`] implementation via
//! [`set_find_metrics`] to record the same numbers elsewhere.

mod contact;
mod distance;
mod engine;
mod metrics;
mod normalized;
mod place;
mod pronounce;
mod select;
mod target;
mod types;
mod windows;

pub use crate::contact::{ContactFields, ContactMatcher, ContactMatcherBuilder};
pub use crate::distance::{HybridDistance, HybridInput, LevenshteinDistance};
pub use crate::metrics::{set_find_metrics, FindMetrics, MatcherKind};
pub use crate::normalized::NormalizedMatcher;
pub use crate::place::{PlaceFields, PlaceMatcher, PlaceMatcherBuilder};
pub use crate::pronounce::{PhoneticBackend, Pronouncer, Pronunciation};
pub use crate::select::{merge_ascending, SelectionPolicy};
pub use crate::target::Target;
pub use crate::types::{FindRequest, MatchError, MatcherConfig, SearchScope};
pub use crate::windows::WindowGenerator;

pub use index::{DistanceMetric, Match, MetricError, SearchConfig, SearchStrategy};
