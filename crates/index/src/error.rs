use thiserror::Error;

use crate::metric::MetricError;

/// Errors produced while building or querying a [`FuzzyMatcher`](crate::FuzzyMatcher).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndexError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("type mismatch: no mapping supplied from `{from}` to `{to}`")]
    TypeMismatch {
        from: &'static str,
        to: &'static str,
    },
    #[error("metric failure: {0}")]
    Metric(#[from] MetricError),
}
