use thiserror::Error;

/// Failure reported by a distance metric or a feature extractor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct MetricError {
    message: String,
}

impl MetricError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Distance between two features. Lower is closer.
///
/// Implementations should be non-negative and return `0.0` for identical
/// inputs. Errors abort the current query but leave the index usable.
pub trait DistanceMetric<F: ?Sized>: Send + Sync {
    fn distance(&self, a: &F, b: &F) -> Result<f64, MetricError>;
}

impl<F, M> DistanceMetric<F> for M
where
    F: ?Sized,
    M: Fn(&F, &F) -> Result<f64, MetricError> + Send + Sync,
{
    fn distance(&self, a: &F, b: &F) -> Result<f64, MetricError> {
        self(a, b)
    }
}
