use serde::Serialize;

/// A search hit: the matched element and its distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match<T> {
    pub element: T,
    /// Distance to the query (lower = closer).
    pub distance: f64,
}

impl<T> Match<T> {
    pub fn new(element: T, distance: f64) -> Self {
        Self { element, distance }
    }

    /// Rescales the distance, keeping the element.
    pub fn scaled(self, divisor: f64) -> Self {
        Self {
            element: self.element,
            distance: self.distance / divisor,
        }
    }
}
