use std::fmt;
use std::sync::Arc;

/// One searchable phrase variant of an entity.
///
/// Every variant generated from the same entity carries the same `id`, its
/// position in the caller's entity list. Results are deduplicated on it.
pub struct Target<V> {
    pub value: Arc<V>,
    pub phrase: String,
    pub id: usize,
}

impl<V> Target<V> {
    pub fn new(value: Arc<V>, phrase: impl Into<String>, id: usize) -> Self {
        Self {
            value,
            phrase: phrase.into(),
            id,
        }
    }
}

impl<V> Clone for Target<V> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            phrase: self.phrase.clone(),
            id: self.id,
        }
    }
}

impl<V> fmt::Debug for Target<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("phrase", &self.phrase)
            .field("id", &self.id)
            .finish()
    }
}
