//! Lazily computed per-target features.
//!
//! Each target owns one compute-once cell, addressed by its position in the
//! matcher. A feature is derived on first use and kept for the matcher's
//! lifetime. Concurrent first accesses race to initialize; only one value is
//! stored. Failed extractions leave the cell empty so a later query retries.

use once_cell::sync::OnceCell;

pub(crate) struct FeatureCache<P> {
    cells: Box<[OnceCell<P>]>,
}

impl<P> FeatureCache<P> {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            cells: (0..len).map(|_| OnceCell::new()).collect(),
        }
    }

    pub(crate) fn get_or_try_init<E>(
        &self,
        index: usize,
        init: impl FnOnce() -> Result<P, E>,
    ) -> Result<&P, E> {
        self.cells[index].get_or_try_init(init)
    }

    /// Number of features computed so far.
    pub(crate) fn initialized(&self) -> usize {
        self.cells.iter().filter(|cell| cell.get().is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_init_is_retried() {
        let cache: FeatureCache<u32> = FeatureCache::new(2);
        let first: Result<&u32, &str> = cache.get_or_try_init(0, || Err("nope"));
        assert!(first.is_err());
        assert_eq!(cache.initialized(), 0);

        let second: Result<&u32, &str> = cache.get_or_try_init(0, || Ok(7));
        assert_eq!(second, Ok(&7));
        let third: Result<&u32, &str> = cache.get_or_try_init(0, || Ok(9));
        assert_eq!(third, Ok(&7));
        assert_eq!(cache.initialized(), 1);
    }
}
