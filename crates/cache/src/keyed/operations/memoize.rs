//! Memoizing lookups

use crate::backing::BackingMap;
use crate::keyed::types::KeyedCache;
use tracing::trace;

impl<K, V, M> KeyedCache<K, V, M>
where
    K: Clone,
    V: Clone,
    M: BackingMap<K, V>,
{
    /// Return the cached value for `key`, computing and storing it on a miss
    ///
    /// `compute` runs without holding the lock, so two threads missing the
    /// same key at once may both compute. The first value stored wins and both
    /// callers receive it.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> V {
        match self.try_get_or_insert_with(key, || Ok::<V, std::convert::Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`KeyedCache::get_or_insert_with`]
    ///
    /// An error from `compute` is returned unchanged and nothing is cached.
    pub fn try_get_or_insert_with<E>(
        &self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        let key = self.normalize_owned(key);

        let cached = self.inner.map.read().get(&key).cloned();
        if let Some(value) = cached {
            self.inner.stats.record_hit();
            trace!(cache = %self.inner.name, "memoized hit");
            return Ok(value);
        }
        self.inner.stats.record_miss();

        let computed = compute()?;

        let (value, inserted) = self.write_map(|map| match map.get(&key) {
            Some(existing) => (existing.clone(), false),
            None => {
                map.insert(key, computed.clone());
                (computed, true)
            }
        });

        if inserted {
            self.inner.stats.record_writes(1, 0);
        }
        trace!(cache = %self.inner.name, inserted, "memoized miss");
        Ok(value)
    }
}
