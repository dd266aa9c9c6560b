//! Snapshots and statistics

use crate::backing::BackingMap;
use crate::keyed::types::KeyedCache;
use crate::stats::CacheStatistics;

impl<K, V, M> KeyedCache<K, V, M>
where
    K: Clone,
    M: BackingMap<K, V>,
{
    /// Copy of every stored (normalized) key, taken under one shared lock
    pub fn keys(&self) -> Vec<K> {
        self.inner
            .map
            .read()
            .entries()
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Copy of every entry, taken under one shared lock
    ///
    /// Order follows the backing map's iteration order.
    pub fn snapshot(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.inner
            .map
            .read()
            .entries()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Get cache statistics
    pub fn statistics(&self) -> CacheStatistics {
        let entry_count = self.inner.map.read().len();
        self.inner.stats.snapshot(entry_count)
    }
}
