//! Keyed cache write operations

use crate::backing::BackingMap;
use crate::keyed::types::KeyedCache;
use tracing::{debug, trace};

impl<K, V, M> KeyedCache<K, V, M>
where
    K: Clone,
    M: BackingMap<K, V>,
{
    /// Store a value under the normalized key, replacing any previous value
    ///
    /// `None` is dropped without touching the cache.
    pub fn put(&self, key: K, value: impl Into<Option<V>>) {
        let Some(value) = value.into() else {
            self.inner.stats.record_skipped(1);
            trace!(cache = %self.inner.name, "put skipped: absent value");
            return;
        };

        let key = self.normalize_owned(key);
        let replaced = self.inner.map.write().insert(key, value).is_some();

        self.inner.stats.record_writes(u64::from(!replaced), u64::from(replaced));
        trace!(cache = %self.inner.name, replaced, "put");
    }

    /// Store many values under a single exclusive lock
    ///
    /// Keys are normalized before the lock is taken. Absent values are skipped.
    pub fn put_all<I, O>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, O)>,
        O: Into<Option<V>>,
    {
        let mut skipped = 0u64;
        let batch: Vec<(K, V)> = entries
            .into_iter()
            .filter_map(|(key, value)| match value.into() {
                Some(value) => Some((self.normalize_owned(key), value)),
                None => {
                    skipped += 1;
                    None
                }
            })
            .collect();

        let submitted = batch.len();
        let replaced = self.write_map(|map| {
            batch
                .into_iter()
                .map(|(key, value)| map.insert(key, value).is_some())
                .filter(|replaced| *replaced)
                .count()
        });

        let replaced = replaced as u64;
        self.inner
            .stats
            .record_writes(submitted as u64 - replaced, replaced);
        self.inner.stats.record_skipped(skipped);
        trace!(
            cache = %self.inner.name,
            submitted,
            replaced,
            skipped,
            "put_all"
        );
    }

    /// Remove an entry and return its previous value
    pub fn remove(&self, key: &K) -> Option<V> {
        let key = self.normalize(key);
        let removed = self.inner.map.write().remove(&key);

        if removed.is_some() {
            self.inner.stats.record_removals(1);
        }
        trace!(cache = %self.inner.name, removed = removed.is_some(), "remove");
        removed
    }

    /// Remove all entries
    pub fn clear(&self) {
        let dropped = self.write_map(|map| {
            let dropped = map.len();
            map.clear();
            dropped
        });

        self.inner.stats.record_clear();
        debug!(cache = %self.inner.name, dropped, "cache cleared");
    }

    /// Keep only the entries for which `keep` returns true
    ///
    /// Runs under one exclusive lock; `keep` may update values in place.
    /// Returns the number of entries removed.
    pub fn retain(&self, mut keep: impl FnMut(&K, &mut V) -> bool) -> usize {
        let removed = self.write_map(|map| {
            let before = map.len();
            map.retain(&mut keep);
            before - map.len()
        });

        self.inner.stats.record_removals(removed as u64);
        trace!(cache = %self.inner.name, removed, "retain");
        removed
    }
}
