//! Keyed cache read operations

use crate::backing::BackingMap;
use crate::keyed::types::KeyedCache;
use std::borrow::Cow;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::trace;

impl<K, V, M> KeyedCache<K, V, M>
where
    K: Eq + Hash + Clone,
    V: Clone,
    M: BackingMap<K, V>,
{
    /// Get a copy of the value stored under the normalized key
    pub fn get(&self, key: &K) -> Option<V> {
        let key = self.normalize(key);
        let value = self.inner.map.read().get(&key).cloned();

        match value {
            Some(_) => self.inner.stats.record_hit(),
            None => self.inner.stats.record_miss(),
        }
        trace!(cache = %self.inner.name, hit = value.is_some(), "get");
        value
    }

    /// Get copies of the values for every present key, under one shared lock
    ///
    /// Keys that normalize to the same entry yield one value, in the position
    /// of their first occurrence.
    pub fn get_many<'k, I>(&self, keys: I) -> Vec<V>
    where
        I: IntoIterator<Item = &'k K>,
        K: 'k,
    {
        let normalized: Vec<Cow<'k, K>> = keys.into_iter().map(|key| self.normalize(key)).collect();
        let mut seen: HashSet<&K> = HashSet::with_capacity(normalized.len());
        let mut values = Vec::with_capacity(normalized.len());

        let map = self.inner.map.read();
        for key in &normalized {
            let key: &K = key;
            if !seen.insert(key) {
                continue;
            }
            if let Some(value) = map.get(key) {
                values.push(value.clone());
            }
        }
        drop(map);

        let hits = values.len() as u64;
        let misses = seen.len() as u64 - hits;
        self.inner.stats.record_lookups(hits, misses);
        trace!(
            cache = %self.inner.name,
            requested = normalized.len(),
            distinct = seen.len(),
            hits,
            "get_many"
        );
        values
    }

    /// Check if a key exists in the cache
    pub fn contains(&self, key: &K) -> bool {
        let key = self.normalize(key);
        let present = self.inner.map.read().contains_key(&key);
        trace!(cache = %self.inner.name, present, "contains");
        present
    }

    /// Check that every key exists, under one shared lock
    pub fn contains_all<'k, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'k K>,
        K: 'k,
    {
        let normalized: Vec<Cow<'k, K>> = keys.into_iter().map(|key| self.normalize(key)).collect();

        let map = self.inner.map.read();
        let all_present = normalized.iter().all(|key| map.contains_key(key));
        drop(map);

        trace!(
            cache = %self.inner.name,
            requested = normalized.len(),
            all_present,
            "contains_all"
        );
        all_present
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.inner.map.read().is_empty()
    }

    /// Number of entries currently stored
    pub fn len(&self) -> usize {
        self.inner.map.read().len()
    }

    /// Apply this cache's key normalization
    pub fn process_key(&self, key: &K) -> K {
        self.normalize(key).into_owned()
    }
}
