//! Cache trait implementation for KeyedCache

use crate::backing::BackingMap;
use crate::traits::Cache;
use std::hash::Hash;

use super::types::KeyedCache;

impl<K, V, M> Cache<K, V> for KeyedCache<K, V, M>
where
    K: Eq + Hash + Clone,
    V: Clone,
    M: BackingMap<K, V>,
{
    fn put(&self, key: K, value: impl Into<Option<V>>) {
        self.put(key, value)
    }

    fn put_all<I, O>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, O)>,
        O: Into<Option<V>>,
    {
        self.put_all(entries)
    }

    fn get(&self, key: &K) -> Option<V> {
        self.get(key)
    }

    fn get_many<'k, I>(&self, keys: I) -> Vec<V>
    where
        I: IntoIterator<Item = &'k K>,
        K: 'k,
    {
        self.get_many(keys)
    }

    fn contains(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn contains_all<'k, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'k K>,
        K: 'k,
    {
        self.contains_all(keys)
    }

    fn remove(&self, key: &K) -> Option<V> {
        self.remove(key)
    }

    fn process_key(&self, key: &K) -> K {
        self.process_key(key)
    }

    fn clear(&self) {
        self.clear()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn len(&self) -> usize {
        self.len()
    }
}
