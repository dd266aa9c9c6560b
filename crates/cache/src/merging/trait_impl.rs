//! Cache trait implementation for MergingCollectionCache

use crate::backing::BackingMap;
use crate::hooks::Collection;
use crate::traits::Cache;
use std::hash::Hash;

use super::MergingCollectionCache;

impl<K, C, M> Cache<K, C> for MergingCollectionCache<K, C, M>
where
    K: Eq + Hash + Clone,
    C: Collection + Clone,
    M: BackingMap<K, C>,
{
    fn put(&self, key: K, value: impl Into<Option<C>>) {
        self.put(key, value)
    }

    fn put_all<I, O>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, O)>,
        O: Into<Option<C>>,
    {
        self.put_all(entries)
    }

    fn get(&self, key: &K) -> Option<C> {
        self.get(key)
    }

    fn get_many<'k, I>(&self, keys: I) -> Vec<C>
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

    fn remove(&self, key: &K) -> Option<C> {
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
