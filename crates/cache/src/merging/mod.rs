//! Merge-on-insert cache for collection values
//!
//! A put for a key that already holds a container extends that container in
//! place instead of replacing it. The first put for a key stores a fresh
//! container from the container factory, so the factory's type decides
//! whether merged results keep duplicates.

mod trait_impl;

use crate::backing::{BackingMap, ConfiguredMap};
use crate::config::CacheSettings;
use crate::hooks::{Collection, ContainerFactory};
use crate::keyed::{KeyedCache, KeyedCacheBuilder};
use crate::stats::CacheStatistics;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tracing::trace;

/// Keyed cache whose values are containers merged on insert
///
/// Reads behave exactly like [`KeyedCache`] and return copies of the stored
/// containers. Cloning the cache clones the handle.
pub struct MergingCollectionCache<K, C, M = HashMap<K, C>> {
    cache: KeyedCache<K, C, M>,
    container_factory: Arc<dyn ContainerFactory<C>>,
}

impl<K, C, M> Clone for MergingCollectionCache<K, C, M> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            container_factory: Arc::clone(&self.container_factory),
        }
    }
}

impl<K, C, M> fmt::Debug for MergingCollectionCache<K, C, M>
where
    M: BackingMap<K, C>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergingCollectionCache")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<K: 'static> KeyedCacheBuilder<K> {
    /// Build a merging cache over a default-constructed map
    pub fn build_merging<C, M>(
        self,
        container_factory: impl ContainerFactory<C> + 'static,
    ) -> MergingCollectionCache<K, C, M>
    where
        M: BackingMap<K, C> + Default,
    {
        MergingCollectionCache {
            cache: self.build(),
            container_factory: Arc::new(container_factory),
        }
    }

    /// Build a merging cache over the map returned by `map_factory`
    pub fn build_merging_with<C, M>(
        self,
        map_factory: impl FnOnce() -> M,
        container_factory: impl ContainerFactory<C> + 'static,
    ) -> MergingCollectionCache<K, C, M>
    where
        M: BackingMap<K, C>,
    {
        MergingCollectionCache {
            cache: self.build_with(map_factory),
            container_factory: Arc::new(container_factory),
        }
    }
}

impl<K, C, M> MergingCollectionCache<K, C, M>
where
    K: 'static,
    M: BackingMap<K, C>,
{
    /// Create an empty merging cache with identity keys over a default map
    pub fn new(container_factory: impl ContainerFactory<C> + 'static) -> Self
    where
        M: Default,
    {
        KeyedCacheBuilder::new().build_merging(container_factory)
    }

    /// Create a merging cache with both construction hooks supplied
    pub fn with_factories(
        map_factory: impl FnOnce() -> M,
        container_factory: impl ContainerFactory<C> + 'static,
    ) -> Self {
        KeyedCacheBuilder::new().build_merging_with(map_factory, container_factory)
    }

    /// Create a merging cache over the map returned by a fallible factory
    ///
    /// The factory's error is returned unchanged.
    pub fn try_with_factories<E>(
        map_factory: impl FnOnce() -> Result<M, E>,
        container_factory: impl ContainerFactory<C> + 'static,
    ) -> Result<Self, E> {
        let map = map_factory()?;
        Ok(Self::with_factories(move || map, container_factory))
    }
}

impl<C> MergingCollectionCache<String, C, ConfiguredMap<String, C>> {
    /// Create a string-keyed merging cache as described by `settings`
    pub fn from_settings(
        settings: &CacheSettings,
        container_factory: impl ContainerFactory<C> + 'static,
    ) -> Self {
        KeyedCacheBuilder::from_settings(settings).build_merging_with(
            || ConfiguredMap::new(settings.backing, settings.initial_capacity),
            container_factory,
        )
    }
}

impl<K, C, M> MergingCollectionCache<K, C, M>
where
    K: Clone,
    C: Collection,
    M: BackingMap<K, C>,
{
    /// Merge `incoming` into the container stored under the normalized key
    ///
    /// Without an entry, a new container is built by the container factory
    /// and filled from `incoming`. `None` is dropped without touching the
    /// cache.
    pub fn put(&self, key: K, incoming: impl Into<Option<C>>) {
        match incoming.into() {
            Some(incoming) => self.merge(key, incoming),
            None => {
                self.cache.stats().record_skipped(1);
                trace!(cache = %self.cache.name(), "put skipped: absent container");
            }
        }
    }

    /// Merge many containers under a single exclusive lock
    pub fn put_all<I, O>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, O)>,
        O: Into<Option<C>>,
    {
        let mut skipped = 0u64;
        let batch: Vec<(K, C)> = entries
            .into_iter()
            .filter_map(|(key, incoming)| match incoming.into() {
                Some(incoming) => Some((self.cache.normalize_owned(key), incoming)),
                None => {
                    skipped += 1;
                    None
                }
            })
            .collect();

        let submitted = batch.len();
        let merged = self.cache.write_map(|map| {
            let mut merged = 0;
            for (key, incoming) in batch {
                if self.merge_locked(map, key, incoming) {
                    merged += 1;
                }
            }
            merged
        });

        self.record_merges(submitted, merged);
        self.cache.stats().record_skipped(skipped);
        trace!(cache = %self.cache.name(), submitted, merged, skipped, "put_all");
    }

    /// Merge a single element into the container stored under the normalized key
    pub fn add(&self, key: K, element: <C as IntoIterator>::Item) {
        self.merge(key, std::iter::once(element));
    }

    fn merge(&self, key: K, items: impl IntoIterator<Item = <C as IntoIterator>::Item>) {
        let key = self.cache.normalize_owned(key);
        let merged = self
            .cache
            .write_map(|map| self.merge_locked(map, key, items));

        self.record_merges(1, usize::from(merged));
        trace!(cache = %self.cache.name(), merged, "put");
    }

    /// Extend the existing container or insert a new one; caller holds the write lock
    ///
    /// Returns true when an existing container was extended.
    fn merge_locked(
        &self,
        map: &mut M,
        key: K,
        items: impl IntoIterator<Item = <C as IntoIterator>::Item>,
    ) -> bool {
        match map.get_mut(&key) {
            Some(existing) => {
                existing.extend(items);
                true
            }
            None => {
                let mut container = self.container_factory.create_container();
                container.extend(items);
                map.insert(key, container);
                false
            }
        }
    }

    fn record_merges(&self, submitted: usize, merged: usize) {
        let stats = self.cache.stats();
        stats.record_merges(merged as u64);
        stats.record_writes((submitted - merged) as u64, 0);
    }
}

impl<K, C, M> MergingCollectionCache<K, C, M>
where
    K: Eq + Hash + Clone,
    C: Clone,
    M: BackingMap<K, C>,
{
    /// Get a copy of the container stored under the normalized key
    pub fn get(&self, key: &K) -> Option<C> {
        self.cache.get(key)
    }

    /// Get copies of the containers for every present key, under one shared lock
    pub fn get_many<'k, I>(&self, keys: I) -> Vec<C>
    where
        I: IntoIterator<Item = &'k K>,
        K: 'k,
    {
        self.cache.get_many(keys)
    }

    /// Check if a key exists in the cache
    pub fn contains(&self, key: &K) -> bool {
        self.cache.contains(key)
    }

    /// Check that every key exists, under one shared lock
    pub fn contains_all<'k, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'k K>,
        K: 'k,
    {
        self.cache.contains_all(keys)
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Apply this cache's key normalization
    pub fn process_key(&self, key: &K) -> K {
        self.cache.process_key(key)
    }

    /// Copy of every entry, taken under one shared lock
    pub fn snapshot(&self) -> Vec<(K, C)> {
        self.cache.snapshot()
    }
}

impl<K, C, M> MergingCollectionCache<K, C, M>
where
    K: Clone,
    M: BackingMap<K, C>,
{
    /// Remove a key and return its container
    pub fn remove(&self, key: &K) -> Option<C> {
        self.cache.remove(key)
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.cache.clear()
    }

    /// Copy of every stored (normalized) key
    pub fn keys(&self) -> Vec<K> {
        self.cache.keys()
    }

    /// Get cache statistics
    pub fn statistics(&self) -> CacheStatistics {
        self.cache.statistics()
    }

    /// Name used in tracing output
    pub fn name(&self) -> &str {
        self.cache.name()
    }
}

#[cfg(test)]
mod tests;
