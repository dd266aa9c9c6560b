//! Keyed cache builder and initialization

use crate::backing::{BackingMap, ConfiguredMap};
use crate::config::CacheSettings;
use crate::hooks::{Identity, KeyNormalizer};
use crate::stats::CacheStats;
use memo_core::DEFAULT_CACHE_NAME;
use parking_lot::RwLock;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

use super::types::{KeyedCache, KeyedCacheInner};

/// Builder for keyed and merging caches
///
/// The map factory is invoked exactly once, by the `build*` call.
pub struct KeyedCacheBuilder<K> {
    name: String,
    normalizer: Box<dyn KeyNormalizer<K>>,
    statistics: bool,
}

impl<K: 'static> KeyedCacheBuilder<K> {
    /// Create a new builder: identity keys, statistics on
    pub fn new() -> Self {
        Self {
            name: DEFAULT_CACHE_NAME.to_string(),
            normalizer: Box::new(Identity),
            statistics: true,
        }
    }

    /// Set the name reported in tracing output
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the key normalization strategy
    pub fn with_normalizer(mut self, normalizer: impl KeyNormalizer<K> + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    /// Enable or disable statistics counters
    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.statistics = enabled;
        self
    }

    /// Build a cache over a default-constructed map
    pub fn build<V, M>(self) -> KeyedCache<K, V, M>
    where
        M: BackingMap<K, V> + Default,
    {
        self.build_with(M::default)
    }

    /// Build a cache over the map returned by `map_factory`
    ///
    /// The factory must return an empty map. Entries it contains would bypass
    /// key normalization; debug builds assert on this.
    pub fn build_with<V, M>(self, map_factory: impl FnOnce() -> M) -> KeyedCache<K, V, M>
    where
        M: BackingMap<K, V>,
    {
        let map = map_factory();
        debug_assert!(map.is_empty(), "map factory returned a non-empty map");
        debug!(
            cache = %self.name,
            statistics = self.statistics,
            "keyed cache created"
        );

        KeyedCache {
            inner: Arc::new(KeyedCacheInner {
                name: self.name,
                map: RwLock::new(map),
                normalizer: self.normalizer,
                stats: CacheStats::new(self.statistics),
                _values: PhantomData,
            }),
        }
    }

    /// Build a cache over the map returned by a fallible factory
    ///
    /// The factory's error is returned unchanged.
    pub fn try_build_with<V, M, E>(
        self,
        map_factory: impl FnOnce() -> Result<M, E>,
    ) -> Result<KeyedCache<K, V, M>, E>
    where
        M: BackingMap<K, V>,
    {
        let map = map_factory()?;
        Ok(self.build_with(move || map))
    }
}

impl<K: 'static> Default for KeyedCacheBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyedCacheBuilder<String> {
    /// Create a builder from loaded settings (name, key policy, statistics)
    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new()
            .with_name(settings.name.clone())
            .with_normalizer(settings.key_policy)
            .with_statistics(settings.statistics)
    }
}

impl<K, V, M> KeyedCache<K, V, M>
where
    K: 'static,
    M: BackingMap<K, V>,
{
    /// Create an empty cache with identity keys over a default map
    pub fn new() -> Self
    where
        M: Default,
    {
        KeyedCacheBuilder::new().build()
    }

    /// Create an empty cache that normalizes keys with `normalizer`
    pub fn with_normalizer(normalizer: impl KeyNormalizer<K> + 'static) -> Self
    where
        M: Default,
    {
        KeyedCacheBuilder::new().with_normalizer(normalizer).build()
    }

    /// Create a cache over the (empty) map returned by `map_factory`
    pub fn with_map_factory(map_factory: impl FnOnce() -> M) -> Self {
        KeyedCacheBuilder::new().build_with(map_factory)
    }

    /// Create a cache over the map returned by a fallible factory
    pub fn try_with_map_factory<E>(
        map_factory: impl FnOnce() -> Result<M, E>,
    ) -> Result<Self, E> {
        KeyedCacheBuilder::new().try_build_with(map_factory)
    }
}

impl<K, V, M> Default for KeyedCache<K, V, M>
where
    K: 'static,
    M: BackingMap<K, V> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyedCache<String, V, ConfiguredMap<String, V>> {
    /// Create a string-keyed cache as described by `settings`
    pub fn from_settings(settings: &CacheSettings) -> Self {
        KeyedCacheBuilder::from_settings(settings).build_with(|| {
            ConfiguredMap::new(settings.backing, settings.initial_capacity)
        })
    }
}
