//! Core keyed cache types

use crate::backing::BackingMap;
use crate::hooks::KeyNormalizer;
use crate::stats::CacheStats;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Concurrent keyed cache over a single backing map
///
/// All entries live in one map behind one reader-writer lock owned by this
/// cache. Reads share the lock, writes hold it exclusively, and entries for
/// different keys still serialize through it. Cloning the cache clones the
/// handle, not the entries.
pub struct KeyedCache<K, V, M = HashMap<K, V>> {
    pub(crate) inner: Arc<KeyedCacheInner<K, V, M>>,
}

pub(crate) struct KeyedCacheInner<K, V, M> {
    /// Label used in tracing output
    pub name: String,
    /// Entries
    pub map: RwLock<M>,
    /// Applied to every key before it touches the map
    pub normalizer: Box<dyn KeyNormalizer<K>>,
    /// Statistics
    pub stats: CacheStats,
    pub _values: PhantomData<fn() -> V>,
}

impl<K, V, M> Clone for KeyedCache<K, V, M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, M> fmt::Debug for KeyedCache<K, V, M>
where
    M: BackingMap<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedCache")
            .field("name", &self.inner.name)
            .field("entry_count", &self.inner.map.read().len())
            .finish()
    }
}

impl<K, V, M> KeyedCache<K, V, M>
where
    K: Clone,
{
    /// Normalize a borrowed key, borrowing it back when it is already canonical
    #[inline]
    pub(crate) fn normalize<'k>(&self, key: &'k K) -> Cow<'k, K> {
        self.inner.normalizer.normalize(key)
    }

    /// Normalize an owned key without copying it when it is already canonical
    pub(crate) fn normalize_owned(&self, key: K) -> K {
        let normalized = match self.inner.normalizer.normalize(&key) {
            Cow::Borrowed(_) => None,
            Cow::Owned(normalized) => Some(normalized),
        };
        normalized.unwrap_or(key)
    }

    /// Run `f` with exclusive access to the backing map
    pub(crate) fn write_map<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        let mut map = self.inner.map.write();
        f(&mut *map)
    }

    pub(crate) fn stats(&self) -> &CacheStats {
        &self.inner.stats
    }

    /// Name used in tracing output
    pub fn name(&self) -> &str {
        &self.inner.name
    }
}
