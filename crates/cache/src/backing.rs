//! Backing map abstraction
//!
//! A [`KeyedCache`](crate::KeyedCache) stores its entries in one map value
//! built by a caller-supplied factory. Anything implementing [`BackingMap`]
//! can be used; the standard choices are covered here.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::str::FromStr;

/// Iterator over the entries of a backing map
pub type Entries<'a, K, V> = Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>;

/// Map operations a cache needs from its storage
///
/// Implementations are plain single-threaded maps; the cache provides all
/// synchronization.
pub trait BackingMap<K, V> {
    fn get(&self, key: &K) -> Option<&V>;

    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    fn insert(&mut self, key: K, value: V) -> Option<V>;

    fn remove(&mut self, key: &K) -> Option<V>;

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn retain(&mut self, keep: &mut dyn FnMut(&K, &mut V) -> bool);

    fn entries(&self) -> Entries<'_, K, V>;
}

impl<K, V, S> BackingMap<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        HashMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn clear(&mut self) {
        HashMap::clear(self);
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&K, &mut V) -> bool) {
        HashMap::retain(self, |k, v| keep(k, v));
    }

    fn entries(&self) -> Entries<'_, K, V> {
        Box::new(self.iter())
    }
}

/// Ordered map with no spare hash-table capacity, suited to very large key spaces
impl<K, V> BackingMap<K, V> for BTreeMap<K, V>
where
    K: Ord,
{
    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        BTreeMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BTreeMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BTreeMap::remove(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&K, &mut V) -> bool) {
        BTreeMap::retain(self, |k, v| keep(k, v));
    }

    fn entries(&self) -> Entries<'_, K, V> {
        Box::new(self.iter())
    }
}

/// Insertion-ordered map; removal shifts later entries to keep the order
impl<K, V, S> BackingMap<K, V> for IndexMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn get(&self, key: &K) -> Option<&V> {
        IndexMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        IndexMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        IndexMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        IndexMap::shift_remove(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        IndexMap::contains_key(self, key)
    }

    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn clear(&mut self) {
        IndexMap::clear(self);
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&K, &mut V) -> bool) {
        IndexMap::retain(self, |k, v| keep(k, v));
    }

    fn entries(&self) -> Entries<'_, K, V> {
        Box::new(self.iter())
    }
}

/// Which map a settings-driven cache is built on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackingKind {
    /// `HashMap`, the general-purpose default
    #[default]
    Hashed,
    /// `BTreeMap`, compact and sorted by key
    Ordered,
    /// `IndexMap`, iterates in insertion order
    Indexed,
}

impl BackingKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BackingKind::Hashed => "hashed",
            BackingKind::Ordered => "ordered",
            BackingKind::Indexed => "indexed",
        }
    }
}

impl fmt::Display for BackingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hashed" | "hash" => Ok(BackingKind::Hashed),
            "ordered" | "btree" | "compact" => Ok(BackingKind::Ordered),
            "indexed" | "insertion" => Ok(BackingKind::Indexed),
            other => Err(format!("unknown backing map '{other}'")),
        }
    }
}

/// A backing map chosen at runtime from a [`BackingKind`]
#[derive(Debug, Clone)]
pub enum ConfiguredMap<K, V> {
    Hashed(HashMap<K, V>),
    Ordered(BTreeMap<K, V>),
    Indexed(IndexMap<K, V>),
}

impl<K, V> ConfiguredMap<K, V>
where
    K: Eq + Hash + Ord,
{
    /// Build an empty map of the given kind
    ///
    /// `capacity` is a hint; ordered maps ignore it.
    pub fn new(kind: BackingKind, capacity: usize) -> Self {
        match kind {
            BackingKind::Hashed => ConfiguredMap::Hashed(HashMap::with_capacity(capacity)),
            BackingKind::Ordered => ConfiguredMap::Ordered(BTreeMap::new()),
            BackingKind::Indexed => ConfiguredMap::Indexed(IndexMap::with_capacity(capacity)),
        }
    }

    pub fn kind(&self) -> BackingKind {
        match self {
            ConfiguredMap::Hashed(_) => BackingKind::Hashed,
            ConfiguredMap::Ordered(_) => BackingKind::Ordered,
            ConfiguredMap::Indexed(_) => BackingKind::Indexed,
        }
    }
}

impl<K, V> Default for ConfiguredMap<K, V> {
    fn default() -> Self {
        ConfiguredMap::Hashed(HashMap::new())
    }
}

impl<K, V> BackingMap<K, V> for ConfiguredMap<K, V>
where
    K: Eq + Hash + Ord,
{
    fn get(&self, key: &K) -> Option<&V> {
        match self {
            ConfiguredMap::Hashed(map) => map.get(key),
            ConfiguredMap::Ordered(map) => map.get(key),
            ConfiguredMap::Indexed(map) => map.get(key),
        }
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self {
            ConfiguredMap::Hashed(map) => map.get_mut(key),
            ConfiguredMap::Ordered(map) => map.get_mut(key),
            ConfiguredMap::Indexed(map) => map.get_mut(key),
        }
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self {
            ConfiguredMap::Hashed(map) => map.insert(key, value),
            ConfiguredMap::Ordered(map) => map.insert(key, value),
            ConfiguredMap::Indexed(map) => map.insert(key, value),
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        match self {
            ConfiguredMap::Hashed(map) => map.remove(key),
            ConfiguredMap::Ordered(map) => map.remove(key),
            ConfiguredMap::Indexed(map) => map.shift_remove(key),
        }
    }

    fn len(&self) -> usize {
        match self {
            ConfiguredMap::Hashed(map) => map.len(),
            ConfiguredMap::Ordered(map) => map.len(),
            ConfiguredMap::Indexed(map) => map.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            ConfiguredMap::Hashed(map) => map.clear(),
            ConfiguredMap::Ordered(map) => map.clear(),
            ConfiguredMap::Indexed(map) => map.clear(),
        }
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&K, &mut V) -> bool) {
        match self {
            ConfiguredMap::Hashed(map) => map.retain(|k, v| keep(k, v)),
            ConfiguredMap::Ordered(map) => map.retain(|k, v| keep(k, v)),
            ConfiguredMap::Indexed(map) => map.retain(|k, v| keep(k, v)),
        }
    }

    fn entries(&self) -> Entries<'_, K, V> {
        match self {
            ConfiguredMap::Hashed(map) => Box::new(map.iter()),
            ConfiguredMap::Ordered(map) => Box::new(map.iter()),
            ConfiguredMap::Indexed(map) => Box::new(map.iter()),
        }
    }
}
