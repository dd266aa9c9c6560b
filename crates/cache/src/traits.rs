//! Core cache trait
//!
//! Every cache in this crate exposes the same operation set. None of the
//! operations fail: a missing key is an empty result and an absent value is a
//! no-op.

/// Core trait for cache operations
///
/// `K` is the caller-facing key type. Every operation runs the key through
/// [`Cache::process_key`] first, so logically equal keys always resolve to the
/// same entry.
///
/// Batch operations borrow their key collection for the whole call. The
/// collection cannot change while the cache is reading it.
pub trait Cache<K, V> {
    /// Store a value under the normalized key, replacing any previous value
    ///
    /// An absent value (`None`) is silently dropped and the existing entry, if
    /// any, is left untouched. This lets callers cache a lookup result without
    /// checking it first, at the price of never being able to cache "nothing".
    fn put(&self, key: K, value: impl Into<Option<V>>);

    /// Store many values under a single exclusive lock
    ///
    /// Equivalent to calling [`Cache::put`] for each pair; absent values are
    /// skipped the same way.
    fn put_all<I, O>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, O)>,
        O: Into<Option<V>>;

    /// Get a copy of the value stored under the normalized key
    fn get(&self, key: &K) -> Option<V>;

    /// Get copies of the values for every key that is present
    ///
    /// The result holds one value per distinct normalized key, in the order
    /// each key first appears. Misses are skipped, and keys that normalize to
    /// the same entry contribute a single value, so the result is never longer
    /// than `keys`. Values are not deduplicated: distinct keys holding equal
    /// values each contribute a copy. All keys are read under one shared lock.
    fn get_many<'k, I>(&self, keys: I) -> Vec<V>
    where
        I: IntoIterator<Item = &'k K>,
        K: 'k;

    /// Check if a key exists in the cache
    fn contains(&self, key: &K) -> bool;

    /// Check that every key exists, under one shared lock
    ///
    /// An empty key collection is trivially contained.
    fn contains_all<'k, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'k K>,
        K: 'k;

    /// Remove an entry and return its previous value
    fn remove(&self, key: &K) -> Option<V>;

    /// Apply this cache's key normalization
    fn process_key(&self, key: &K) -> K;

    /// Remove all entries
    fn clear(&self);

    /// Whether the cache holds no entries
    fn is_empty(&self) -> bool;

    /// Number of entries currently stored
    fn len(&self) -> usize;
}
