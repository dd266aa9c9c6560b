//! Thread-safe keyed memoization caches
//!
//! This crate provides in-process caches for derived objects that are
//! expensive to recompute or re-fetch:
//! - [`KeyedCache`]: one value per key, replaced on insert
//! - [`MergingCollectionCache`]: one container per key, merged on insert
//! - Pluggable key normalization and backing-map construction
//! - Memoizing lookups (`get_or_insert_with`)
//! - Optional statistics and settings loaded from a file or the environment
//!
//! Every cache owns a single map behind a single reader-writer lock. Values
//! leave the cache as owned copies; wrap large values in `Arc` to share them
//! cheaply.
//!
//! ```
//! use memo_cache::{KeyPolicy, KeyedCache};
//!
//! let cache: KeyedCache<String, u32> = KeyedCache::with_normalizer(KeyPolicy::Uppercase);
//! cache.put("abc".to_string(), 1u32);
//! assert_eq!(cache.get(&"ABC".to_string()), Some(1));
//! ```

pub mod backing;
pub mod config;
pub mod hooks;
mod keyed;
mod merging;
mod stats;
pub mod traits;

pub use backing::{BackingKind, BackingMap, ConfiguredMap};
pub use config::{
    CacheConfiguration, CacheSettings, CacheSettingsBuilder, CacheSettingsLoader, ConfigSource,
};
pub use hooks::{Collection, ContainerFactory, Identity, KeyNormalizer, KeyPolicy, NormalizeWith};
pub use keyed::{KeyedCache, KeyedCacheBuilder};
pub use merging::MergingCollectionCache;
pub use stats::CacheStatistics;
pub use traits::Cache;
