//! Concurrent keyed cache
//!
//! One backing map, one reader-writer lock, one key normalizer per instance.
//! Reads take the lock shared and return owned copies; writes take it
//! exclusively. Batch operations take the lock once for the whole batch.

mod builder;
mod operations;
mod trait_impl;
mod types;

pub use builder::KeyedCacheBuilder;
pub use types::KeyedCache;
