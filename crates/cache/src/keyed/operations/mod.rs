//! Keyed cache operations

mod memoize;
mod misc;
mod read;
mod write;

// Operations are implemented directly on KeyedCache
