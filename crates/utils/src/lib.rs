//! Shared utilities for memo
//!
//! Currently this is the tracing setup used by binaries and tests that embed
//! the caches.

pub mod tracing;

pub use self::tracing::*;
