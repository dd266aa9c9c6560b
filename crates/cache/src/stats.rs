//! Cache statistics with atomic counters
//!
//! Counters are updated outside the map lock with relaxed ordering. A snapshot
//! is therefore not an atomic view of all counters, but each counter is exact.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

/// Internal cache statistics
#[derive(Debug)]
pub(crate) struct CacheStats {
    enabled: bool,
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
    replacements: AtomicU64,
    merges: AtomicU64,
    skipped_puts: AtomicU64,
    removals: AtomicU64,
    clears: AtomicU64,
    stats_since: SystemTime,
}

impl CacheStats {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            replacements: AtomicU64::new(0),
            merges: AtomicU64::new(0),
            skipped_puts: AtomicU64::new(0),
            removals: AtomicU64::new(0),
            clears: AtomicU64::new(0),
            stats_since: SystemTime::now(),
        }
    }

    #[inline]
    fn bump(&self, counter: &AtomicU64, by: u64) {
        if self.enabled && by > 0 {
            counter.fetch_add(by, Ordering::Relaxed);
        }
    }

    pub fn record_lookups(&self, hits: u64, misses: u64) {
        self.bump(&self.hits, hits);
        self.bump(&self.misses, misses);
    }

    pub fn record_hit(&self) {
        self.bump(&self.hits, 1);
    }

    pub fn record_miss(&self) {
        self.bump(&self.misses, 1);
    }

    pub fn record_writes(&self, writes: u64, replacements: u64) {
        self.bump(&self.writes, writes);
        self.bump(&self.replacements, replacements);
    }

    pub fn record_merges(&self, count: u64) {
        self.bump(&self.merges, count);
    }

    pub fn record_skipped(&self, count: u64) {
        self.bump(&self.skipped_puts, count);
    }

    pub fn record_removals(&self, count: u64) {
        self.bump(&self.removals, count);
    }

    pub fn record_clear(&self) {
        self.bump(&self.clears, 1);
    }

    pub fn snapshot(&self, entry_count: usize) -> CacheStatistics {
        CacheStatistics {
            enabled: self.enabled,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            replacements: self.replacements.load(Ordering::Relaxed),
            merges: self.merges.load(Ordering::Relaxed),
            skipped_puts: self.skipped_puts.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
            entry_count: entry_count as u64,
            stats_since: self.stats_since,
        }
    }
}

/// Point-in-time view of a cache's counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStatistics {
    /// Whether counters are being recorded at all
    pub enabled: bool,
    /// Lookups that found an entry
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// New entries inserted
    pub writes: u64,
    /// Existing entries overwritten by a put
    pub replacements: u64,
    /// Puts merged into an existing container
    pub merges: u64,
    /// Puts dropped because the value was absent
    pub skipped_puts: u64,
    /// Entries removed individually or by `retain`
    pub removals: u64,
    /// Number of `clear` calls
    pub clears: u64,
    /// Entries held when the snapshot was taken
    pub entry_count: u64,
    /// When counting started
    pub stats_since: SystemTime,
}

impl CacheStatistics {
    /// Fraction of lookups that were hits, 0.0 when nothing was looked up
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
