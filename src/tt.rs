//! Evaluation cache keyed by Zobrist hash.
//!
//! Stores static evaluations only, so a cached search returns exactly what an
//! uncached one would. One cache serves one search and one perspective; it is
//! shared across root workers behind a mutex.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Default entry limit before the cache is flushed
pub const DEFAULT_EVAL_CACHE_ENTRIES: usize = 1 << 20;

/// Hit/miss counters of an `EvalCache`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct EvalCache {
    entries: Mutex<HashMap<u64, i32>>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EvalCache {
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        EvalCache {
            entries: Mutex::new(HashMap::new()),
            max_entries: max_entries.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cached score for `key`, counting the lookup
    pub fn probe(&self, key: u64) -> Option<i32> {
        let found = self.entries.lock().get(&key).copied();
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Store a score, flushing everything first when the cache is full
    pub fn store(&self, key: u64, score: i32) {
        let mut entries = self.entries.lock();
        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            entries.clear();
        }
        entries.insert(key, score);
    }

    /// Look up `key`, computing and storing the score on a miss
    pub fn get_or_insert_with(&self, key: u64, compute: impl FnOnce() -> i32) -> i32 {
        if let Some(score) = self.probe(key) {
            return score;
        }
        // Computed without the lock held; concurrent misses store the same value.
        let score = compute();
        self.store(key, score);
        score
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for EvalCache {
    fn default() -> Self {
        EvalCache::new(DEFAULT_EVAL_CACHE_ENTRIES)
    }
}
