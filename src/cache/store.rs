//! Story Cache Module
//!
//! Main cache engine combining HashMap storage with FIFO insertion tracking.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheKey, CacheStats, InsertionOrder};

// == Story Cache ==
/// Bounded story cache with FIFO batch eviction.
///
/// The cache may grow past `limit` up to `eviction_threshold`; the insert that
/// pushes it beyond the threshold evicts the oldest entries until exactly
/// `limit` remain. Reads never affect eviction order.
#[derive(Debug)]
pub struct StoryCache {
    /// Key-story storage
    entries: HashMap<CacheKey, CacheEntry>,
    /// Insertion order tracker
    order: InsertionOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Steady-state capacity
    limit: usize,
    /// Size that triggers a batch eviction
    eviction_threshold: usize,
}

impl StoryCache {
    // == Constructor ==
    /// Creates a new StoryCache.
    ///
    /// # Arguments
    /// * `limit` - Number of entries kept after an eviction
    /// * `eviction_threshold` - Size above which eviction runs; raised to `limit` if lower
    pub fn new(limit: usize, eviction_threshold: usize) -> Self {
        let eviction_threshold = eviction_threshold.max(limit);
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(limit, eviction_threshold),
            limit,
            eviction_threshold,
        }
    }

    /// Creates a cache that evicts on every insert beyond `limit`.
    pub fn with_limit(limit: usize) -> Self {
        Self::new(limit, limit)
    }

    // == Get ==
    /// Looks up a story by key.
    ///
    /// Records a hit or miss; the stored story is never modified.
    pub fn get(&mut self, key: &CacheKey) -> Option<String> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.story.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Inserts or overwrites a story.
    ///
    /// Overwriting moves the key to the newest position. If the insert pushes
    /// the cache past its eviction threshold, the oldest entries are evicted
    /// until `limit` remain.
    pub fn put(&mut self, key: CacheKey, story: String) {
        self.order.record_insert(&key);
        self.entries.insert(key, CacheEntry::new(story));

        if self.entries.len() > self.eviction_threshold {
            self.evict_to_limit();
        }

        self.stats.set_size(self.entries.len());
    }

    // == Clear ==
    /// Removes all entries and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.stats.set_size(0);
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn eviction_threshold(&self) -> usize {
        self.eviction_threshold
    }

    fn evict_to_limit(&mut self) {
        let mut evicted = 0;
        while self.entries.len() > self.limit {
            let Some(oldest) = self.order.pop_oldest() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&oldest) {
                debug!("Evicted cached story {} after {}ms", oldest, entry.age_ms());
                evicted += 1;
            }
        }
        self.stats.record_evictions(evicted);
        debug!(
            "Cache eviction: removed {} entries, {} remain",
            evicted,
            self.entries.len()
        );
    }
}
