//! Cache Statistics Module
//!
//! Reports cache occupancy together with hit, miss and eviction counters.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache occupancy and performance counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of cached stories
    pub size: usize,
    /// Steady-state capacity
    pub limit: usize,
    /// Size that triggers a batch eviction
    pub eviction_threshold: usize,
    /// size / limit as a percentage, one decimal place
    pub usage_percent: f64,
    /// Number of successful lookups
    pub hits: u64,
    /// Number of failed lookups
    pub misses: u64,
    /// Number of entries evicted by capacity pressure
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates empty stats for a cache with the given bounds.
    pub fn new(limit: usize, eviction_threshold: usize) -> Self {
        Self {
            limit,
            eviction_threshold,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    // == Update Size ==
    /// Updates the current size and recomputes usage.
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
        self.usage_percent = if self.limit == 0 {
            0.0
        } else {
            (size as f64 / self.limit as f64 * 1000.0).round() / 10.0
        };
    }
}
