//! Cache Module
//!
//! Provides the bounded in-memory story cache with FIFO batch eviction.

mod entry;
mod key;
mod order;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::CacheKey;
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::StoryCache;
