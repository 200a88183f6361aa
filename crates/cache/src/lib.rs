//! # manse-cache
//!
//! A small capacity-bounded, time-expiring key→value store with
//! least-recently-used eviction, safe for concurrent callers.
//!
//! Two instances back the resolution pipeline: a short-TTL cache memoizing
//! upstream API responses and a long-TTL cache for local-table lookups
//! (whose underlying data is immutable, so entries only ever expire to bound
//! memory, not because they go stale).
//!
//! # Quick start
//!
//! ```rust
//! use std::time::Duration;
//! use manse_cache::TieredCache;
//!
//! let cache: TieredCache<&str, u32> = TieredCache::new(2, Duration::from_secs(60));
//! cache.set("a", 1);
//! assert_eq!(cache.get(&"a"), Some(1));
//! assert_eq!(cache.get(&"b"), None);
//! ```

mod tiered;

pub use tiered::TieredCache;
