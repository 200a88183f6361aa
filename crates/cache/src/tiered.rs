//! Bounded TTL/LRU cache.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

struct Slot<V> {
    value: V,
    inserted_at: Instant,
    last_used: u64,
}

struct Inner<K, V> {
    map: HashMap<K, Slot<V>>,
    // monotonic usage counter; higher = more recently used
    tick: u64,
}

/// Capacity-bounded, time-expiring map with LRU eviction.
///
/// An entry is visible to readers only while its age is below the cache TTL;
/// expired entries are treated as misses even while still physically present.
/// When an insert pushes the store past capacity, the least-recently-used
/// entry is dropped first. All operations take an interior lock, so a shared
/// reference can be used from concurrent callers.
pub struct TieredCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    capacity: usize,
    ttl: Duration,
}

impl<K, V> TieredCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache holding at most `capacity` entries (minimum 1), each
    /// visible for `ttl` after insertion.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                map: HashMap::new(),
                tick: 0,
            }),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Returns the cached value for `key` if present and not expired.
    ///
    /// A hit refreshes the entry's recency; an expired entry is removed and
    /// reported as a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.lock();
        let expired = match inner.map.get_mut(key) {
            None => return None,
            Some(slot) => slot.inserted_at.elapsed() >= self.ttl,
        };
        if expired {
            inner.map.remove(key);
            debug!("cache entry expired");
            return None;
        }
        inner.tick += 1;
        let tick = inner.tick;
        let slot = inner.map.get_mut(key).expect("checked above");
        slot.last_used = tick;
        Some(slot.value.clone())
    }

    /// Inserts or replaces the value for `key`, evicting the
    /// least-recently-used entry if the store would exceed capacity.
    pub fn set(&self, key: K, value: V) {
        let mut inner = self.lock();
        inner.tick += 1;
        let tick = inner.tick;
        inner.map.insert(
            key,
            Slot {
                value,
                inserted_at: Instant::now(),
                last_used: tick,
            },
        );
        if inner.map.len() > self.capacity {
            if let Some(lru) = inner
                .map
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(k, _)| k.clone())
            {
                inner.map.remove(&lru);
                debug!(len = inner.map.len(), "evicted least-recently-used entry");
            }
        }
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.lock().map.clear();
    }

    /// Number of physically present entries, including any not yet reaped
    /// expired ones.
    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entry time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<K, V>> {
        // a poisoned lock only means another caller panicked mid-operation;
        // the map itself is still structurally sound
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
