//! Capacity-bounded cache with oldest-inserted eviction

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;

use tracing::debug;

use super::Cache;

/// Key/value cache holding at most `capacity` entries.
///
/// Reads never change eviction order. When a new key arrives and the cache is
/// full, the entry inserted earliest is evicted. Overwriting an existing key
/// keeps its original position. A capacity of zero keeps at most one entry:
/// every new key evicts whatever is there.
pub struct BoundedCache<K, V> {
    capacity: usize,
    entries: HashMap<K, V>,
    /// Keys in insertion order, oldest at the front
    order: VecDeque<K>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty cache
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Create a cache from a signed configuration value, clamping negatives to zero
    pub fn from_config(capacity: i64) -> Self {
        Self::new(usize::try_from(capacity).unwrap_or(0))
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True if the key is cached
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest) = self.order.pop_front() {
            self.entries.remove(&oldest);
            debug!(capacity = self.capacity, "evicted oldest cache entry");
        }
    }
}

impl<K, V> Cache<K, V> for BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    fn put(&mut self, key: K, value: V) -> &V {
        if !self.entries.contains_key(&key) {
            if self.entries.len() >= self.capacity {
                self.evict_oldest();
            }
            self.order.push_back(key.clone());
        }
        self.entries.insert(key.clone(), value);
        &self.entries[&key]
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.order.retain(|k| k != key);
        }
        removed
    }

    fn clear(&mut self) {
        debug!("clearing cache");
        self.entries.clear();
        self.order.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCache")
            .field("capacity", &self.capacity)
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_is_none() {
        let cache: BoundedCache<i64, &str> = BoundedCache::new(2);
        assert!(cache.get(&1).is_none());
    }

    #[test]
    fn test_put_returns_stored_value() {
        let mut cache = BoundedCache::new(2);
        assert_eq!(*cache.put(1, "one"), "one");
        assert_eq!(cache.get(&1), Some(&"one"));
    }

    #[test]
    fn test_capacity_plus_one_evicts_oldest() {
        let mut cache = BoundedCache::new(3);
        for key in 1..=4 {
            cache.put(key, key * 10);
        }
        assert_eq!(cache.len(), 3);
        assert!(!cache.contains_key(&1));
        assert_eq!(cache.get(&4), Some(&40));
    }

    #[test]
    fn test_get_does_not_promote() {
        let mut cache = BoundedCache::new(2);
        cache.put(1, "a");
        cache.put(2, "b");
        let _ = cache.get(&1);
        cache.put(3, "c");
        assert!(!cache.contains_key(&1));
        assert!(cache.contains_key(&2));
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut cache = BoundedCache::new(2);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(2, "B");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&2), Some(&"B"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cache = BoundedCache::new(2);
        cache.put(1, "a");
        assert_eq!(cache.remove(&1), Some("a"));
        assert_eq!(cache.remove(&1), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_removed_key_leaves_eviction_order() {
        let mut cache = BoundedCache::new(2);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.remove(&1);
        cache.put(1, "a2");
        cache.put(3, "c");
        // 2 is now the oldest
        assert!(!cache.contains_key(&2));
        assert!(cache.contains_key(&1));
        assert!(cache.contains_key(&3));
    }

    #[test]
    fn test_clear() {
        let mut cache = BoundedCache::new(4);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.clear();
        assert!(cache.is_empty());
        cache.put(3, "c");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_capacity_keeps_latest_only() {
        let mut cache = BoundedCache::from_config(0);
        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&2), Some(&"b"));
    }

    #[test]
    fn test_negative_capacity_clamps_to_zero() {
        let mut cache = BoundedCache::from_config(-5);
        assert_eq!(cache.capacity(), 0);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(2, "c");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&2), Some(&"c"));
    }
}
