//! In-memory cache in front of the repository
//!
//! The cache is an accelerator only. It never holds the authoritative copy
//! of a record and is not internally synchronized; the owner serializes
//! access.

mod bounded;

pub use bounded::BoundedCache;

/// Key/value cache operations used by the record service
pub trait Cache<K, V> {
    /// Look up a key without affecting eviction order
    fn get(&self, key: &K) -> Option<&V>;

    /// Insert or overwrite a key, evicting one other entry if full
    fn put(&mut self, key: K, value: V) -> &V;

    /// Remove a key, returning its previous value
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Drop every entry
    fn clear(&mut self);

    /// Number of entries
    fn len(&self) -> usize;

    /// True if the cache holds nothing
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
