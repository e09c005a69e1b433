//! Builder for LRU caches.
//!
//! Collects construction options and validates them once, returning a
//! [`ConfigError`] instead of panicking deep inside the cache.
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::LruCacheBuilder;
//!
//! let mut cache = LruCacheBuilder::new(100).build::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//!
//! assert!(LruCacheBuilder::new(0).try_build::<u64, String>().is_err());
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::policy::lru::ConcurrentLruCache;
use crate::policy::lru::LruCache;

/// Builder for [`LruCache`] and, with the `concurrency` feature,
/// [`ConcurrentLruCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LruCacheBuilder {
    capacity: usize,
    preallocate: bool,
}

impl LruCacheBuilder {
    /// Starts a builder for a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            preallocate: true,
        }
    }

    /// Whether to reserve index and node storage for `capacity` entries up
    /// front. Defaults to `true`; turn off for large, sparsely filled caches.
    pub fn preallocate(mut self, preallocate: bool) -> Self {
        self.preallocate = preallocate;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Builds the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero.
    pub fn try_build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        LruCache::try_with_preallocation(self.capacity, self.preallocate)
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero.
    pub fn build<K, V>(self) -> LruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds a shared, lock-protected cache.
    ///
    /// ```rust
    /// use lrukit::builder::LruCacheBuilder;
    ///
    /// let cache = LruCacheBuilder::new(8).try_build_concurrent::<u32, u32>().unwrap();
    /// let handle = cache.clone();
    /// std::thread::spawn(move || handle.put(1, 1)).join().unwrap();
    /// assert_eq!(cache.get(&1), Some(1));
    /// ```
    #[cfg(feature = "concurrency")]
    pub fn try_build_concurrent<K, V>(self) -> Result<ConcurrentLruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone + Send + Sync,
        V: Clone + Send + Sync,
    {
        self.try_build().map(ConcurrentLruCache::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_requested_capacity() {
        let cache = LruCacheBuilder::new(3).build::<i32, i32>();
        assert_eq!(cache.capacity(), 3);
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_capacity_is_a_config_error() {
        let err = LruCacheBuilder::new(0)
            .preallocate(false)
            .try_build::<i32, i32>()
            .unwrap_err();
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    #[should_panic(expected = "greater than zero")]
    fn build_panics_on_zero_capacity() {
        let _ = LruCacheBuilder::new(0).build::<i32, i32>();
    }

    #[test]
    fn lazy_storage_still_evicts() {
        let mut cache = LruCacheBuilder::new(2)
            .preallocate(false)
            .build::<&str, i32>();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        assert_eq!(cache.snapshot(), vec![3, 2]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn huge_capacity_builds_without_panicking() {
        let cache = LruCacheBuilder::new(usize::MAX).try_build::<u8, u8>().unwrap();
        assert_eq!(cache.capacity(), usize::MAX);
    }
}
