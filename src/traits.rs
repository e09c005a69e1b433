//! # Cache Traits
//!
//! Interfaces shared by the cache types in this crate.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  put(&mut, K, V) → Option<V>            │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │                                         │
//!   │  peek_lru(&) → Option<(&K, &V)>         │
//!   │  recency_rank(&, &K) → Option<usize>    │
//!   └─────────────────────────────────────────┘
//!
//!   ConcurrentCache: marker, Send + Sync
//! ```
//!
//! There is no `remove`, `clear` or batch operation: entries
//! leave a cache only through eviction.
//!
//! ## Thread Safety
//!
//! - [`LruCache`](crate::policy::lru::LruCache) is **not** thread-safe; its
//!   mutating operations take `&mut self`.
//! - `ConcurrentLruCache` (feature `concurrency`) implements
//!   [`ConcurrentCache`] and serializes every mutation behind one lock.

/// Core cache operations.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.put(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(CoreCache::len(&cache), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, returning the value it replaced.
    ///
    /// Inserting a new key into a full cache evicts one entry according to
    /// the cache's policy.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// assert_eq!(CoreCache::put(&mut cache, 1, "first"), None);
    /// assert_eq!(CoreCache::put(&mut cache, 1, "second"), Some("first"));
    /// ```
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key`, counting the lookup as a use of the entry.
    ///
    /// Use [`contains`](Self::contains) to test membership without affecting
    /// eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks whether `key` is cached without touching its recency.
    fn contains(&self, key: &K) -> bool;

    /// Number of cached entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries held at once.
    fn capacity(&self) -> usize;
}

/// Recency-specific read operations.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::LruCacheTrait;
///
/// let mut cache = LruCache::new(3);
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.get(&1);
///
/// assert_eq!(cache.peek_lru(), Some((&2, &"b")));
/// assert_eq!(cache.recency_rank(&1), Some(0));
/// assert_eq!(cache.recency_rank(&2), Some(1));
/// ```
pub trait LruCacheTrait<K, V>: CoreCache<K, V> {
    /// The entry the next overflowing insert would evict. Does not reorder.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Position of `key` in recency order, 0 being most recently used.
    ///
    /// This is an O(n) walk; meant for diagnostics and tests.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker for cache handles that can be shared across threads.
///
/// # Example
///
/// ```
/// use lrukit::traits::ConcurrentCache;
///
/// fn assert_shareable<C: ConcurrentCache>(_cache: &C) {}
/// ```
pub trait ConcurrentCache: Send + Sync {}
