//! # Least Recently Used (LRU) Cache
//!
//! A fixed-capacity key-value cache that evicts the least recently used entry
//! once it holds more than `capacity` entries.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                            LruCache<K, V>                            │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (index)                               │   │
//!   │   │                                                              │   │
//!   │   │   ┌─────────┬──────────┐                                     │   │
//!   │   │   │   Key   │  SlotId  │                                     │   │
//!   │   │   ├─────────┼──────────┤                                     │   │
//!   │   │   │   k_7   │  ───────────────┐                              │   │
//!   │   │   │   k_6   │  ──────────────────────┐                       │   │
//!   │   │   │   k_5   │  ─────────────────────────────┐                │   │
//!   │   │   └─────────┴──────────┘      │      │      │                │   │
//!   │   └───────────────────────────────┼──────┼──────┼────────────────┘   │
//!   │                                   ▼      ▼      ▼                    │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  RecencyList<K, V>  (nodes in a SlotArena)                   │   │
//!   │   │                                                              │   │
//!   │   │  [HEAD] ◄──► [k_7] ◄──► [k_6] ◄──► [k_5] ◄──► [TAIL]         │   │
//!   │   │              MRU                   LRU                       │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index and the list change together inside `get` and `put` only; a key
//! is in the index exactly when a node holding it is linked between the two
//! sentinels.
//!
//! ## Operations Flow
//!
//! ```text
//!   put(new key) on a full cache (capacity = 3)
//!   ═══════════════════════════════════════════════════════════════════
//!     before:  [HEAD] ◄──► [A] ◄──► [B] ◄──► [C] ◄──► [TAIL]
//!     1. push D after HEAD     [HEAD] [D] [A] [B] [C] [TAIL]   (len 4)
//!     2. len > capacity, pop the node before TAIL (C) and drop it from the index
//!     after:   [HEAD] ◄──► [D] ◄──► [A] ◄──► [B] ◄──► [TAIL]
//!
//!   get(B)
//!   ═══════════════════════════════════════════════════════════════════
//!     1. index lookup: O(1)
//!     2. detach B, attach after HEAD: O(1)
//!     after:   [HEAD] ◄──► [B] ◄──► [D] ◄──► [A] ◄──► [TAIL]
//! ```
//!
//! ## Methods
//!
//! | Method               | Complexity | Description                               |
//! |----------------------|------------|-------------------------------------------|
//! | `try_new(capacity)`  | O(1)       | Create cache, `ConfigError` if capacity 0 |
//! | `put(k, v)`          | O(1)*      | Insert or update, may evict LRU           |
//! | `get(&k)`            | O(1)*      | Get value, moves entry to MRU             |
//! | `peek(&k)`           | O(1)*      | Get value without reordering              |
//! | `contains(&k)`       | O(1)*      | Membership without reordering             |
//! | `snapshot()`         | O(n)       | Values from MRU to LRU                    |
//! | `peek_lru()`         | O(1)       | Next eviction candidate                   |
//! | `recency_rank(&k)`   | O(n)       | Position in recency order (0 = MRU)       |
//! | `check_invariants()` | O(n)       | Verify index/list agreement               |
//!
//! \* average case (hash lookup)
//!
//! ## Thread Safety
//!
//! - `LruCache`: **not** thread-safe; mutation requires `&mut self`.
//! - `ConcurrentLruCache` (feature `concurrency`): one `parking_lot::RwLock`
//!   around the whole cache; `get` and `put` hold the write lock for their
//!   full duration, so the index and list are never seen out of step.

use std::fmt;
use std::hash::Hash;
use std::mem;

#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::recency_list::{self, RecencyList};
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsReadRecorder, MetricsSnapshotProvider};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LruCacheTrait};

/// Upper bound on entries reserved at construction.
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 16;

/// LRU cache over the single numeric domain `i32 -> i32`.
pub type IntLruCache = LruCache<i32, i32>;

/// Fixed-capacity LRU cache.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(2);
/// cache.put(1, "one");
/// cache.put(2, "two");
/// assert_eq!(cache.get(&1), Some(&"one"));
///
/// // key 2 is now least recently used and makes room for key 3
/// cache.put(3, "three");
/// assert!(!cache.contains(&2));
/// assert_eq!(cache.snapshot(), vec!["three", "one"]);
/// ```
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    list: RecencyList<K, V>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero: such a cache could
    /// never retain an entry.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache = LruCache::<u64, String>::try_new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(LruCache::<u64, String>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_preallocation(capacity, true)
    }

    pub(crate) fn try_with_preallocation(
        capacity: usize,
        preallocate: bool,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        // One spare slot: a new entry is linked before the overflow is evicted.
        // Larger caches grow their storage on demand past the cap.
        let reserve = if preallocate {
            capacity.min(MAX_PREALLOCATED_ENTRIES) + 1
        } else {
            0
        };
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            list: RecencyList::with_capacity(reserve),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and changes nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(3);
    /// cache.put(1, 10);
    /// cache.put(2, 20);
    ///
    /// assert_eq!(cache.get(&1), Some(&10));
    /// assert_eq!(cache.snapshot(), vec![10, 20]);
    /// assert_eq!(cache.get(&9), None);
    /// ```
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.debug_validate();

        self.list.get(id).map(|(_, value)| value)
    }

    /// Inserts or updates `key` and marks it most recently used.
    ///
    /// Updating an existing key overwrites its value in place and returns the
    /// old value; the entry count does not change. Inserting a new key that
    /// takes the cache past capacity evicts the least recently used entry.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// assert_eq!(cache.put(1, "a"), None);
    /// assert_eq!(cache.put(2, "b"), None);
    /// assert_eq!(cache.put(1, "A"), Some("a"));
    ///
    /// cache.put(3, "c"); // evicts key 2
    /// assert_eq!(cache.snapshot(), vec!["c", "A"]);
    /// ```
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_put_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_update();

            let previous = self.list.get_mut(id).map(|slot| mem::replace(slot, value));
            self.list.move_to_front(id);
            self.debug_validate();
            return previous;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();

        let id = self.list.push_front(key.clone(), value);
        self.index.insert(key, id);
        if self.list.len() > self.capacity {
            self.evict_lru();
        }
        self.debug_validate();
        None
    }

    /// Returns the value for `key` without changing recency order.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let &id = self.index.get(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_hit();

        self.list.get(id).map(|(_, value)| value)
    }

    /// Returns `true` if `key` is cached. Does not change recency order.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Verifies that the index and the recency list agree.
    ///
    /// Checks list link symmetry and sentinel placement, that the index and
    /// list hold the same number of entries, that every index entry points at
    /// the node holding its key, and that the capacity bound holds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_links()?;

        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but recency list has {} nodes",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.list.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some((node_key, _)) if node_key == key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "index entry for slot {} points at a node holding another key",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index entry points at vacant slot {}",
                        id.index()
                    )));
                },
            }
        }
        Ok(())
    }

    /// Removes the node before the tail sentinel and its index entry.
    fn evict_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.index.remove(&key);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        Some((key, value))
    }

    #[inline]
    fn debug_validate(&self) {
        debug_assert_eq!(self.index.len(), self.list.len());
        debug_assert!(self.list.len() <= self.capacity);
    }
}

impl<K, V> LruCache<K, V> {
    /// Number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Maximum number of entries, fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates `(key, value)` pairs from most to least recently used without
    /// changing recency order.
    pub fn iter(&self) -> recency_list::Iter<'_, K, V> {
        self.list.iter()
    }

    /// Cached values from most to least recently used.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::IntLruCache;
    ///
    /// let mut cache = IntLruCache::new(5);
    /// for k in 2..=7 {
    ///     cache.put(k, k);
    /// }
    /// assert_eq!(cache.snapshot(), vec![7, 6, 5, 4, 3]);
    ///
    /// cache.get(&5);
    /// assert_eq!(cache.snapshot(), vec![5, 7, 6, 4, 3]);
    /// ```
    pub fn snapshot(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.list.iter().map(|(_, value)| value.clone()).collect()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V> {
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.to_snapshot(self.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V> {
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn put(&mut self, key: K, value: V) -> Option<V> {
        LruCache::put(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_call();

        let lru = self.list.back()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_found();

        Some(lru)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let &target = self.index.get(key)?;
        for (rank, id) in self.list.ids().enumerate() {
            #[cfg(feature = "metrics")]
            self.metrics.record_recency_rank_scan_step();

            if id == target {
                #[cfg(feature = "metrics")]
                self.metrics.record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// Renders values from most to least recently used, e.g. `[5 7 6 4 3]`.
/// Values are separated by single spaces with no trailing space, and an
/// empty cache still renders its brackets as `[]`.
impl<K, V> fmt::Display for LruCache<K, V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (_, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}

/// Thread-safe LRU cache: one `parking_lot::RwLock` around an [`LruCache`].
///
/// `get` reorders the list, so it takes the write lock just like `put`.
/// Read-only operations share the read lock. Values are returned by clone.
///
/// Cloning the handle shares the same cache.
#[cfg(feature = "concurrency")]
pub struct ConcurrentLruCache<K, V> {
    inner: Arc<RwLock<LruCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> From<LruCache<K, V>> for ConcurrentLruCache<K, V> {
    fn from(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Creates a shared cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        LruCache::new(capacity).into()
    }

    /// Creates a shared cache, returning [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        LruCache::try_new(capacity).map(Self::from)
    }

    /// Inserts or updates `key`, returning the replaced value.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        let mut cache = self.inner.write();
        cache.put(key, value)
    }

    /// Returns a clone of the value for `key` and marks it most recently used.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::new(2);
    /// cache.put(1, "one".to_string());
    /// assert_eq!(cache.get(&1).as_deref(), Some("one"));
    /// assert!(cache.get(&9).is_none());
    /// ```
    pub fn get(&self, key: &K) -> Option<V> {
        let mut cache = self.inner.write();
        cache.get(key).cloned()
    }

    /// Returns a clone of the value for `key` without reordering.
    pub fn peek(&self, key: &K) -> Option<V> {
        let cache = self.inner.read();
        cache.peek(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.read();
        cache.contains(key)
    }

    pub fn len(&self) -> usize {
        let cache = self.inner.read();
        cache.len()
    }

    pub fn is_empty(&self) -> bool {
        let cache = self.inner.read();
        cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        let cache = self.inner.read();
        cache.capacity()
    }

    /// Clone of the least recently used entry.
    pub fn peek_lru(&self) -> Option<(K, V)> {
        let cache = self.inner.read();
        cache
            .peek_lru()
            .map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Values from most to least recently used, taken under one read lock.
    pub fn snapshot(&self) -> Vec<V> {
        let cache = self.inner.read();
        cache.snapshot()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let cache = self.inner.read();
        cache.check_invariants()
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V> ConcurrentLruCache<K, V> {
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        let cache = self.inner.read();
        cache.metrics_snapshot()
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for ConcurrentLruCache<K, V> {
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLruCache<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
}
