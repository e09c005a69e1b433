//! lrukit: a fixed-capacity least-recently-used cache.
//!
//! [`LruCache`](policy::lru::LruCache) pairs a hash index with a
//! sentinel-bounded recency list stored in a slot arena, so `get` and `put`
//! run in amortized O(1) without unsafe code.
//!
//! Optional features:
//!
//! - `metrics`: per-cache counters, snapshots and a Prometheus text exporter.
//! - `concurrency`: `ConcurrentLruCache`, a cloneable handle guarded by a
//!   `parking_lot::RwLock`.
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let mut cache = IntLruCache::new(5);
//! for k in 2..=7 {
//!     cache.put(k, k);
//! }
//! assert_eq!(cache.to_string(), "[7 6 5 4 3]");
//!
//! cache.get(&5);
//! assert_eq!(cache.to_string(), "[5 7 6 4 3]");
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
