pub use crate::builder::LruCacheBuilder;
pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
pub use crate::policy::lru::{IntLruCache, LruCache};
#[cfg(feature = "concurrency")]
pub use crate::traits::ConcurrentCache;
pub use crate::traits::{CoreCache, LruCacheTrait};
