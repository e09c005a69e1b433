//! Error types for the lrukit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache is configured with an invalid
//!   capacity. This is the only way constructing a cache can fail.
//! - [`InvariantError`]: Returned by
//!   [`LruCache::check_invariants`](crate::policy::lru::LruCache::check_invariants)
//!   when the index and the recency list disagree.
//!
//! A lookup miss is not an error: `get` returns `None`.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::error::ConfigError;
//! use lrukit::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<u32, u32>, ConfigError> = LruCache::try_new(16);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is rejected without panicking
//! let bad = LruCache::<u32, u32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`LruCache::try_new`](crate::policy::lru::LruCache::try_new)
/// and [`LruCacheBuilder::try_build`](crate::builder::LruCacheBuilder::try_build).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Error for a capacity that cannot hold a single entry.
    pub(crate) fn zero_capacity() -> Self {
        Self::new("cache capacity must be greater than zero")
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Carries a description of the first inconsistency found between the
/// index and the recency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be > 0");
        assert_eq!(err.to_string(), "capacity must be > 0");
    }

    #[test]
    fn zero_capacity_mentions_capacity() {
        let err = ConfigError::zero_capacity();
        assert!(err.message().contains("capacity"));
        assert!(format!("{:?}", err).contains("greater than zero"));
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
        assert_error::<InvariantError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_and_accessor() {
        let err = InvariantError::new("index has 3 keys, list has 2 nodes");
        assert_eq!(err.to_string(), "index has 3 keys, list has 2 nodes");
        assert_eq!(err.message(), "index has 3 keys, list has 2 nodes");
    }
}
