//! Error types for the lrwcache library.
//!
//! ## Key Components
//!
//! - [`CacheMiss`]: Returned by lookups when the key is not held. A miss is an
//!   ordinary outcome, not a fault.
//! - [`ConfigError`]: Returned by strict constructors when a configuration
//!   parameter is invalid (e.g. zero capacity).
//! - [`InvariantError`]: Returned by `check_invariants` when the index and the
//!   write-order list disagree.
//!
//! ## Example Usage
//!
//! ```
//! use lrwcache::error::{CacheMiss, ConfigError};
//! use lrwcache::policy::write_order::WriteOrderCache;
//!
//! let cache: WriteOrderCache<String, i32> = WriteOrderCache::new(8);
//! assert_eq!(cache.get(&"absent".to_string()), Err(CacheMiss));
//!
//! let bad: Result<WriteOrderCache<String, i32>, ConfigError> = WriteOrderCache::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// CacheMiss
// ---------------------------------------------------------------------------

/// The requested key is not currently held by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CacheMiss;

impl fmt::Display for CacheMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cache miss")
    }
}

impl std::error::Error for CacheMiss {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`WriteOrderCache::try_new`](crate::policy::write_order::WriteOrderCache::try_new)
/// and [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use lrwcache::policy::write_order::WriteOrderCache;
///
/// let err = WriteOrderCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

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
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

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
