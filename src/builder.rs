//! Cache configuration and builder.
//!
//! Collects construction parameters in one place and produces either the
//! single-threaded [`WriteOrderCore`] or the shared [`WriteOrderCache`].
//!
//! ## Example
//!
//! ```rust
//! use lrwcache::builder::CacheBuilder;
//!
//! let cache = CacheBuilder::new(100)
//!     .preallocate(true)
//!     .try_build::<u64, String>()
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Ok("hello".to_string()));
//! ```
//!
//! ## CacheConfig
//!
//! | Field         | Type    | Default | Description                              |
//! |---------------|---------|---------|------------------------------------------|
//! | `capacity`    | `usize` | 1000    | Maximum entries held at once             |
//! | `preallocate` | `bool`  | true    | Reserve index/list storage up front (capped at `MAX_PREALLOCATION`) |

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::write_order::{
    DEFAULT_CAPACITY, MAX_PREALLOCATION, WriteOrderCache, WriteOrderCore,
};

/// Construction parameters for a write-order cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub capacity: usize,
    pub preallocate: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            preallocate: true,
        }
    }
}

impl CacheConfig {
    /// Rejects configurations that would produce a cache that holds nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(())
    }
}

/// Builder for write-order caches.
#[derive(Debug, Clone, Default)]
pub struct CacheBuilder {
    config: CacheConfig,
}

impl CacheBuilder {
    /// Starts from the default config with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: CacheConfig {
                capacity,
                ..CacheConfig::default()
            },
        }
    }

    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Reserve storage for `capacity` entries at construction, up to
    /// [`MAX_PREALLOCATION`] entries.
    pub fn preallocate(mut self, preallocate: bool) -> Self {
        self.config.preallocate = preallocate;
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Builds a single-threaded core. Zero capacity is accepted.
    pub fn build_core<K, V>(&self) -> WriteOrderCore<K, V>
    where
        K: Eq + Hash + Clone,
    {
        if self.config.preallocate {
            WriteOrderCore::with_preallocation(self.config.capacity)
        } else {
            WriteOrderCore::new(self.config.capacity)
        }
    }

    /// Builds a thread-safe cache. Zero capacity is accepted.
    pub fn build<K, V>(&self) -> WriteOrderCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        WriteOrderCache::from_core(self.build_core())
    }

    /// Builds a thread-safe cache after validating the config.
    pub fn try_build<K, V>(&self) -> Result<WriteOrderCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        self.config.validate()?;
        Ok(self.build())
    }
}
