pub use crate::builder::{CacheBuilder, CacheConfig};
pub use crate::error::{CacheMiss, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::WriteOrderMetricsSnapshot;
pub use crate::policy::write_order::{PutOutcome, WriteOrderCache, WriteOrderCore};
pub use crate::traits::{ConcurrentCache, CoreCache, WriteOrderCacheTrait};
