//! # Cache Traits
//!
//! Small trait layer over the write-order cache so callers can be generic over
//! the single-threaded core and future implementations.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&, &K) → Option<&V>                │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) / is_empty(&) / capacity(&)     │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │       WriteOrderCacheTrait<K, V>        │
//!   │                                         │
//!   │  peek_oldest() → (&K, &V)               │
//!   │  peek_newest() → (&K, &V)               │
//!   │  write_rank(&K) → usize                 │
//!   │                                         │
//!   │  ⚠ No touch / no remove: only writes    │
//!   │    move entries, only overflow evicts.  │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## `get` takes `&self`
//!
//! Lookups never reorder entries, so a read needs no mutable access. This is
//! what lets the concurrent wrapper serve `get` under a shared lock.
//!
//! ## Thread Safety
//!
//! - [`CoreCache`] implementations are single-threaded.
//! - [`ConcurrentCache`] marks implementations that are `Send + Sync` and do
//!   their own locking.

/// Core operations every cache in this crate supports.
///
/// # Example
///
/// ```
/// use lrwcache::policy::write_order::WriteOrderCore;
/// use lrwcache::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = WriteOrderCore::new(10);
/// warm(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or overwrites `key`, returning the overwritten value.
    ///
    /// May evict one other entry if the cache overflows.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key` without changing eviction order.
    fn get(&self, key: &K) -> Option<&V>;

    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries held at once.
    fn capacity(&self) -> usize;
}

/// Write-order inspection.
///
/// "Oldest" is the entry whose last write is furthest in the past; it is the
/// next eviction victim.
pub trait WriteOrderCacheTrait<K, V>: CoreCache<K, V> {
    /// Entry that the next overflowing insert will evict.
    fn peek_oldest(&self) -> Option<(&K, &V)>;

    /// Entry written by the most recent insert.
    fn peek_newest(&self) -> Option<(&K, &V)>;

    /// Position in write order, 0 = most recently written. O(n).
    fn write_rank(&self, key: &K) -> Option<usize>;
}

/// Marker for caches that are safe to share across threads as-is.
///
/// ```
/// use std::sync::Arc;
/// use lrwcache::policy::write_order::WriteOrderCache;
/// use lrwcache::traits::ConcurrentCache;
///
/// fn share<C: ConcurrentCache>(cache: C) -> Arc<C> {
///     Arc::new(cache)
/// }
///
/// let shared = share(WriteOrderCache::<u64, u64>::new(16));
/// let worker = Arc::clone(&shared);
/// std::thread::spawn(move || worker.put(1, 1)).join().unwrap();
/// assert_eq!(shared.get(&1), Ok(1));
/// ```
pub trait ConcurrentCache: Send + Sync {}
