//! # Least Recently Written (LRW) Cache
//!
//! Fixed-capacity cache that evicts the entry whose last *write* is oldest.
//! Reads never change eviction order, so a hot key that is never rewritten
//! still ages out. This is the difference from a classic LRU cache.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                      WriteOrderCache<K, V>                           │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │              Arc<RwLock<WriteOrderCore<K, V>>>               │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   │                               │                                      │
//!   │                               ▼                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │                    WriteOrderCore<K, V>                      │   │
//!   │   │                                                              │   │
//!   │   │   index: FxHashMap<K, SlotId>                                │   │
//!   │   │     "a" ──────────────┐                                      │   │
//!   │   │     "b" ────────┐     │                                      │   │
//!   │   │     "c" ──┐     │     │                                      │   │
//!   │   │           ▼     ▼     ▼                                      │   │
//!   │   │   order: RecencyList<Entry<K, V>>                            │   │
//!   │   │     head ─► [c] ◄──► [b] ◄──► [a] ◄── tail                   │   │
//!   │   │          newest write        oldest write (next victim)      │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list owns every entry. The index only holds [`SlotId`] handles; a
//! handle is never dereferenced without going through the list's arena.
//!
//! ## Insert Flow
//!
//! ```text
//!   capacity = 3, order: [c] [b] [a]
//!
//!   insert(a, a2):
//!     1. index[a] → remove old node      order: [c] [b]
//!     2. push [a2] at head               order: [a2] [c] [b]
//!     3. index[a] = new handle
//!     4. len 3 ≤ 3, nothing evicted
//!
//!   insert(d, d1):
//!     2. push [d1] at head               order: [d1] [a2] [c] [b]
//!     4. len 4 > 3, pop tail [b]         order: [d1] [a2] [c]
//! ```
//!
//! An updated key is unlinked before the overflow check, so rewriting the
//! current tail never evicts that key.
//!
//! ## Methods
//!
//! | Method                 | Lock   | Complexity | Description                       |
//! |------------------------|--------|------------|-----------------------------------|
//! | `new(capacity)`        | -      | O(1)       | Empty cache, zero capacity allowed|
//! | `try_new(capacity)`    | -      | O(1)       | Rejects zero capacity             |
//! | `put(k, v)`            | Write  | O(1) avg   | Insert or overwrite, may evict    |
//! | `put_evicting(k, v)`   | Write  | O(1) avg   | `put` reporting the victim        |
//! | `get(&k)`              | Read   | O(1) avg   | Cloned value or `CacheMiss`       |
//! | `get_with(&k, f)`      | Read   | O(1) avg   | Borrow the value under the lock   |
//! | `contains(&k)`         | Read   | O(1) avg   | Key presence                      |
//! | `peek_oldest()`        | Read   | O(1)       | Next eviction victim              |
//! | `peek_newest()`        | Read   | O(1)       | Last written entry                |
//! | `write_rank(&k)`       | Read   | O(n)       | 0 = most recently written         |
//! | `keys()`               | Read   | O(n)       | Keys, newest write first          |
//! | `len()` / `capacity()` | Read   | O(1)       | Gauges                            |
//!
//! ## Capacity
//!
//! A capacity of zero is accepted by [`WriteOrderCache::new`] and disables the
//! cache: every insert is evicted by its own overflow check, so the cache stays
//! empty and every lookup misses. Use [`WriteOrderCache::try_new`] to reject
//! zero instead.
//!
//! ## Concurrency
//!
//! ```text
//!   Thread 1         Thread 2         Thread 3
//!      │ get(a)         │ get(b)         │ put(c)
//!      ▼                ▼                ▼
//!   ┌──────────────────────────────────────────────────────┐
//!   │                 parking_lot::RwLock                  │
//!   │  get / contains / peek_*  → READ lock (concurrent)   │
//!   │  put / put_evicting       → WRITE lock (exclusive)   │
//!   └──────────────────────────────────────────────────────┘
//! ```
//!
//! Every `put` is linearized against every other call. The four insert steps
//! run under one write guard, so no reader ever sees a half-applied update.
//!
//! ## Example Usage
//!
//! ```
//! use lrwcache::policy::write_order::WriteOrderCache;
//! use lrwcache::error::CacheMiss;
//!
//! let cache: WriteOrderCache<String, String> = WriteOrderCache::new(2);
//! cache.put("a".to_string(), "1".to_string());
//! cache.put("b".to_string(), "2".to_string());
//!
//! // Reading "a" does not protect it.
//! assert_eq!(cache.get("a"), Ok("1".to_string()));
//! cache.put("c".to_string(), "3".to_string());
//!
//! assert_eq!(cache.get("a"), Err(CacheMiss));
//! assert_eq!(cache.len(), 2);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::{RecencyList, SlotId};
use crate::error::{CacheMiss, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::WriteOrderMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::WriteOrderMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsReset, MetricsSnapshotProvider, ReadMetricsRecorder, WriteMetricsRecorder,
};
use crate::traits::{ConcurrentCache, CoreCache, WriteOrderCacheTrait};

/// Capacity used by `Default` impls and [`CacheConfig`](crate::builder::CacheConfig).
pub const DEFAULT_CAPACITY: usize = 1000;

/// Upper bound on the entries [`WriteOrderCore::with_preallocation`] reserves
/// up front. Larger caches grow on demand past this point.
pub const MAX_PREALLOCATION: usize = 1 << 16;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// What a single insert did besides storing the new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOutcome<K, V> {
    /// Value that was overwritten, if the key was already present.
    pub previous: Option<V>,
    /// Entry pushed out by the overflow check, if any.
    pub evicted: Option<(K, V)>,
}

/// Single-threaded write-order cache: index + write-order list.
///
/// Not synchronized. [`WriteOrderCache`] wraps it in a lock for shared use.
pub struct WriteOrderCore<K, V> {
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: WriteOrderMetrics,
}

impl<K, V> WriteOrderCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty core. Storage grows on demand.
    ///
    /// ```
    /// use lrwcache::policy::write_order::WriteOrderCore;
    /// use lrwcache::traits::CoreCache;
    ///
    /// let cache: WriteOrderCore<u32, String> = WriteOrderCore::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "created write-order cache");
        WriteOrderCore {
            index: FxHashMap::default(),
            order: RecencyList::new(),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: WriteOrderMetrics::default(),
        }
    }

    /// Creates an empty core with index and list storage reserved for a full
    /// cache plus the one transient overflow entry.
    ///
    /// The reservation is capped at [`MAX_PREALLOCATION`] entries, so any
    /// capacity is accepted.
    pub fn with_preallocation(capacity: usize) -> Self {
        let mut core = Self::new(capacity);
        let slots = capacity.min(MAX_PREALLOCATION) + 1;
        core.index.reserve(slots);
        core.order.reserve(slots);
        core
    }

    /// Inserts or overwrites `key` and reports what was displaced.
    ///
    /// ```
    /// use lrwcache::policy::write_order::WriteOrderCore;
    ///
    /// let mut cache = WriteOrderCore::new(1);
    /// cache.insert_evicting("a", 1);
    /// let outcome = cache.insert_evicting("b", 2);
    /// assert_eq!(outcome.previous, None);
    /// assert_eq!(outcome.evicted, Some(("a", 1)));
    /// ```
    pub fn insert_evicting(&mut self, key: K, value: V) -> PutOutcome<K, V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        let previous = match self.index.get(&key).copied() {
            Some(id) => {
                trace!(slot = id.index(), "overwriting entry");
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_update();
                self.order.remove(id).map(|entry| entry.value)
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_new();
                None
            },
        };

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        let evicted = if self.order.len() > self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        #[cfg(debug_assertions)]
        self.validate_invariants();

        PutOutcome { previous, evicted }
    }

    /// Looks up any borrowed form of the key without touching write order.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self
            .index
            .get(key)
            .and_then(|&id| self.order.get(id))
            .map(|entry| &entry.value);

        #[cfg(feature = "metrics")]
        {
            match value {
                Some(_) => self.metrics.record_get_hit(),
                None => self.metrics.record_get_miss(),
            }
        }

        value
    }

    /// Borrowed-key form of [`WriteOrderCacheTrait::write_rank`].
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let &id = self.index.get(key)?;
        self.order.position(id)
    }

    fn contains_borrowed<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Iterates `(key, value)` from most to least recently written.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Keys from most to least recently written.
    pub fn keys(&self) -> Vec<K> {
        self.order.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Checks that the index and the list describe the same set of entries.
    ///
    /// Verifies list link integrity, equal sizes, the capacity bound and that
    /// every node is reachable from the index under its own key.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_invariants()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} entries",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        for (id, entry) in self.order.iter_entries() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "list slot {} is not indexed under its key",
                    id.index()
                )));
            }
        }
        Ok(())
    }

    fn evict_oldest(&mut self) -> Option<(K, V)> {
        let victim = self.order.back_id()?;
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        trace!(
            slot = victim.index(),
            len = self.order.len(),
            capacity = self.capacity,
            "evicted oldest entry"
        );

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        Some((entry.key, entry.value))
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("write-order cache invariant violated: {}", err);
        }
    }
}

impl<K, V> CoreCache<K, V> for WriteOrderCore<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_evicting(key, value).previous
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        self.peek(key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> WriteOrderCacheTrait<K, V> for WriteOrderCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.order.back().map(|entry| (&entry.key, &entry.value))
    }

    fn peek_newest(&self) -> Option<(&K, &V)> {
        self.order.front().map(|entry| (&entry.key, &entry.value))
    }

    fn write_rank(&self, key: &K) -> Option<usize> {
        self.rank_of(key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<WriteOrderMetricsSnapshot> for WriteOrderCore<K, V> {
    fn snapshot(&self) -> WriteOrderMetricsSnapshot {
        WriteOrderMetricsSnapshot {
            get_calls: self.metrics.get_calls(),
            get_hits: self.metrics.get_hits.get(),
            get_misses: self.metrics.get_misses.get(),
            insert_calls: self.metrics.insert_calls,
            insert_new: self.metrics.insert_new,
            insert_updates: self.metrics.insert_updates,
            evicted_entries: self.metrics.evicted_entries,
            cache_len: self.order.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for WriteOrderCore<K, V> {
    fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

impl<K, V> fmt::Debug for WriteOrderCore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteOrderCore")
            .field("len", &self.order.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for WriteOrderCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> Extend<(K, V)> for WriteOrderCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert_evicting(key, value);
        }
    }
}

/// Thread-safe write-order cache.
///
/// Cloning is cheap and yields another handle to the *same* cache; the
/// storage is released when the last handle is dropped.
pub struct WriteOrderCache<K, V> {
    inner: Arc<RwLock<WriteOrderCore<K, V>>>,
}

impl<K, V> Clone for WriteOrderCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> WriteOrderCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Zero is accepted and yields a cache that never retains anything.
    ///
    /// ```
    /// use lrwcache::policy::write_order::WriteOrderCache;
    ///
    /// let cache: WriteOrderCache<u32, String> = WriteOrderCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::from_core(WriteOrderCore::new(capacity))
    }

    /// Like [`new`](Self::new) but rejects a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(Self::new(capacity))
    }

    /// Wraps an existing core, e.g. one built with preallocation.
    pub fn from_core(core: WriteOrderCore<K, V>) -> Self {
        WriteOrderCache {
            inner: Arc::new(RwLock::new(core)),
        }
    }

    /// Inserts or overwrites `key`. Never fails.
    ///
    /// The entry becomes the most recently written. If the cache overflows,
    /// the least recently written entry is dropped.
    pub fn put(&self, key: K, value: V) {
        self.put_evicting(key, value);
    }

    /// [`put`](Self::put) that hands back the overwritten value and the
    /// evicted entry instead of dropping them under the lock.
    pub fn put_evicting(&self, key: K, value: V) -> PutOutcome<K, V> {
        let mut cache = self.inner.write();
        cache.insert_evicting(key, value)
    }

    /// Returns a clone of the value for `key`.
    ///
    /// Takes only the read lock and never changes eviction order.
    ///
    /// ```
    /// use lrwcache::error::CacheMiss;
    /// use lrwcache::policy::write_order::WriteOrderCache;
    ///
    /// let cache = WriteOrderCache::new(10);
    /// cache.put("hello".to_string(), "world".to_string());
    /// assert_eq!(cache.get("hello"), Ok("world".to_string()));
    /// assert_eq!(cache.get("notExist"), Err(CacheMiss));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<V, CacheMiss>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Runs `f` on the value for `key` while holding the read lock.
    ///
    /// `f` must not call back into this cache's `put`: the write lock cannot
    /// be taken while the read guard is held.
    pub fn get_with<Q, R>(&self, key: &Q, f: impl FnOnce(&V) -> R) -> Result<R, CacheMiss>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let cache = self.inner.read();
        cache.peek(key).map(f).ok_or(CacheMiss)
    }

    /// Returns `true` if `key` is cached. Does not change write order.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().contains_borrowed(key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Maximum number of entries held at once.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Clone of the entry the next overflowing `put` will evict.
    pub fn peek_oldest(&self) -> Option<(K, V)>
    where
        V: Clone,
    {
        let cache = self.inner.read();
        cache
            .peek_oldest()
            .map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Clone of the most recently written entry.
    pub fn peek_newest(&self) -> Option<(K, V)>
    where
        V: Clone,
    {
        let cache = self.inner.read();
        cache
            .peek_newest()
            .map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Position of `key` in write order, 0 = most recently written. O(n).
    pub fn write_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().rank_of(key)
    }

    /// Snapshot of keys from most to least recently written.
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().keys()
    }

    /// Verifies index/list agreement and the capacity bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> WriteOrderCache<K, V> {
    /// Point-in-time copy of the hit, miss, insert and eviction counters.
    pub fn metrics_snapshot(&self) -> WriteOrderMetricsSnapshot {
        self.inner.read().snapshot()
    }

    /// Zeroes all counters.
    pub fn reset_metrics(&self) {
        self.inner.write().reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<WriteOrderMetricsSnapshot> for WriteOrderCache<K, V> {
    fn snapshot(&self) -> WriteOrderMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> ConcurrentCache for WriteOrderCache<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
}

impl<K, V> fmt::Debug for WriteOrderCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("WriteOrderCache")
            .field("len", &cache.order.len())
            .field("capacity", &cache.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for WriteOrderCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_with(capacity: usize, n: u32) -> WriteOrderCore<u32, u32> {
        let mut cache = WriteOrderCore::new(capacity);
        for i in 0..n {
            cache.insert(i, i * 10);
        }
        cache
    }

    mod single_threaded {
        use super::*;

        #[test]
        fn insert_and_get() {
            let mut cache = WriteOrderCore::new(10);
            cache.insert("hello", "world");
            assert_eq!(cache.get(&"hello"), Some(&"world"));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn overwrite_replaces_value_and_keeps_one_entry() {
            let mut cache = WriteOrderCore::new(10);
            for i in 0..5 {
                cache.insert("myKey", i);
            }
            assert_eq!(cache.get(&"myKey"), Some(&4));
            assert_eq!(cache.len(), 1);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn overflow_evicts_oldest_write() {
            let mut cache = core_with(3, 3);
            let outcome = cache.insert_evicting(3, 30);
            assert_eq!(outcome.evicted, Some((0, 0)));
            assert_eq!(cache.keys(), vec![3, 2, 1]);
        }

        #[test]
        fn rewriting_tail_moves_it_to_head() {
            let mut cache = core_with(3, 3);
            assert_eq!(cache.peek_oldest(), Some((&0, &0)));

            let outcome = cache.insert_evicting(0, 1);
            assert_eq!(outcome.previous, Some(0));
            assert_eq!(outcome.evicted, None);
            assert_eq!(cache.keys(), vec![0, 2, 1]);

            let outcome = cache.insert_evicting(9, 90);
            assert_eq!(outcome.evicted, Some((1, 10)));
            assert!(cache.contains(&0));
        }

        #[test]
        fn reads_do_not_reorder() {
            let cache = core_with(3, 3);
            for _ in 0..10 {
                assert_eq!(cache.get(&0), Some(&0));
            }
            assert_eq!(cache.keys(), vec![2, 1, 0]);
            assert_eq!(cache.write_rank(&0), Some(2));
        }

        #[test]
        fn zero_capacity_retains_nothing() {
            let mut cache = WriteOrderCore::new(0);
            let outcome = cache.insert_evicting("k", 1);
            assert_eq!(outcome.evicted, Some(("k", 1)));
            assert!(cache.is_empty());
            assert_eq!(cache.get(&"k"), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn capacity_one_keeps_latest() {
            let mut cache = core_with(1, 5);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.peek_newest(), Some((&4, &40)));
            assert_eq!(cache.peek_oldest(), Some((&4, &40)));
        }

        #[test]
        fn borrowed_key_lookup() {
            let mut cache: WriteOrderCore<String, u8> = WriteOrderCore::new(4);
            cache.insert("abc".to_string(), 1);
            assert_eq!(cache.peek("abc"), Some(&1));
            assert_eq!(cache.rank_of("abc"), Some(0));
            assert_eq!(cache.peek("xyz"), None);
        }

        #[test]
        fn preallocated_core_behaves_like_new() {
            let mut cache = WriteOrderCore::with_preallocation(4);
            cache.extend((0..6u32).map(|i| (i, i)));
            assert_eq!(cache.keys(), vec![5, 4, 3, 2]);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn preallocation_is_capped_for_huge_capacity() {
            let mut cache = WriteOrderCore::with_preallocation(usize::MAX);
            assert_eq!(cache.capacity(), usize::MAX);
            cache.extend((0..3u64).map(|i| (i, i)));
            assert_eq!(cache.len(), 3);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn preallocation_reserves_up_to_cap() {
            let cache: WriteOrderCore<u64, u64> =
                WriteOrderCore::with_preallocation(MAX_PREALLOCATION * 4);
            assert!(cache.index.capacity() > MAX_PREALLOCATION);
            assert_eq!(cache.capacity(), MAX_PREALLOCATION * 4);
        }

        #[test]
        fn iter_matches_keys() {
            let cache = core_with(4, 4);
            let pairs: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            assert_eq!(pairs, vec![(3, 30), (2, 20), (1, 10), (0, 0)]);
        }

        #[test]
        fn debug_shows_len_and_capacity() {
            let cache = core_with(4, 2);
            let text = format!("{:?}", cache);
            assert!(text.contains("len: 2"));
            assert!(text.contains("capacity: 4"));
        }

        #[cfg(feature = "metrics")]
        #[test]
        fn metrics_track_hits_misses_and_evictions() {
            let mut cache = core_with(2, 3);
            cache.insert(2, 0);
            cache.get(&2);
            cache.get(&0);

            let snapshot = cache.snapshot();
            assert_eq!(snapshot.insert_calls, 4);
            assert_eq!(snapshot.insert_new, 3);
            assert_eq!(snapshot.insert_updates, 1);
            assert_eq!(snapshot.evicted_entries, 1);
            assert_eq!(snapshot.get_hits, 1);
            assert_eq!(snapshot.get_misses, 1);
            assert_eq!(snapshot.cache_len, 2);

            cache.reset_metrics();
            assert_eq!(cache.snapshot().insert_calls, 0);
        }
    }

    mod concurrent {
        use super::*;

        #[test]
        fn put_get_round_trip() {
            let cache = WriteOrderCache::new(10);
            cache.put("hello".to_string(), "world".to_string());
            assert_eq!(cache.get("hello"), Ok("world".to_string()));
        }

        #[test]
        fn miss_on_absent_key() {
            let cache: WriteOrderCache<String, u32> = WriteOrderCache::new(10);
            assert_eq!(cache.get("notExist"), Err(CacheMiss));
            assert!(!cache.contains("notExist"));
        }

        #[test]
        fn get_with_borrows_without_clone() {
            let cache = WriteOrderCache::new(2);
            cache.put(1u8, vec![1, 2, 3]);
            assert_eq!(cache.get_with(&1, |v| v.len()), Ok(3));
            assert_eq!(cache.get_with(&2, |v| v.len()), Err(CacheMiss));
        }

        #[test]
        fn clones_share_storage() {
            let cache = WriteOrderCache::new(4);
            let other = cache.clone();
            other.put(1u32, 1u32);
            assert_eq!(cache.get(&1), Ok(1));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn clone_does_not_require_clone_values() {
            struct Handle(u32);

            let cache: WriteOrderCache<u32, Handle> = WriteOrderCache::new(2);
            let other = cache.clone();
            other.put(7, Handle(70));
            assert_eq!(cache.get_with(&7, |h| h.0), Ok(70));
        }

        #[test]
        fn try_new_rejects_zero() {
            let err = WriteOrderCache::<u32, u32>::try_new(0).unwrap_err();
            assert!(err.message().contains("capacity"));
            assert!(WriteOrderCache::<u32, u32>::try_new(1).is_ok());
        }

        #[test]
        fn peek_ends_and_rank() {
            let cache = WriteOrderCache::new(3);
            cache.put("a", 1);
            cache.put("b", 2);
            cache.put("c", 3);
            assert_eq!(cache.peek_oldest(), Some(("a", 1)));
            assert_eq!(cache.peek_newest(), Some(("c", 3)));
            assert_eq!(cache.write_rank("b"), Some(1));
            assert_eq!(cache.keys(), vec!["c", "b", "a"]);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn default_uses_default_capacity() {
            let cache: WriteOrderCache<u8, u8> = WriteOrderCache::default();
            assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::VecDeque;

        /// Reference model: newest write at the front.
        fn model_put(model: &mut VecDeque<(u32, u32)>, capacity: usize, key: u32, value: u32) {
            model.retain(|(k, _)| *k != key);
            model.push_front((key, value));
            if model.len() > capacity {
                model.pop_back();
            }
        }

        proptest! {
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_len_within_capacity(
                capacity in 0usize..20,
                ops in prop::collection::vec((0u32..40, any::<u32>()), 0..200)
            ) {
                let mut cache = WriteOrderCore::new(capacity);
                for (key, value) in ops {
                    cache.insert(key, value);
                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.check_invariants().is_ok());
                }
            }

            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_reference_model(
                capacity in 1usize..16,
                ops in prop::collection::vec((0u32..32, any::<u32>()), 0..200)
            ) {
                let mut cache = WriteOrderCore::new(capacity);
                let mut model = VecDeque::new();
                for (key, value) in ops {
                    cache.insert(key, value);
                    model_put(&mut model, capacity, key, value);
                }
                let actual: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                let expected: Vec<_> = model.into_iter().collect();
                prop_assert_eq!(actual, expected);
            }

            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_reads_never_change_order(
                capacity in 1usize..16,
                keys in prop::collection::vec(0u32..32, 1..64),
                reads in prop::collection::vec(0u32..32, 0..64)
            ) {
                let mut cache = WriteOrderCore::new(capacity);
                for key in keys {
                    cache.insert(key, key);
                }
                let before = cache.keys();
                for key in reads {
                    let _ = cache.get(&key);
                }
                prop_assert_eq!(cache.keys(), before);
            }
        }
    }
}
