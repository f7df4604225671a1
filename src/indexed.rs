//! Index-addressed payload store with a recycling side channel.
//!
//! `IndexedCache` is the authoritative owner of every cached payload: a
//! sparse ordered map from non-negative integer index to payload, paired with
//! a [`RecyclePool`] that catches payloads on their way out so they can be
//! reused instead of rebuilt.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         IndexedCache<V>                             │
//! │                                                                     │
//! │   entries: BTreeMap<usize, V>          pool: RecyclePool<V>         │
//! │       index → payload                      identifier → [V, ..]     │
//! │       (ascending iteration)                (LIFO buckets)           │
//! │                                                                     │
//! │   reclaim: FnMut(&mut V, usize) -> Option<String>                   │
//! │                                                                     │
//! │   reclaim_at(i):  entries ──remove──▶ reclaim() ──Some(id)──▶ pool  │
//! │                                           │                         │
//! │                                          None ──▶ payload dropped   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A payload lives in the entry map or in the pool, never both. Ownership
//! leaves the cache only through `insert`'s displaced return value and
//! `dequeue_reusable`.
//!
//! ## Operations
//!
//! | Operation          | Time       | Notes                                 |
//! |--------------------|------------|---------------------------------------|
//! | `insert`           | O(log n)   | Returns the displaced payload         |
//! | `get`              | O(log n)   | Pure lookup, no side effects          |
//! | `iter`             | O(n)       | Lazy, ascending index order           |
//! | `reclaim_at`       | O(log n)   | Remove + reclaim + pool-or-drop       |
//! | `recycle`          | O(n log n) | `reclaim_at` over every entry         |
//! | `flush`            | O(n)       | Drops entries; pool untouched         |
//! | `clean`            | O(n)       | Drops pool; entries untouched         |
//!
//! ## Reclaim Callback
//!
//! The reclaim callback is consulted whenever an entry is recycled. It
//! receives the payload mutably — so it can release heavyweight contents
//! before pooling — and the entry's index, and answers with the pool
//! identifier to file the payload under, or `None` to drop it outright.
//!
//! ## Example Usage
//!
//! ```
//! use rangekit::indexed::IndexedCache;
//!
//! let mut cache: IndexedCache<String> = IndexedCache::new();
//! cache.set_reclaim(|_, _| Some("text".to_string()));
//!
//! cache.insert(0, "zero".to_string());
//! cache.insert(7, "seven".to_string());
//!
//! assert_eq!(cache.get(7).map(String::as_str), Some("seven"));
//! assert_eq!(cache.get(3), None);
//!
//! // Recycling moves every payload into the pool, where it can be reused.
//! cache.recycle();
//! assert!(cache.is_empty());
//! assert_eq!(cache.dequeue_reusable("text").as_deref(), Some("seven"));
//! ```
//!
//! ## Thread Safety
//!
//! Single-threaded, single-writer. All mutation must be serialized by the
//! caller.

use std::collections::BTreeMap;

use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::{IndexedMetrics, IndexedMetricsSnapshot};
use crate::pool::{RecyclePool, DEFAULT_POOL_SIZE};

/// Decides the pool identifier for a departing payload, or declines to pool
/// it. Receives the payload mutably so heavyweight contents can be released
/// before pooling.
pub type ReclaimFn<V> = Box<dyn FnMut(&mut V, usize) -> Option<String>>;

/// A sparse index→payload store with an identifier-keyed recycle pool.
///
/// Indices need not be contiguous; iteration is always in ascending index
/// order. See the [module docs](self) for the full contract.
pub struct IndexedCache<V> {
    entries: BTreeMap<usize, V>,
    pool: RecyclePool<V>,
    reclaim: Option<ReclaimFn<V>>,
    #[cfg(feature = "metrics")]
    metrics: IndexedMetrics,
}

impl<V> IndexedCache<V> {
    /// Creates an empty cache with the default pool size cap.
    #[inline]
    pub fn new() -> Self {
        Self::with_pool_size(DEFAULT_POOL_SIZE)
    }

    /// Creates an empty cache whose pool admits up to `size` payloads.
    #[inline]
    pub fn with_pool_size(size: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            pool: RecyclePool::with_size(size),
            reclaim: None,
            #[cfg(feature = "metrics")]
            metrics: IndexedMetrics::default(),
        }
    }

    // -- store ------------------------------------------------------------

    /// Returns the number of occupied indices.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no index is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `index` is occupied.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Inserts or replaces the payload at `index`, returning the displaced
    /// payload if the index was occupied.
    ///
    /// Replacement never touches the pool; a displaced payload is handed
    /// back to the caller, not reclaimed.
    pub fn insert(&mut self, index: usize, payload: V) -> Option<V> {
        let displaced = self.entries.insert(index, payload);
        #[cfg(feature = "metrics")]
        if displaced.is_some() {
            self.metrics.record_insert_update();
        } else {
            self.metrics.record_insert_new();
        }
        displaced
    }

    /// Looks up the payload at `index`.
    ///
    /// A pure read: never creates, never recycles, and returns `None` for an
    /// unoccupied index rather than any fabricated default.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&V> {
        let payload = self.entries.get(&index);
        #[cfg(feature = "metrics")]
        if payload.is_some() {
            self.metrics.record_get_hit();
        } else {
            self.metrics.record_get_miss();
        }
        payload
    }

    /// Looks up the payload at `index` mutably.
    ///
    /// Payloads stay owned by the cache; this is the hook for collaborators
    /// that enrich a payload in place after it was stored.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        self.entries.get_mut(&index)
    }

    /// Lazily enumerates all occupied `(index, payload)` pairs in ascending
    /// index order.
    ///
    /// The traversal is restartable — each call observes the current state —
    /// and the consumer terminates it early by dropping the iterator.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (usize, &V)> + '_ {
        self.entries.iter().map(|(&index, payload)| (index, payload))
    }

    /// Collects the payloads whose `(index, payload)` pair passes `test`,
    /// in ascending index order.
    pub fn objects_passing<F>(&self, mut test: F) -> Vec<&V>
    where
        F: FnMut(usize, &V) -> bool,
    {
        let mut passing = Vec::new();
        for (index, payload) in self.iter() {
            if test(index, payload) {
                passing.push(payload);
            }
        }
        passing
    }

    /// Drops every occupied entry. The reclaim callback is not consulted and
    /// the pool is untouched.
    pub fn flush(&mut self) {
        self.entries.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_flush();
    }

    // -- recycling --------------------------------------------------------

    /// Installs the reclaim callback used by [`recycle`](Self::recycle) and
    /// [`reclaim_at`](Self::reclaim_at).
    pub fn set_reclaim<F>(&mut self, reclaim: F)
    where
        F: FnMut(&mut V, usize) -> Option<String> + 'static,
    {
        self.reclaim = Some(Box::new(reclaim));
    }

    /// Removes the reclaim callback. Subsequent [`recycle`](Self::recycle)
    /// calls are no-ops; [`reclaim_at`](Self::reclaim_at) still removes but
    /// can no longer pool.
    pub fn clear_reclaim(&mut self) {
        self.reclaim = None;
    }

    /// Returns `true` if a reclaim callback is installed.
    #[inline]
    pub fn has_reclaim(&self) -> bool {
        self.reclaim.is_some()
    }

    /// Pops the most recently pooled payload under `identifier`.
    ///
    /// Returns `None` for an unknown identifier or an exhausted bucket.
    /// Typically called from a create callback to obtain a warm payload
    /// before building a fresh one.
    pub fn dequeue_reusable(&mut self, identifier: &str) -> Option<V> {
        let payload = self.pool.dequeue(identifier);
        #[cfg(feature = "metrics")]
        if payload.is_some() {
            self.metrics.record_dequeue_hit();
        } else {
            self.metrics.record_dequeue_miss();
        }
        payload
    }

    /// Recycles the entry at `index`, if occupied: the entry leaves the
    /// store, the reclaim callback picks a pool identifier, and the payload
    /// is pooled — or dropped, when the callback declines, no callback is
    /// installed, or the pool refuses admission.
    ///
    /// Returns `true` if an entry was removed. This is the per-entry step
    /// shared by [`recycle`](Self::recycle) and the active-range layer's
    /// reconciliation.
    pub fn reclaim_at(&mut self, index: usize) -> bool {
        let Some(mut payload) = self.entries.remove(&index) else {
            return false;
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_reclaimed();

        let identifier = self
            .reclaim
            .as_mut()
            .and_then(|reclaim| reclaim(&mut payload, index));
        match identifier {
            Some(identifier) => {
                if self.pool.admit(&identifier, payload) {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_pooled();
                } else {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_dropped();
                }
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_dropped();
            },
        }
        true
    }

    /// Recycles every occupied entry, in ascending index order.
    ///
    /// A silent no-op when no reclaim callback is installed — forced
    /// recycling without a destination for the payloads would only discard
    /// the whole store, which is what [`flush`](Self::flush) is for.
    pub fn recycle(&mut self) {
        if self.reclaim.is_none() {
            return;
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_recycle_call();

        let indexes: Vec<usize> = self.entries.keys().copied().collect();
        for index in indexes {
            self.reclaim_at(index);
        }
    }

    /// Drops every pooled payload. Occupied entries are untouched.
    pub fn clean(&mut self) {
        self.pool.clean();
        #[cfg(feature = "metrics")]
        self.metrics.record_clean();
    }

    // -- pool configuration -----------------------------------------------

    /// Returns the pool's soft size cap.
    #[inline]
    pub fn pool_size(&self) -> usize {
        self.pool.size()
    }

    /// Sets the pool's soft size cap. See [`RecyclePool::set_size`].
    #[inline]
    pub fn set_pool_size(&mut self, size: usize) {
        self.pool.set_size(size);
    }

    /// Returns `true` if pool admission is suspended.
    #[inline]
    pub fn norecycle(&self) -> bool {
        self.pool.norecycle()
    }

    /// Suspends or resumes pool admission. While suspended, recycled
    /// payloads are dropped instead of pooled.
    #[inline]
    pub fn set_norecycle(&mut self, norecycle: bool) {
        self.pool.set_norecycle(norecycle);
    }

    /// Returns the total number of pooled payloads.
    #[inline]
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Checks internal invariants of the cache and its pool.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.pool.check_invariants()
    }

    /// Returns a snapshot of the operation counters.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> IndexedMetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl<V> Default for IndexedCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for IndexedCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedCache")
            .field("len", &self.entries.len())
            .field("pool", &self.pool)
            .field("has_reclaim", &self.reclaim.is_some())
            .finish_non_exhaustive()
    }
}
