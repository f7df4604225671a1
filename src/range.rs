//! Active-range reconciliation over an [`IndexedCache`].
//!
//! `ActiveRangeCache` defers payload creation to the moment an index becomes
//! required: the caller declares a half-open index range as "active", and the
//! cache reconciles — departing indices are recycled into the pool, arriving
//! indices are materialized through the create callback, and indices inside
//! both the old and new range are left alone.
//!
//! ## Reconciliation
//!
//! ```text
//!   previous:  [0 ──────────── 10)
//!   new:              [5 ──────────────── 15)
//!
//!   0..5    departing  → reclaim_at, ascending (pool or drop)
//!   5..10   overlap    → untouched (no re-create, no recycle)
//!   10..15  arriving   → create callback, ascending (None = stays empty)
//! ```
//!
//! Work is proportional to the symmetric difference of the two ranges, never
//! to their size. Setting the same range twice does nothing the second time.
//!
//! ## Create Callback
//!
//! The create callback receives the underlying [`IndexedCache`] and the
//! arriving index, and returns the payload to store — or `None`, meaning
//! "nothing to show for this index", which is a normal outcome and leaves
//! the index unoccupied. Handing the indexed layer to the callback is what
//! enables the reuse pattern: dequeue a recycled payload first, build fresh
//! only on a pool miss.
//!
//! ## Example Usage
//!
//! ```
//! use rangekit::range::ActiveRangeCache;
//!
//! let mut cache: ActiveRangeCache<String> = ActiveRangeCache::new();
//! cache.set_reclaim(|_, _| Some("label".to_string()));
//! cache.set_create(|indexed, index| {
//!     // Reuse a recycled payload when one is available.
//!     let mut label = indexed
//!         .dequeue_reusable("label")
//!         .unwrap_or_default();
//!     label.clear();
//!     label.push_str(&format!("item{index}"));
//!     Some(label)
//! });
//!
//! cache.set_active_range(0..3).unwrap();
//! assert_eq!(cache.get(1).map(String::as_str), Some("item1"));
//!
//! // Sliding the window recycles 0..2 and creates 3..5; index 2 is kept.
//! cache.set_active_range(2..5).unwrap();
//! assert_eq!(cache.get(0), None);
//! assert_eq!(cache.get(4).map(String::as_str), Some("item4"));
//! ```
//!
//! ## Thread Safety
//!
//! Single-threaded, like the layer below. `set_active_range` runs its whole
//! reconciliation synchronously on the caller's thread; a create callback
//! that prepares content asynchronously must return a placeholder payload
//! and enrich it later through [`IndexedCache::get_mut`].

use std::ops::{Deref, DerefMut, Range};

use crate::error::ConfigError;
use crate::indexed::IndexedCache;
#[cfg(feature = "metrics")]
use crate::metrics::{RangeMetrics, RangeMetricsSnapshot};

/// Materializes the payload for an index that entered the active range, or
/// declines. Receives the indexed layer so it can dequeue a recycled payload
/// before building a fresh one.
pub type CreateFn<V> = Box<dyn FnMut(&mut IndexedCache<V>, usize) -> Option<V>>;

/// An [`IndexedCache`] populated on demand by a moving active index range.
///
/// Dereferences to the indexed layer, so every store and recycling operation
/// remains available on this type.
pub struct ActiveRangeCache<V> {
    indexed: IndexedCache<V>,
    active: Range<usize>,
    create: Option<CreateFn<V>>,
    #[cfg(feature = "metrics")]
    metrics: RangeMetrics,
}

impl<V> ActiveRangeCache<V> {
    /// Creates a cache with an empty active range and the default pool cap.
    #[inline]
    pub fn new() -> Self {
        Self::with_pool_size(crate::pool::DEFAULT_POOL_SIZE)
    }

    /// Creates a cache whose pool admits up to `size` payloads.
    #[inline]
    pub fn with_pool_size(size: usize) -> Self {
        Self {
            indexed: IndexedCache::with_pool_size(size),
            active: 0..0,
            create: None,
            #[cfg(feature = "metrics")]
            metrics: RangeMetrics::default(),
        }
    }

    /// Installs the create callback. Required before the first non-empty
    /// range is set.
    pub fn set_create<F>(&mut self, create: F)
    where
        F: FnMut(&mut IndexedCache<V>, usize) -> Option<V> + 'static,
    {
        self.create = Some(Box::new(create));
    }

    /// Returns `true` if a create callback is installed.
    #[inline]
    pub fn has_create(&self) -> bool {
        self.create.is_some()
    }

    /// Returns the current active range.
    #[inline]
    pub fn active_range(&self) -> Range<usize> {
        self.active.clone()
    }

    /// Declares `range` as the set of indices that must be populated, and
    /// reconciles the cache contents with it.
    ///
    /// In order:
    /// 1. Indices leaving the range are recycled through
    ///    [`IndexedCache::reclaim_at`], in ascending order.
    /// 2. Indices entering the range with no entry yet are offered to the
    ///    create callback, in ascending order; a `None` answer leaves the
    ///    index unoccupied.
    /// 3. Indices inside both the previous and the new range are untouched.
    ///
    /// The stored range is updated only after reconciliation completes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] — before any mutation — when `range` is
    /// non-empty and no create callback is installed.
    pub fn set_active_range(&mut self, range: Range<usize>) -> Result<(), ConfigError> {
        if self.create.is_none() && !range.is_empty() {
            return Err(ConfigError::new(
                "non-empty active range set before a create callback was configured",
            ));
        }
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_set_range();
            let overlap_start = self.active.start.max(range.start);
            let overlap_end = self.active.end.min(range.end);
            self.metrics
                .record_overlap(overlap_end.saturating_sub(overlap_start) as u64);
        }

        let previous = self.active.clone();

        // Departing: required before, not required now.
        for index in previous.clone() {
            if range.contains(&index) {
                continue;
            }
            if self.indexed.reclaim_at(index) {
                #[cfg(feature = "metrics")]
                self.metrics.record_departed();
            }
        }

        // Arriving: newly required, not yet occupied.
        for index in range.clone() {
            if previous.contains(&index) || self.indexed.contains(index) {
                continue;
            }
            let Some(create) = self.create.as_mut() else {
                // Unreachable past the guard above; an empty range has no
                // arriving indices.
                continue;
            };
            match create(&mut self.indexed, index) {
                Some(payload) => {
                    self.indexed.insert(index, payload);
                    #[cfg(feature = "metrics")]
                    self.metrics.record_created();
                },
                None => {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_declined();
                },
            }
        }

        self.active = range;
        Ok(())
    }

    /// Returns a snapshot of the reconciliation counters.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> RangeMetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl<V> Default for ActiveRangeCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Deref for ActiveRangeCache<V> {
    type Target = IndexedCache<V>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.indexed
    }
}

impl<V> DerefMut for ActiveRangeCache<V> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.indexed
    }
}

impl<V> std::fmt::Debug for ActiveRangeCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveRangeCache")
            .field("active", &self.active)
            .field("indexed", &self.indexed)
            .field("has_create", &self.create.is_some())
            .finish_non_exhaustive()
    }
}
