//! Operation counters for the cache layers (feature `metrics`).
//!
//! Recorder structs live inside the cache types and are bumped at each call
//! site; [`IndexedCache::metrics_snapshot`](crate::indexed::IndexedCache::metrics_snapshot)
//! and [`ActiveRangeCache::metrics_snapshot`](crate::range::ActiveRangeCache::metrics_snapshot)
//! hand out copyable snapshots for assertions and reporting.
//!
//! Counters on mutating paths are plain `u64` fields. Read paths (`get`,
//! which takes `&self`) record through [`MetricsCell`], a `Cell` wrapper —
//! metrics are observational and the crate is single-threaded, so interior
//! mutability is all that is needed.

use std::cell::Cell;

/// A metrics-only counter cell for recording on `&self` read paths.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}

// ---------------------------------------------------------------------------
// IndexedMetrics
// ---------------------------------------------------------------------------

/// Counters for [`IndexedCache`](crate::indexed::IndexedCache) operations.
#[derive(Debug, Default)]
pub struct IndexedMetrics {
    pub get_calls: MetricsCell,
    pub get_hits: MetricsCell,
    pub get_misses: MetricsCell,
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub recycle_calls: u64,
    pub reclaimed_entries: u64,
    pub pooled_payloads: u64,
    pub dropped_payloads: u64,
    pub dequeue_calls: u64,
    pub dequeue_hits: u64,
    pub flush_calls: u64,
    pub clean_calls: u64,
}

impl IndexedMetrics {
    #[inline]
    pub fn record_get_hit(&self) {
        self.get_calls.incr();
        self.get_hits.incr();
    }

    #[inline]
    pub fn record_get_miss(&self) {
        self.get_calls.incr();
        self.get_misses.incr();
    }

    #[inline]
    pub fn record_insert_new(&mut self) {
        self.insert_calls += 1;
        self.insert_new += 1;
    }

    #[inline]
    pub fn record_insert_update(&mut self) {
        self.insert_calls += 1;
        self.insert_updates += 1;
    }

    #[inline]
    pub fn record_recycle_call(&mut self) {
        self.recycle_calls += 1;
    }

    #[inline]
    pub fn record_reclaimed(&mut self) {
        self.reclaimed_entries += 1;
    }

    #[inline]
    pub fn record_pooled(&mut self) {
        self.pooled_payloads += 1;
    }

    #[inline]
    pub fn record_dropped(&mut self) {
        self.dropped_payloads += 1;
    }

    #[inline]
    pub fn record_dequeue_hit(&mut self) {
        self.dequeue_calls += 1;
        self.dequeue_hits += 1;
    }

    #[inline]
    pub fn record_dequeue_miss(&mut self) {
        self.dequeue_calls += 1;
    }

    #[inline]
    pub fn record_flush(&mut self) {
        self.flush_calls += 1;
    }

    #[inline]
    pub fn record_clean(&mut self) {
        self.clean_calls += 1;
    }

    pub fn snapshot(&self) -> IndexedMetricsSnapshot {
        IndexedMetricsSnapshot {
            get_calls: self.get_calls.get(),
            get_hits: self.get_hits.get(),
            get_misses: self.get_misses.get(),
            insert_calls: self.insert_calls,
            insert_new: self.insert_new,
            insert_updates: self.insert_updates,
            recycle_calls: self.recycle_calls,
            reclaimed_entries: self.reclaimed_entries,
            pooled_payloads: self.pooled_payloads,
            dropped_payloads: self.dropped_payloads,
            dequeue_calls: self.dequeue_calls,
            dequeue_hits: self.dequeue_hits,
            flush_calls: self.flush_calls,
            clean_calls: self.clean_calls,
        }
    }
}

/// Copyable view of [`IndexedMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexedMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub recycle_calls: u64,
    pub reclaimed_entries: u64,
    pub pooled_payloads: u64,
    pub dropped_payloads: u64,
    pub dequeue_calls: u64,
    pub dequeue_hits: u64,
    pub flush_calls: u64,
    pub clean_calls: u64,
}

// ---------------------------------------------------------------------------
// RangeMetrics
// ---------------------------------------------------------------------------

/// Counters for [`ActiveRangeCache`](crate::range::ActiveRangeCache)
/// reconciliation.
#[derive(Debug, Default)]
pub struct RangeMetrics {
    pub set_range_calls: u64,
    pub created_entries: u64,
    pub declined_creates: u64,
    pub departed_entries: u64,
    pub untouched_overlap: u64,
}

impl RangeMetrics {
    #[inline]
    pub fn record_set_range(&mut self) {
        self.set_range_calls += 1;
    }

    #[inline]
    pub fn record_created(&mut self) {
        self.created_entries += 1;
    }

    #[inline]
    pub fn record_declined(&mut self) {
        self.declined_creates += 1;
    }

    #[inline]
    pub fn record_departed(&mut self) {
        self.departed_entries += 1;
    }

    #[inline]
    pub fn record_overlap(&mut self, indices: u64) {
        self.untouched_overlap += indices;
    }

    pub fn snapshot(&self) -> RangeMetricsSnapshot {
        RangeMetricsSnapshot {
            set_range_calls: self.set_range_calls,
            created_entries: self.created_entries,
            declined_creates: self.declined_creates,
            departed_entries: self.departed_entries,
            untouched_overlap: self.untouched_overlap,
        }
    }
}

/// Copyable view of [`RangeMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeMetricsSnapshot {
    pub set_range_calls: u64,
    pub created_entries: u64,
    pub declined_creates: u64,
    pub departed_entries: u64,
    pub untouched_overlap: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_increments() {
        let cell = MetricsCell::new();
        cell.incr();
        cell.incr();
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn indexed_snapshot_reflects_recorded_calls() {
        let mut metrics = IndexedMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_insert_new();
        metrics.record_insert_update();
        metrics.record_dequeue_hit();
        metrics.record_dequeue_miss();

        let snap = metrics.snapshot();
        assert_eq!(snap.get_calls, 2);
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 1);
        assert_eq!(snap.insert_calls, 2);
        assert_eq!(snap.dequeue_calls, 2);
        assert_eq!(snap.dequeue_hits, 1);
    }

    #[test]
    fn range_snapshot_accumulates_overlap() {
        let mut metrics = RangeMetrics::default();
        metrics.record_set_range();
        metrics.record_overlap(5);
        metrics.record_set_range();
        metrics.record_overlap(3);

        let snap = metrics.snapshot();
        assert_eq!(snap.set_range_calls, 2);
        assert_eq!(snap.untouched_overlap, 8);
    }
}
