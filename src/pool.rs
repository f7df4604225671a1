//! Identifier-keyed recycle pool with a soft size cap.
//!
//! Payloads evicted from active use are parked here under a caller-chosen
//! string identifier and handed back out on request, so expensive objects
//! (views, buffers, decoded pages) are reused instead of rebuilt.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                      RecyclePool<V>                           │
//! │                                                               │
//! │   buckets: FxHashMap<String, Vec<V>>        total: usize      │
//! │                                                               │
//! │   "thumbnail" → [ v0, v1, v2 ]   ← push/pop at the tail       │
//! │   "page"      → [ v3 ]             (LIFO within a bucket)     │
//! │                                                               │
//! │   admit: refused when norecycle is set or total >= size       │
//! │   dequeue: pops the most recently admitted payload            │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation   | Time   | Notes                                    |
//! |-------------|--------|------------------------------------------|
//! | `admit`     | O(1)*  | *Amortized; may refuse (payload dropped) |
//! | `dequeue`   | O(1)   | LIFO pop from the identifier's bucket    |
//! | `clean`     | O(n)   | Drops every pooled payload               |
//! | `len`       | O(1)   | Maintained counter across all buckets    |
//!
//! ## Admission Policy
//!
//! `size` is a soft cap enforced at admission time: once the pool holds
//! `size` payloads, further offers are refused and the offered payload is
//! dropped. The pool never truncates itself after the fact — shrinking
//! `size` below the current population only stops new admissions.
//!
//! ## Reuse Order
//!
//! Within a bucket, `dequeue` returns the most recently admitted payload
//! first (LIFO). Warm objects come back before cold ones.
//!
//! ## Thread Safety
//!
//! Single-threaded. Callers needing concurrent access must provide their own
//! synchronization around the owning cache.

use rustc_hash::FxHashMap;

use crate::error::InvariantError;

/// Default soft cap on the total pooled payload count.
pub const DEFAULT_POOL_SIZE: usize = 4;

/// A bounded pool of recyclable payloads, keyed by identifier.
///
/// # Example
///
/// ```
/// use rangekit::pool::RecyclePool;
///
/// let mut pool: RecyclePool<String> = RecyclePool::new();
///
/// assert!(pool.admit("page", "first".to_string()));
/// assert!(pool.admit("page", "second".to_string()));
///
/// // LIFO: the most recently admitted payload comes back first.
/// assert_eq!(pool.dequeue("page").as_deref(), Some("second"));
/// assert_eq!(pool.dequeue("page").as_deref(), Some("first"));
/// assert_eq!(pool.dequeue("page"), None);
/// ```
pub struct RecyclePool<V> {
    buckets: FxHashMap<String, Vec<V>>,
    /// Total payload count across all buckets. Kept in sync so `len` is O(1).
    total: usize,
    size: usize,
    norecycle: bool,
}

impl<V> RecyclePool<V> {
    /// Creates an empty pool with the default size cap.
    #[inline]
    pub fn new() -> Self {
        Self::with_size(DEFAULT_POOL_SIZE)
    }

    /// Creates an empty pool with the given soft size cap.
    #[inline]
    pub fn with_size(size: usize) -> Self {
        Self {
            buckets: FxHashMap::default(),
            total: 0,
            size,
            norecycle: false,
        }
    }

    /// Returns the total number of pooled payloads across all identifiers.
    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    /// Returns `true` if no payloads are pooled.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Returns the soft size cap.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sets the soft size cap.
    ///
    /// Lowering the cap below the current population does not evict anything;
    /// it only refuses new admissions until `dequeue`/`clean` make room.
    #[inline]
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Returns `true` if admission is suspended.
    #[inline]
    pub fn norecycle(&self) -> bool {
        self.norecycle
    }

    /// Suspends or resumes admission. While suspended, every offered payload
    /// is dropped. Already-pooled payloads stay available for `dequeue`.
    #[inline]
    pub fn set_norecycle(&mut self, norecycle: bool) {
        self.norecycle = norecycle;
    }

    /// Offers a payload to the pool under `identifier`.
    ///
    /// Returns `true` if the payload was pooled. Returns `false` — dropping
    /// the payload — when admission is suspended or the pool is at its size
    /// cap.
    pub fn admit(&mut self, identifier: &str, payload: V) -> bool {
        if self.norecycle || self.total >= self.size {
            return false;
        }
        match self.buckets.get_mut(identifier) {
            Some(bucket) => bucket.push(payload),
            None => {
                self.buckets.insert(identifier.to_owned(), vec![payload]);
            },
        }
        self.total += 1;

        #[cfg(debug_assertions)]
        self.validate_invariants();

        true
    }

    /// Pops the most recently admitted payload under `identifier`.
    ///
    /// Returns `None` for an unknown identifier or an exhausted bucket.
    pub fn dequeue(&mut self, identifier: &str) -> Option<V> {
        let bucket = self.buckets.get_mut(identifier)?;
        let payload = bucket.pop()?;
        if bucket.is_empty() {
            self.buckets.remove(identifier);
        }
        self.total -= 1;

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Some(payload)
    }

    /// Drops every pooled payload. The size cap and `norecycle` flag are
    /// unchanged.
    pub fn clean(&mut self) {
        self.buckets.clear();
        self.total = 0;
    }

    /// Checks internal invariants, returning a description of the first
    /// violation found.
    ///
    /// Intended for tests and debugging; mutating operations run this
    /// automatically when debug assertions are enabled.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let counted: usize = self.buckets.values().map(Vec::len).sum();
        if counted != self.total {
            return Err(InvariantError::new(format!(
                "pool length counter {} does not match bucket contents {}",
                self.total, counted
            )));
        }
        for (identifier, bucket) in &self.buckets {
            if bucket.is_empty() {
                return Err(InvariantError::new(format!(
                    "empty bucket retained for identifier {identifier:?}"
                )));
            }
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("recycle pool invariant violated: {err}");
        }
    }
}

impl<V> Default for RecyclePool<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for RecyclePool<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecyclePool")
            .field("len", &self.total)
            .field("size", &self.size)
            .field("norecycle", &self.norecycle)
            .field("identifiers", &self.buckets.len())
            .finish_non_exhaustive()
    }
}
