//! rangekit: index-addressed caching with range-driven population and
//! payload recycling.
//!
//! Two layers: [`indexed::IndexedCache`] owns a sparse index→payload store
//! and an identifier-keyed [`pool::RecyclePool`]; [`range::ActiveRangeCache`]
//! adds a moving "active" index range and populates it on demand through a
//! caller-supplied create callback, recycling whatever falls out of range.
//!
//! ```
//! use rangekit::prelude::*;
//!
//! let mut cache: ActiveRangeCache<String> = ActiveRangeCache::new();
//! cache.set_create(|_, index| Some(format!("page {index}")));
//! cache.set_reclaim(|_, _| Some("page".to_string()));
//!
//! cache.set_active_range(0..3).unwrap();
//! assert_eq!(cache.get(2).map(String::as_str), Some("page 2"));
//!
//! // Sliding the range recycles 0..2 into the pool and creates 3..5.
//! cache.set_active_range(2..5).unwrap();
//! assert_eq!(cache.get(0), None);
//! assert_eq!(cache.dequeue_reusable("page").as_deref(), Some("page 1"));
//! ```
//!
//! The crate is single-threaded by contract: callers serialize all mutation.

pub mod error;
pub mod indexed;
pub mod pool;
pub mod range;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
