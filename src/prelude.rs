pub use crate::error::{ConfigError, InvariantError};
pub use crate::indexed::IndexedCache;
pub use crate::pool::{RecyclePool, DEFAULT_POOL_SIZE};
pub use crate::range::ActiveRangeCache;

#[cfg(feature = "metrics")]
pub use crate::metrics::{IndexedMetricsSnapshot, RangeMetricsSnapshot};
