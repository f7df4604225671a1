//! Error types for the rangekit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache is driven before it is fully
//!   configured (e.g. a non-empty active range is set while no create
//!   callback is installed).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods, intended for tests and debugging).
//!
//! ## Example Usage
//!
//! ```
//! use rangekit::error::ConfigError;
//! use rangekit::range::ActiveRangeCache;
//!
//! // Setting a non-empty range with no create callback is a configuration
//! // error, surfaced before any mutation happens.
//! let mut cache: ActiveRangeCache<String> = ActiveRangeCache::new();
//! let err: Result<(), ConfigError> = cache.set_active_range(0..4);
//! assert!(err.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when a cache operation requires configuration that has not
/// been supplied.
///
/// Produced by [`ActiveRangeCache::set_active_range`](crate::range::ActiveRangeCache::set_active_range)
/// when a non-empty range is set before a create callback is installed.
/// Carries a human-readable description of what is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on cache types
/// (e.g. [`RecyclePool::check_invariants`](crate::pool::RecyclePool::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("create callback not configured");
        assert_eq!(err.to_string(), "create callback not configured");
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&ConfigError::new("e"));
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("pool length mismatch");
        assert_eq!(err.to_string(), "pool length mismatch");
    }

    #[test]
    fn invariant_debug_includes_message() {
        let err = InvariantError::new("empty bucket retained");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("empty bucket retained"));
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }
}
