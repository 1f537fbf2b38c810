//! Cache backend contract consumed by `CachedSource`

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

/// Minimal cache contract
///
/// The resolution core only needs these five operations. Implementations
/// shared between threads must be safe for concurrent use; the core does not
/// add any locking around them.
pub trait Cache: Send + Sync {
    /// Fetch a cached value, `None` on miss or expiry
    fn get(&self, key: &str) -> Option<Value>;

    /// Store a value; `ttl == None` means no expiry
    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> bool;

    /// Check if a live entry exists
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove an entry, returning whether one existed
    fn delete(&self, key: &str) -> bool;

    /// Remove every entry
    fn clear(&self) -> bool;
}

/// Type alias for a shareable cache handle
pub type SharedCache = Arc<dyn Cache>;
