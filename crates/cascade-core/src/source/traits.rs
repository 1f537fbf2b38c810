//! Core traits and types for value sources

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

/// Ambient key/value data passed to every source alongside the key
///
/// A `BTreeMap` keeps serialization order stable, which the cache decorator
/// relies on when hashing contexts into cache keys.
pub type Context = BTreeMap<String, Value>;

/// Descriptive metadata reported by a source (diagnostics only)
pub type SourceMetadata = Map<String, Value>;

/// Errors raised by a source implementation
///
/// These are faults, not misses. A source signals "no value" by returning
/// `Ok(None)`; anything returned here aborts the current resolution call.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Source '{source_name}' failed: {message}")]
    Backend {
        source_name: String,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Source error: {0}")]
    Other(String),
}

impl SourceError {
    /// Create a backend failure attributed to a named source
    pub fn backend(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Trait for value providers
///
/// Implementations:
/// - Static maps (`StaticMapSource`)
/// - Closures (`CallbackSource`)
/// - Always-miss placeholder (`NullSource`)
/// - Cache decorator over another source (`CachedSource`)
/// - Composite sub-chains (`ChainedSource`)
/// - Custom implementations (database, remote flags service, etc.)
///
/// Sources must not mutate shared state from `get` (an explicit cache is the
/// one exception), which is what makes sharing one instance between several
/// chains and threads safe.
///
/// # Example
///
/// ```
/// use cascade_core::source::{Context, Source, StaticMapSource};
/// use serde_json::json;
///
/// let source = StaticMapSource::new("defaults").with("timeout", json!(30));
/// assert_eq!(source.get("timeout", &Context::new()).unwrap(), Some(json!(30)));
/// ```
pub trait Source: Send + Sync {
    /// Name reported in resolutions and events
    fn name(&self) -> &str;

    /// Whether this source can answer for `key` in `context`
    ///
    /// Sources returning `false` are skipped without calling `get`.
    fn supports(&self, _key: &str, _context: &Context) -> bool {
        true
    }

    /// Look up a value
    ///
    /// `Ok(None)` means absent. A JSON `null` is treated the same as absent by
    /// the resolution engine.
    fn get(&self, key: &str, context: &Context) -> SourceResult<Option<Value>>;

    /// Diagnostic metadata, at least `{"type": ...}`
    fn metadata(&self) -> SourceMetadata {
        let mut meta = SourceMetadata::new();
        meta.insert("type".to_string(), Value::String("custom".to_string()));
        meta.insert("name".to_string(), Value::String(self.name().to_string()));
        meta
    }
}

/// Type alias for a shareable source
pub type SharedSource = Arc<dyn Source>;

/// Drop JSON nulls so "stored null" and "missing" look the same
pub(crate) fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

pub(crate) fn metadata_of(kind: &str, name: &str) -> SourceMetadata {
    let mut meta = SourceMetadata::new();
    meta.insert("type".to_string(), Value::String(kind.to_string()));
    meta.insert("name".to_string(), Value::String(name.to_string()));
    meta
}
