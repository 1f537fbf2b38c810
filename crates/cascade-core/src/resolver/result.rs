//! Resolution outcome

use serde::Serialize;
use serde_json::Value;

/// Outcome of resolving one key
///
/// Either found (value and source name both present) or not found (both
/// absent). The constructors are the only way to build one, so a half-filled
/// resolution cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    found: bool,
    value: Option<Value>,
    source_name: Option<String>,
}

impl Resolution {
    /// A value produced by the named source
    pub fn found(value: Value, source_name: impl Into<String>) -> Self {
        Self {
            found: true,
            value: Some(value),
            source_name: Some(source_name.into()),
        }
    }

    /// No source produced a value
    pub fn not_found() -> Self {
        Self {
            found: false,
            value: None,
            source_name: None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.found
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Consume the resolution, keeping only the value
    pub fn into_value(self) -> Option<Value> {
        self.value
    }
}

/// A resolution plus the sources consulted to reach it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionAttempt {
    pub resolution: Resolution,
    /// Every source consulted, in query order
    pub attempted_sources: Vec<String>,
}
