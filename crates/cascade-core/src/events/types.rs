//! Event records emitted during resolution

use std::time::SystemTime;

use serde::Serialize;
use serde_json::Value;

/// A source is about to be consulted for a key
///
/// Fired for every source in query order, including sources that end up
/// skipped because they do not support the key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceQueried {
    pub key: String,
    pub source_name: String,
    pub timestamp: SystemTime,
}

/// A key resolved to a value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueResolved {
    pub key: String,
    /// Value after the transformer pipeline ran
    pub value: Value,
    pub source_name: String,
    /// Wall time from the first query to the end of the pipeline
    pub duration_ms: f64,
}

/// No source produced a value for a key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionFailed {
    pub key: String,
    /// Every source consulted, in query order
    pub attempted_sources: Vec<String>,
}
