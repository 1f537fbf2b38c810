//! Always-miss source

use serde_json::Value;

use super::traits::{metadata_of, Context, Source, SourceMetadata, SourceResult};

/// A source that supports every key and never has a value
///
/// Useful for exercising fallback and as an explicit "disabled" slot in a
/// chain.
#[derive(Debug, Clone)]
pub struct NullSource {
    name: String,
}

impl Default for NullSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NullSource {
    /// Create a null source named "null"
    pub fn new() -> Self {
        Self::named("null")
    }

    /// Create a null source with a custom name
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Source for NullSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, _key: &str, _context: &Context) -> SourceResult<Option<Value>> {
        Ok(None)
    }

    fn metadata(&self) -> SourceMetadata {
        metadata_of("null", &self.name)
    }
}
