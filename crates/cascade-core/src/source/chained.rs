//! Composite source with fallback behavior

use serde_json::Value;

use super::traits::{
    metadata_of, present, Context, SharedSource, Source, SourceMetadata, SourceResult,
};

/// A source that chains child sources together with fallback behavior
///
/// Children are tried in order; children that do not support the key are
/// skipped and the first present value wins. This lets a sub-chain be nested
/// inside another chain as a single named unit.
///
/// # Example
///
/// ```
/// use cascade_core::source::{ChainedSource, Context, NullSource, Source, StaticMapSource};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let overrides = ChainedSource::new("overrides", vec![
///     Arc::new(NullSource::new()),
///     Arc::new(StaticMapSource::new("local").with("key", json!("v"))),
/// ]);
///
/// assert_eq!(overrides.get("key", &Context::new()).unwrap(), Some(json!("v")));
/// ```
pub struct ChainedSource {
    name: String,
    sources: Vec<SharedSource>,
}

impl ChainedSource {
    /// Create a chained source; an empty chain is valid and always misses
    pub fn new(name: impl Into<String>, sources: Vec<SharedSource>) -> Self {
        Self {
            name: name.into(),
            sources,
        }
    }

    /// Append a child (builder style)
    pub fn with_source(mut self, source: SharedSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Get the children in this chain
    pub fn sources(&self) -> &[SharedSource] {
        &self.sources
    }

    /// First supporting child with a value for `key`, and that value
    pub fn find_source(
        &self,
        key: &str,
        context: &Context,
    ) -> SourceResult<Option<(&SharedSource, Value)>> {
        for source in &self.sources {
            if !source.supports(key, context) {
                continue;
            }
            if let Some(value) = present(source.get(key, context)?) {
                return Ok(Some((source, value)));
            }
        }
        Ok(None)
    }
}

impl Source for ChainedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, key: &str, context: &Context) -> bool {
        self.sources.iter().any(|s| s.supports(key, context))
    }

    fn get(&self, key: &str, context: &Context) -> SourceResult<Option<Value>> {
        match self.find_source(key, context)? {
            Some((source, value)) => {
                tracing::trace!(key, chain = %self.name, child = %source.name(), "chained source answered");
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn metadata(&self) -> SourceMetadata {
        let mut meta = metadata_of("chained", &self.name);
        let children = self
            .sources
            .iter()
            .map(|s| Value::String(s.name().to_string()))
            .collect();
        meta.insert("sources".to_string(), Value::Array(children));
        meta
    }
}

// Implement Debug manually since Arc<dyn Source> doesn't implement Debug
impl std::fmt::Debug for ChainedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainedSource")
            .field("name", &self.name)
            .field("sources", &format!("[{} sources]", self.sources.len()))
            .finish()
    }
}
