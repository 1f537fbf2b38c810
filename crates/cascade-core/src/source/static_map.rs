//! Static key/value source

use std::collections::HashMap;

use serde_json::Value;

use super::traits::{metadata_of, present, Context, Source, SourceMetadata, SourceResult};

/// A source backed by a fixed map
///
/// Typically used for defaults at the bottom of a chain. A key mapped to
/// `null` reports absent, exactly like a missing key.
///
/// # Example
///
/// ```
/// use cascade_core::source::{Context, Source, StaticMapSource};
/// use serde_json::json;
///
/// let defaults = StaticMapSource::from_pairs("defaults", [("theme", json!("dark"))]);
/// assert_eq!(defaults.get("theme", &Context::new()).unwrap(), Some(json!("dark")));
/// assert_eq!(defaults.get("missing", &Context::new()).unwrap(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMapSource {
    name: String,
    values: HashMap<String, Value>,
}

impl StaticMapSource {
    /// Create an empty static source
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Create a static source with initial values
    pub fn with_values(name: impl Into<String>, values: HashMap<String, Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Create a static source from key/value pairs
    pub fn from_pairs<K, I>(name: impl Into<String>, pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self {
            name: name.into(),
            values: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Add a value (builder style)
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Get the number of stored keys (null entries included)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Source for StaticMapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str, _context: &Context) -> SourceResult<Option<Value>> {
        Ok(present(self.values.get(key).cloned()))
    }

    fn metadata(&self) -> SourceMetadata {
        let mut meta = metadata_of("static", &self.name);
        meta.insert("keys".to_string(), Value::from(self.values.len()));
        meta
    }
}
