//! Named, reusable resolution chains

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::resolver::{ResolutionChain, DEFAULT_PRIORITY};
use crate::source::{Context, SharedSource, Source};

/// A resolution chain registered under a name
///
/// Builder methods take `&self` so a resolver can be extended through the
/// shared handle returned by `define_resolver`. Resolution works on a
/// snapshot, so a chain edited mid-flight never affects a running call.
///
/// # Example
///
/// ```
/// use cascade_core::registry::ResolverRegistry;
/// use cascade_core::source::{NullSource, StaticMapSource};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let registry = ResolverRegistry::new();
/// registry
///     .define_resolver("flags")
///     .unwrap()
///     .from_source(Arc::new(NullSource::named("overrides")))
///     .add_source(Arc::new(StaticMapSource::new("defaults").with("beta", json!(false))), 100);
///
/// assert!(registry.has_resolver("flags"));
/// ```
pub struct NamedResolver {
    name: String,
    chain: RwLock<ResolutionChain>,
}

impl NamedResolver {
    pub(crate) fn new(name: impl Into<String>, chain: ResolutionChain) -> Self {
        Self {
            name: name.into(),
            chain: RwLock::new(chain),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a source at the default priority
    pub fn from_source(&self, source: SharedSource) -> &Self {
        self.add_source(source, DEFAULT_PRIORITY)
    }

    /// Append a fallback at the default priority
    pub fn fallback_to(&self, source: SharedSource) -> &Self {
        self.add_source(source, DEFAULT_PRIORITY)
    }

    /// Insert a source at an explicit priority
    pub fn add_source(&self, source: SharedSource, priority: i32) -> &Self {
        tracing::debug!(resolver = %self.name, source = source.name(), priority, "adding source");
        self.chain.write().add_source(source, priority);
        self
    }

    /// Append a transformer to the pipeline
    pub fn transform<F>(&self, transformer: F) -> &Self
    where
        F: Fn(Value, &dyn Source) -> Value + Send + Sync + 'static,
    {
        self.chain.write().add_transformer(Arc::new(transformer));
        self
    }

    /// Merge entries into the resolver's default context
    pub fn with_context(&self, context: Context) -> &Self {
        self.chain.write().extend_context(context);
        self
    }

    /// Set one default context entry
    pub fn with_context_value(&self, key: impl Into<String>, value: Value) -> &Self {
        self.chain.write().extend_context(Context::from([(key.into(), value)]));
        self
    }

    /// Source names in query order
    pub fn source_names(&self) -> Vec<String> {
        self.chain.read().sources().names()
    }

    pub fn transformer_count(&self) -> usize {
        self.chain.read().transformers().len()
    }

    /// Copy of the current chain
    pub fn snapshot(&self) -> ResolutionChain {
        self.chain.read().clone()
    }
}

impl std::fmt::Debug for NamedResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let chain = self.chain.read();
        f.debug_struct("NamedResolver")
            .field("name", &self.name)
            .field("sources", &chain.sources().names())
            .field("transformers", &chain.transformers().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{NullSource, StaticMapSource};
    use serde_json::json;

    #[test]
    fn test_builder_through_shared_handle() {
        let resolver = Arc::new(NamedResolver::new("r", ResolutionChain::new()));
        resolver
            .fallback_to(Arc::new(StaticMapSource::new("defaults")))
            .add_source(Arc::new(NullSource::named("override")), -1)
            .transform(|v, _| v)
            .with_context_value("env", json!("test"));

        assert_eq!(resolver.source_names(), vec!["override", "defaults"]);
        assert_eq!(resolver.transformer_count(), 1);
        assert_eq!(resolver.snapshot().context().get("env"), Some(&json!("test")));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let resolver = NamedResolver::new("r", ResolutionChain::new());
        let before = resolver.snapshot();
        resolver.from_source(Arc::new(NullSource::new()));

        assert!(before.sources().is_empty());
        assert_eq!(resolver.snapshot().sources().len(), 1);
    }
}
