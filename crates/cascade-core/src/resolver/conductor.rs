//! Builder for anonymous resolution chains

use std::sync::Arc;

use serde_json::Value;

use crate::error::CascadeResult;
use crate::events::{EventBus, ResolutionFailed, SourceQueried, ValueResolved};
use crate::registry::{NamedResolver, ResolverRegistry};
use crate::source::{Context, SharedSource, Source};

use super::engine::ResolutionChain;
use super::priority::{SourceQueue, DEFAULT_PRIORITY};
use super::resolve::Resolve;
use super::result::ResolutionAttempt;

/// Builds and runs a one-off resolution chain
///
/// `from_source` and `fallback_to` both insert at the default priority, so
/// without explicit priorities sources are queried in the order they were
/// added. `add_source` takes an explicit priority (lower runs first).
///
/// # Example
///
/// ```
/// use cascade_core::resolver::{Resolve, SourceConductor};
/// use cascade_core::source::{NullSource, StaticMapSource};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let conductor = SourceConductor::new()
///     .from_source(Arc::new(NullSource::named("local")))
///     .fallback_to(Arc::new(StaticMapSource::new("defaults").with("key", json!("value"))))
///     .transform(|v, _| json!(v.as_str().unwrap_or_default().to_uppercase()));
///
/// assert_eq!(conductor.get("key").unwrap(), Some(json!("VALUE")));
/// assert_eq!(conductor.get_or("other", json!("d")).unwrap(), json!("d"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SourceConductor {
    chain: ResolutionChain,
    events: EventBus,
}

impl SourceConductor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch events to an existing bus instead of a private one
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Start (or extend) the chain at the default priority
    pub fn from_source(self, source: SharedSource) -> Self {
        self.add_source(source, DEFAULT_PRIORITY)
    }

    /// Append a fallback at the default priority
    pub fn fallback_to(self, source: SharedSource) -> Self {
        self.add_source(source, DEFAULT_PRIORITY)
    }

    /// Insert a source at an explicit priority
    pub fn add_source(mut self, source: SharedSource, priority: i32) -> Self {
        self.chain.add_source(source, priority);
        self
    }

    /// Append a transformer to the pipeline
    pub fn transform<F>(mut self, transformer: F) -> Self
    where
        F: Fn(Value, &dyn Source) -> Value + Send + Sync + 'static,
    {
        self.chain.add_transformer(Arc::new(transformer));
        self
    }

    /// Merge entries into the default context
    pub fn with_context(mut self, context: Context) -> Self {
        self.chain.extend_context(context);
        self
    }

    /// Set one default context entry
    pub fn with_context_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.chain.extend_context(Context::from([(key.into(), value)]));
        self
    }

    pub fn on_source_queried<F>(self, listener: F) -> Self
    where
        F: Fn(&SourceQueried) + Send + Sync + 'static,
    {
        self.events.on_source_queried(listener);
        self
    }

    pub fn on_resolved<F>(self, listener: F) -> Self
    where
        F: Fn(&ValueResolved) + Send + Sync + 'static,
    {
        self.events.on_resolved(listener);
        self
    }

    pub fn on_failed<F>(self, listener: F) -> Self
    where
        F: Fn(&ResolutionFailed) + Send + Sync + 'static,
    {
        self.events.on_failed(listener);
        self
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn sources(&self) -> &SourceQueue {
        self.chain.sources()
    }

    /// Promote this chain to a named resolver in `registry`
    ///
    /// The registry's duplicate policy applies. The conductor's own listeners
    /// stay behind; named resolvers report to the registry's bus.
    pub fn as_named(
        self,
        name: impl Into<String>,
        registry: &ResolverRegistry,
    ) -> CascadeResult<Arc<NamedResolver>> {
        registry.register_chain(name, self.chain)
    }
}

impl Resolve for SourceConductor {
    fn attempt(&self, key: &str, context: &Context) -> CascadeResult<ResolutionAttempt> {
        self.chain.attempt(key, context, &self.events)
    }
}
