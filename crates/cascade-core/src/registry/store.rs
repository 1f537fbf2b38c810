//! Registry of named resolvers

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::{CascadeSettings, DuplicatePolicy, SuggestionSettings};
use crate::error::{CascadeError, CascadeResult};
use crate::events::{EventBus, ResolutionFailed, SourceQueried, ValueResolved};
use crate::logging::TracingListener;
use crate::resolver::ResolutionChain;

use super::conductor::ResolutionConductor;
use super::named::NamedResolver;
use super::suggest::suggest_names;

struct RegistryInner {
    resolvers: RwLock<HashMap<String, Arc<NamedResolver>>>,
    events: EventBus,
    duplicate_policy: DuplicatePolicy,
    suggestions: SuggestionSettings,
}

/// Registry of named resolvers
///
/// Owned by the composing application and passed around by handle; cloning
/// the registry shares the same resolvers and event bus. Registration and
/// lookup are guarded by a read-write lock.
///
/// # Example
///
/// ```
/// use cascade_core::registry::ResolverRegistry;
/// use cascade_core::resolver::Resolve;
/// use cascade_core::source::StaticMapSource;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let registry = ResolverRegistry::new();
/// registry
///     .define_resolver("limits")
///     .unwrap()
///     .from_source(Arc::new(StaticMapSource::new("defaults").with("max_users", json!(10))));
///
/// let limits = registry.using("limits").unwrap();
/// assert_eq!(limits.get("max_users").unwrap(), Some(json!(10)));
///
/// let err = registry.using("limtis").unwrap_err();
/// assert_eq!(err.suggestions(), ["limits".to_string()]);
/// ```
#[derive(Clone)]
pub struct ResolverRegistry {
    inner: Arc<RegistryInner>,
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverRegistry {
    /// Create a registry with default settings
    pub fn new() -> Self {
        Self::build(DuplicatePolicy::default(), SuggestionSettings::default(), EventBus::new())
    }

    /// Create a registry from settings
    ///
    /// Attaches a `TracingListener` when `logging.events` is enabled.
    pub fn with_settings(settings: &CascadeSettings) -> Self {
        let events = EventBus::new();
        if settings.logging.events {
            tracing::debug!(level = %settings.logging.level, "logging resolution events");
            TracingListener::new(settings.logging.level).attach(&events);
        }
        Self::build(
            settings.registry.duplicate_policy,
            settings.suggestions.clone(),
            events,
        )
    }

    fn build(duplicate_policy: DuplicatePolicy, suggestions: SuggestionSettings, events: EventBus) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                resolvers: RwLock::new(HashMap::new()),
                events,
                duplicate_policy,
                suggestions,
            }),
        }
    }

    /// Register a new, empty resolver and return its builder handle
    ///
    /// Under `DuplicatePolicy::Overwrite` an existing resolver of the same
    /// name is replaced; conductors already holding the old one keep it.
    pub fn define_resolver(&self, name: impl Into<String>) -> CascadeResult<Arc<NamedResolver>> {
        self.register_chain(name, ResolutionChain::new())
    }

    /// Register a prepared chain under `name`
    pub fn register_chain(
        &self,
        name: impl Into<String>,
        chain: ResolutionChain,
    ) -> CascadeResult<Arc<NamedResolver>> {
        let name = name.into();
        let mut resolvers = self.inner.resolvers.write();

        if resolvers.contains_key(&name) {
            match self.inner.duplicate_policy {
                DuplicatePolicy::Reject => {
                    tracing::warn!(resolver = %name, "rejecting duplicate resolver definition");
                    return Err(CascadeError::ResolverExists(name));
                }
                DuplicatePolicy::Overwrite => {
                    tracing::debug!(resolver = %name, "replacing existing resolver");
                }
            }
        }

        let resolver = Arc::new(NamedResolver::new(name.clone(), chain));
        resolvers.insert(name, resolver.clone());
        Ok(resolver)
    }

    /// Check if a resolver is registered
    pub fn has_resolver(&self, name: &str) -> bool {
        self.inner.resolvers.read().contains_key(name)
    }

    /// Get a resolver's builder handle
    pub fn resolver(&self, name: &str) -> Option<Arc<NamedResolver>> {
        self.inner.resolvers.read().get(name).cloned()
    }

    /// Select a resolver for resolution
    ///
    /// Unknown names yield `ResolverNotFound` with the nearest registered
    /// names as suggestions.
    pub fn using(&self, name: &str) -> CascadeResult<ResolutionConductor> {
        let resolvers = self.inner.resolvers.read();
        match resolvers.get(name) {
            Some(resolver) => Ok(ResolutionConductor::new(resolver.clone(), self.inner.events.clone())),
            None => {
                let suggestions = suggest_names(
                    name,
                    resolvers.keys().map(String::as_str),
                    &self.inner.suggestions,
                );
                tracing::debug!(resolver = %name, ?suggestions, "unknown resolver");
                Err(CascadeError::resolver_not_found(name, suggestions))
            }
        }
    }

    /// Registered names, sorted
    pub fn resolver_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.resolvers.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Unregister a resolver
    pub fn remove_resolver(&self, name: &str) -> bool {
        self.inner.resolvers.write().remove(name).is_some()
    }

    /// Unregister every resolver; listeners stay attached
    pub fn clear(&self) {
        self.inner.resolvers.write().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.resolvers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.inner.duplicate_policy
    }

    /// Bus shared by every conductor this registry hands out
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    pub fn on_source_queried<F>(&self, listener: F)
    where
        F: Fn(&SourceQueried) + Send + Sync + 'static,
    {
        self.inner.events.on_source_queried(listener);
    }

    pub fn on_resolved<F>(&self, listener: F)
    where
        F: Fn(&ValueResolved) + Send + Sync + 'static,
    {
        self.inner.events.on_resolved(listener);
    }

    pub fn on_failed<F>(&self, listener: F)
    where
        F: Fn(&ResolutionFailed) + Send + Sync + 'static,
    {
        self.inner.events.on_failed(listener);
    }
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("resolvers", &self.resolver_names())
            .field("duplicate_policy", &self.inner.duplicate_policy)
            .field("events", &self.inner.events)
            .finish()
    }
}
