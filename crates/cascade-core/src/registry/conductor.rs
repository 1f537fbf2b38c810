//! Resolution through a named resolver

use std::sync::Arc;

use crate::error::CascadeResult;
use crate::events::EventBus;
use crate::resolver::{layer_context, Resolve, ResolutionAttempt};
use crate::source::Context;

use super::named::NamedResolver;
use super::subject::{derive_context, Subject};

/// Resolves keys with a named resolver's chain
///
/// Obtained from `ResolverRegistry::using`. Context layers, lowest to
/// highest: the resolver's default context, context bound to this conductor
/// (`for_subject` / `with_context`), then per-call context.
#[derive(Debug, Clone)]
pub struct ResolutionConductor {
    resolver: Arc<NamedResolver>,
    events: EventBus,
    context: Context,
}

impl ResolutionConductor {
    pub(crate) fn new(resolver: Arc<NamedResolver>, events: EventBus) -> Self {
        Self {
            resolver,
            events,
            context: Context::new(),
        }
    }

    /// Bind the context derived from `subject`
    pub fn for_subject(mut self, subject: &dyn Subject) -> Self {
        self.context.extend(derive_context(subject));
        self
    }

    /// Bind extra context entries
    pub fn with_context(mut self, context: Context) -> Self {
        self.context.extend(context);
        self
    }

    pub fn resolver_name(&self) -> &str {
        self.resolver.name()
    }

    /// Context bound to this conductor (excluding the resolver's defaults)
    pub fn context(&self) -> &Context {
        &self.context
    }
}

impl Resolve for ResolutionConductor {
    fn attempt(&self, key: &str, context: &Context) -> CascadeResult<ResolutionAttempt> {
        let chain = self.resolver.snapshot();
        let bound = layer_context(&self.context, context);
        tracing::trace!(resolver = %self.resolver.name(), key, "resolving");
        chain.attempt(key, &bound, &self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::HasIdentity;
    use crate::resolver::ResolutionChain;
    use crate::source::CallbackSource;
    use serde_json::{json, Value};

    struct User(u32);

    impl HasIdentity for User {
        fn identity(&self) -> Value {
            json!(self.0)
        }
    }

    impl Subject for User {
        fn as_identity(&self) -> Option<&dyn HasIdentity> {
            Some(self)
        }
    }

    fn echo_context() -> Arc<NamedResolver> {
        let resolver = NamedResolver::new("echo", ResolutionChain::new());
        resolver.from_source(Arc::new(CallbackSource::infallible("echo", |key, ctx| {
            ctx.get(key).cloned()
        })));
        Arc::new(resolver)
    }

    #[test]
    fn test_for_subject_binds_identity() {
        let conductor = ResolutionConductor::new(echo_context(), EventBus::new()).for_subject(&User(5));
        assert_eq!(conductor.get("user_id").unwrap(), Some(json!(5)));
        assert_eq!(conductor.resolver_name(), "echo");
    }

    #[test]
    fn test_context_layering() {
        let resolver = echo_context();
        resolver.with_context_value("env", json!("resolver-default"));
        resolver.with_context_value("region", json!("resolver-default"));

        let conductor = ResolutionConductor::new(resolver, EventBus::new())
            .with_context(Context::from([("region".to_string(), json!("bound"))]));

        assert_eq!(conductor.get("env").unwrap(), Some(json!("resolver-default")));
        assert_eq!(conductor.get("region").unwrap(), Some(json!("bound")));

        let call = Context::from([("region".to_string(), json!("call"))]);
        assert_eq!(conductor.get_with("region", &call).unwrap(), Some(json!("call")));
    }

    #[test]
    fn test_sees_sources_added_later() {
        let resolver = Arc::new(NamedResolver::new("late", ResolutionChain::new()));
        let conductor = ResolutionConductor::new(resolver.clone(), EventBus::new());
        assert_eq!(conductor.get("k").unwrap(), None);

        resolver.from_source(Arc::new(CallbackSource::infallible("s", |_, _| Some(json!(1)))));
        assert_eq!(conductor.get("k").unwrap(), Some(json!(1)));
    }
}
