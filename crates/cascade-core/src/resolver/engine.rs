//! The short-circuit resolution algorithm

use std::borrow::Cow;
use std::time::{Instant, SystemTime};

use serde_json::Value;

use crate::error::CascadeResult;
use crate::events::{EventBus, ResolutionFailed, SourceQueried, ValueResolved};
use crate::source::{present, Context, SharedSource};

use super::priority::SourceQueue;
use super::result::{Resolution, ResolutionAttempt};
use super::transform::{TransformerFn, TransformerPipeline};

/// Sources, transformers and default context of one resolution chain
///
/// Shared by anonymous conductors and named resolvers. Cloning is cheap:
/// sources and transformers are reference counted.
#[derive(Debug, Clone, Default)]
pub struct ResolutionChain {
    sources: SourceQueue,
    transformers: TransformerPipeline,
    context: Context,
}

impl ResolutionChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, source: SharedSource, priority: i32) {
        self.sources.push(source, priority);
    }

    pub fn add_transformer(&mut self, transformer: TransformerFn) {
        self.transformers.push(transformer);
    }

    /// Merge entries into the default context
    pub fn extend_context(&mut self, context: Context) {
        self.context.extend(context);
    }

    pub fn sources(&self) -> &SourceQueue {
        &self.sources
    }

    pub fn transformers(&self) -> &TransformerPipeline {
        &self.transformers
    }

    /// Default context passed to every source
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Resolve `key`, with `context` layered over the chain's default context
    pub fn attempt(
        &self,
        key: &str,
        context: &Context,
        events: &EventBus,
    ) -> CascadeResult<ResolutionAttempt> {
        let merged = layer_context(&self.context, context);
        resolve_chain(key, &merged, &self.sources, &self.transformers, events)
    }
}

/// Overlay `top` onto `base`; entries in `top` win
pub(crate) fn layer_context<'a>(base: &'a Context, top: &'a Context) -> Cow<'a, Context> {
    if base.is_empty() {
        return Cow::Borrowed(top);
    }
    if top.is_empty() {
        return Cow::Borrowed(base);
    }
    let mut merged = base.clone();
    merged.extend(top.iter().map(|(k, v)| (k.clone(), v.clone())));
    Cow::Owned(merged)
}

/// Query `sources` in order until one yields a non-null value
///
/// Every consulted source gets a `SourceQueried` event, including sources
/// skipped because they do not support the key. The first present value runs
/// through `transformers` and ends the scan with a `ValueResolved` event;
/// exhausting the queue emits `ResolutionFailed`.
///
/// A source fault aborts the scan and is returned as-is. No further events
/// are emitted for that call.
pub fn resolve_chain(
    key: &str,
    context: &Context,
    sources: &SourceQueue,
    transformers: &TransformerPipeline,
    events: &EventBus,
) -> CascadeResult<ResolutionAttempt> {
    let started = Instant::now();
    let mut attempted = Vec::with_capacity(sources.len());

    for entry in sources.iter() {
        let source = &entry.source;
        let name = source.name();
        attempted.push(name.to_string());

        if events.wants_source_queried() {
            events.emit_source_queried(&SourceQueried {
                key: key.to_string(),
                source_name: name.to_string(),
                timestamp: SystemTime::now(),
            });
        }

        if !source.supports(key, context) {
            tracing::trace!(key, source = name, "source does not support key, skipping");
            continue;
        }

        let value = source.get(key, context).map_err(|err| {
            tracing::warn!(key, source = name, error = %err, "source failed");
            err
        })?;
        let Some(value) = present(value) else {
            tracing::trace!(key, source = name, "source miss");
            continue;
        };

        let value: Value = transformers.apply(value, source.as_ref());
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(key, source = name, duration_ms, "resolved");

        events.emit_resolved(&ValueResolved {
            key: key.to_string(),
            value: value.clone(),
            source_name: name.to_string(),
            duration_ms,
        });
        return Ok(ResolutionAttempt {
            resolution: Resolution::found(value, name),
            attempted_sources: attempted,
        });
    }

    tracing::debug!(key, attempted = ?attempted, "no source produced a value");
    events.emit_failed(&ResolutionFailed {
        key: key.to_string(),
        attempted_sources: attempted.clone(),
    });
    Ok(ResolutionAttempt {
        resolution: Resolution::not_found(),
        attempted_sources: attempted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CascadeError;
    use crate::source::{CallbackSource, NullSource, Source, SourceError, StaticMapSource};
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;

    fn shared<S: Source + 'static>(source: S) -> SharedSource {
        Arc::new(source)
    }

    fn queue(entries: Vec<(SharedSource, i32)>) -> SourceQueue {
        let mut queue = SourceQueue::new();
        for (source, priority) in entries {
            queue.push(source, priority);
        }
        queue
    }

    #[test]
    fn test_first_present_value_wins() {
        let sources = queue(vec![
            (shared(NullSource::new()), 0),
            (shared(StaticMapSource::new("a").with("k", json!("from-a"))), 1),
            (shared(StaticMapSource::new("b").with("k", json!("from-b"))), 2),
        ]);

        let attempt = resolve_chain(
            "k",
            &Context::new(),
            &sources,
            &TransformerPipeline::new(),
            &EventBus::new(),
        )
        .unwrap();

        assert_eq!(attempt.resolution, Resolution::found(json!("from-a"), "a"));
        assert_eq!(attempt.attempted_sources, vec!["null", "a"]);
    }

    #[test]
    fn test_exhausted_chain_reports_every_source() {
        let sources = queue(vec![
            (shared(NullSource::named("n1")), 0),
            (shared(CallbackSource::infallible("skip", |_, _| None).with_supports(|_, _| false)), 1),
            (shared(NullSource::named("n2")), 2),
        ]);

        let failures = Arc::new(Mutex::new(Vec::new()));
        let events = EventBus::new();
        let seen = failures.clone();
        events.on_failed(move |e| seen.lock().push(e.attempted_sources.clone()));

        let attempt = resolve_chain("k", &Context::new(), &sources, &TransformerPipeline::new(), &events)
            .unwrap();

        assert!(!attempt.resolution.is_found());
        assert_eq!(attempt.attempted_sources, vec!["n1", "skip", "n2"]);
        assert_eq!(*failures.lock(), vec![vec!["n1", "skip", "n2"]]);
    }

    #[test]
    fn test_source_error_aborts() {
        let sources = queue(vec![
            (shared(CallbackSource::new("db", |_, _| Err(SourceError::backend("db", "down")))), 0),
            (shared(StaticMapSource::new("defaults").with("k", json!(1))), 1),
        ]);

        let events = EventBus::new();
        let failed = Arc::new(Mutex::new(0));
        let counter = failed.clone();
        events.on_failed(move |_| *counter.lock() += 1);

        let err = resolve_chain("k", &Context::new(), &sources, &TransformerPipeline::new(), &events)
            .unwrap_err();
        assert!(matches!(err, CascadeError::Source(SourceError::Backend { .. })));
        assert_eq!(*failed.lock(), 0);
    }

    #[test]
    fn test_transformers_see_originating_source() {
        let sources = queue(vec![(shared(StaticMapSource::new("defaults").with("k", json!(1))), 0)]);
        let mut transformers = TransformerPipeline::new();
        transformers.push(Arc::new(|v: Value, source: &dyn Source| {
            json!(format!("{}@{}", v, source.name()))
        }));

        let attempt =
            resolve_chain("k", &Context::new(), &sources, &transformers, &EventBus::new()).unwrap();
        assert_eq!(attempt.resolution.value(), Some(&json!("1@defaults")));
    }

    #[test]
    fn test_chain_default_context_is_layered() {
        let mut chain = ResolutionChain::new();
        chain.add_source(
            Arc::new(CallbackSource::infallible("ctx", |_, ctx| {
                Some(json!({"env": ctx.get("env"), "tenant": ctx.get("tenant")}))
            })),
            0,
        );
        let mut defaults = Context::new();
        defaults.insert("env".to_string(), json!("prod"));
        defaults.insert("tenant".to_string(), json!("none"));
        chain.extend_context(defaults);

        let mut call = Context::new();
        call.insert("tenant".to_string(), json!("acme"));

        let attempt = chain.attempt("k", &call, &EventBus::new()).unwrap();
        assert_eq!(
            attempt.resolution.value(),
            Some(&json!({"env": "prod", "tenant": "acme"}))
        );
    }

    #[test]
    fn test_layer_context_borrows_when_possible() {
        let empty = Context::new();
        let mut full = Context::new();
        full.insert("a".to_string(), json!(1));

        assert!(matches!(layer_context(&empty, &full), Cow::Borrowed(_)));
        assert!(matches!(layer_context(&full, &empty), Cow::Borrowed(_)));
    }
}
