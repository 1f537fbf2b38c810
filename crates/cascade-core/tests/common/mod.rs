//! Shared test sources

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cascade_core::source::{Context, Source, SourceError, SourceResult};
use serde_json::Value;

/// Returns a fixed answer and counts `get` calls
pub struct CountingSource {
    name: String,
    answer: Option<Value>,
    calls: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(name: &str, answer: Option<Value>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Self {
            name: name.to_string(),
            answer,
            calls: calls.clone(),
        };
        (source, calls)
    }
}

impl Source for CountingSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, _key: &str, _context: &Context) -> SourceResult<Option<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}

/// Fails every `get`; optionally claims not to support any key
pub struct FailingSource {
    name: String,
    supports: bool,
}

impl FailingSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            supports: true,
        }
    }

    pub fn unsupported(name: &str) -> Self {
        Self {
            name: name.to_string(),
            supports: false,
        }
    }
}

impl Source for FailingSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, _key: &str, _context: &Context) -> bool {
        self.supports
    }

    fn get(&self, _key: &str, _context: &Context) -> SourceResult<Option<Value>> {
        Err(SourceError::backend(&self.name, "queried"))
    }
}

pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

/// Route engine logs to the test writer when RUST_LOG is set
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
