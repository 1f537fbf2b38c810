//! Synchronous event dispatch

use std::sync::Arc;

use parking_lot::RwLock;

use super::types::{ResolutionFailed, SourceQueried, ValueResolved};

/// Event listener callback
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    source_queried: RwLock<Vec<Listener<SourceQueried>>>,
    resolved: RwLock<Vec<Listener<ValueResolved>>>,
    failed: RwLock<Vec<Listener<ResolutionFailed>>>,
}

/// Dispatches resolution events to registered listeners
///
/// Listeners of each kind run in registration order, synchronously, inside
/// the resolution call that produced the event. Cloning the bus yields a
/// handle to the same listener set.
///
/// # Example
///
/// ```
/// use cascade_core::events::EventBus;
///
/// let bus = EventBus::new();
/// bus.on_failed(|event| eprintln!("no value for {}", event.key));
/// assert_eq!(bus.listener_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Arc<Listeners>,
}

impl EventBus {
    /// Create a bus with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every source query
    pub fn on_source_queried<F>(&self, listener: F)
    where
        F: Fn(&SourceQueried) + Send + Sync + 'static,
    {
        self.listeners.source_queried.write().push(Arc::new(listener));
    }

    /// Register a listener for successful resolutions
    pub fn on_resolved<F>(&self, listener: F)
    where
        F: Fn(&ValueResolved) + Send + Sync + 'static,
    {
        self.listeners.resolved.write().push(Arc::new(listener));
    }

    /// Register a listener for failed resolutions
    pub fn on_failed<F>(&self, listener: F)
    where
        F: Fn(&ResolutionFailed) + Send + Sync + 'static,
    {
        self.listeners.failed.write().push(Arc::new(listener));
    }

    /// Total listeners across all event kinds
    pub fn listener_count(&self) -> usize {
        self.listeners.source_queried.read().len()
            + self.listeners.resolved.read().len()
            + self.listeners.failed.read().len()
    }

    /// Remove every listener
    pub fn clear(&self) {
        self.listeners.source_queried.write().clear();
        self.listeners.resolved.write().clear();
        self.listeners.failed.write().clear();
    }

    pub(crate) fn emit_source_queried(&self, event: &SourceQueried) {
        dispatch(&self.listeners.source_queried, event);
    }

    pub(crate) fn emit_resolved(&self, event: &ValueResolved) {
        dispatch(&self.listeners.resolved, event);
    }

    pub(crate) fn emit_failed(&self, event: &ResolutionFailed) {
        dispatch(&self.listeners.failed, event);
    }

    /// Whether anyone listens for source queries
    pub(crate) fn wants_source_queried(&self) -> bool {
        !self.listeners.source_queried.read().is_empty()
    }
}

// Snapshot first so a listener may register further listeners without
// deadlocking on the list it is being called from.
fn dispatch<E>(list: &RwLock<Vec<Listener<E>>>, event: &E) {
    let snapshot: Vec<Listener<E>> = list.read().clone();
    for listener in snapshot {
        listener(event);
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("source_queried", &self.listeners.source_queried.read().len())
            .field("resolved", &self.listeners.resolved.read().len())
            .field("failed", &self.listeners.failed.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::time::SystemTime;

    #[test]
    fn test_listeners_run_in_registration_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = seen.clone();
            bus.on_resolved(move |event| seen.lock().push(format!("{}:{}", tag, event.key)));
        }

        bus.emit_resolved(&ValueResolved {
            key: "k".to_string(),
            value: json!(1),
            source_name: "s".to_string(),
            duration_ms: 0.0,
        });

        assert_eq!(*seen.lock(), vec!["first:k", "second:k", "third:k"]);
    }

    #[test]
    fn test_event_kinds_are_separate() {
        let bus = EventBus::new();
        let failed = Arc::new(Mutex::new(0));
        let counter = failed.clone();
        bus.on_failed(move |_| *counter.lock() += 1);

        bus.emit_source_queried(&SourceQueried {
            key: "k".to_string(),
            source_name: "s".to_string(),
            timestamp: SystemTime::now(),
        });
        assert_eq!(*failed.lock(), 0);

        bus.emit_failed(&ResolutionFailed {
            key: "k".to_string(),
            attempted_sources: vec!["s".to_string()],
        });
        assert_eq!(*failed.lock(), 1);
    }

    #[test]
    fn test_clones_share_listeners() {
        let bus = EventBus::new();
        let clone = bus.clone();
        clone.on_source_queried(|_| {});
        assert_eq!(bus.listener_count(), 1);
        assert!(bus.wants_source_queried());

        bus.clear();
        assert_eq!(clone.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_register_listener() {
        let bus = EventBus::new();
        let inner = bus.clone();
        bus.on_failed(move |_| inner.on_failed(|_| {}));

        bus.emit_failed(&ResolutionFailed {
            key: "k".to_string(),
            attempted_sources: vec![],
        });
        assert_eq!(bus.listener_count(), 2);
    }
}
