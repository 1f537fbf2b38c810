//! Priority-ordered source list

use crate::source::SharedSource;

/// Priority used when none is given
pub const DEFAULT_PRIORITY: i32 = 0;

/// A source with its priority; lower priorities are queried first
#[derive(Clone)]
pub struct PrioritizedSource {
    pub source: SharedSource,
    pub priority: i32,
}

impl std::fmt::Debug for PrioritizedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrioritizedSource")
            .field("source", &self.source.name())
            .field("priority", &self.priority)
            .finish()
    }
}

/// Sources sorted ascending by priority
///
/// Ties keep insertion order. The list is re-sorted on every insert and is
/// never touched by resolution itself.
#[derive(Debug, Clone, Default)]
pub struct SourceQueue {
    entries: Vec<PrioritizedSource>,
}

impl SourceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a source, keeping the queue sorted
    pub fn push(&mut self, source: SharedSource, priority: i32) {
        self.entries.push(PrioritizedSource { source, priority });
        // stable: equal priorities stay in insertion order
        self.entries.sort_by_key(|entry| entry.priority);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrioritizedSource> {
        self.entries.iter()
    }

    /// Source names in query order
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.source.name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
