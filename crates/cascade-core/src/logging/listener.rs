//! Event bus to `tracing` bridge

use tracing::Level;

use crate::events::EventBus;

use super::level::LogLevel;

// `tracing::event!` needs a constant level, hence one arm per level.
macro_rules! event_at {
    ($level:expr, $($rest:tt)*) => {
        match $level {
            LogLevel::Trace => tracing::event!(target: "cascade::events", Level::TRACE, $($rest)*),
            LogLevel::Debug => tracing::event!(target: "cascade::events", Level::DEBUG, $($rest)*),
            LogLevel::Info => tracing::event!(target: "cascade::events", Level::INFO, $($rest)*),
            LogLevel::Warn => tracing::event!(target: "cascade::events", Level::WARN, $($rest)*),
            LogLevel::Error => tracing::event!(target: "cascade::events", Level::ERROR, $($rest)*),
        }
    };
}

/// Writes resolution events to `tracing`
///
/// Source queries log one level below the configured level (floored at
/// TRACE). Resolutions log at the configured level. Failures log one level
/// above it, capped at WARN unless ERROR is configured.
///
/// # Example
///
/// ```
/// use cascade_core::events::EventBus;
/// use cascade_core::logging::{LogLevel, TracingListener};
///
/// let bus = EventBus::new();
/// TracingListener::new(LogLevel::Info).attach(&bus);
/// assert_eq!(bus.listener_count(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TracingListener {
    level: LogLevel,
}

impl Default for TracingListener {
    fn default() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl TracingListener {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Register listeners for all three event kinds
    pub fn attach(self, bus: &EventBus) {
        let query_level = quieter(self.level);
        let resolved_level = self.level;
        let failed_level = louder(self.level);

        bus.on_source_queried(move |event| {
            event_at!(query_level, key = %event.key, source = %event.source_name, "source queried");
        });
        bus.on_resolved(move |event| {
            event_at!(
                resolved_level,
                key = %event.key,
                source = %event.source_name,
                duration_ms = event.duration_ms,
                "value resolved"
            );
        });
        bus.on_failed(move |event| {
            event_at!(
                failed_level,
                key = %event.key,
                attempted = ?event.attempted_sources,
                "resolution failed"
            );
        });
    }
}

fn quieter(level: LogLevel) -> LogLevel {
    match level {
        LogLevel::Trace | LogLevel::Debug => LogLevel::Trace,
        LogLevel::Info => LogLevel::Debug,
        LogLevel::Warn => LogLevel::Info,
        LogLevel::Error => LogLevel::Warn,
    }
}

fn louder(level: LogLevel) -> LogLevel {
    match level {
        LogLevel::Trace => LogLevel::Debug,
        LogLevel::Debug => LogLevel::Info,
        LogLevel::Info | LogLevel::Warn => LogLevel::Warn,
        LogLevel::Error => LogLevel::Error,
    }
}
