//! Logging integration
//!
//! The engine logs through `tracing` directly; `TracingListener` additionally
//! mirrors the resolution event stream into `tracing` so embedders get one
//! log line per query, resolution and failure.

mod level;
mod listener;

pub use level::LogLevel;
pub use listener::TracingListener;
