//! Priority-ordered resolution
//!
//! This module provides the resolution engine:
//! - `SourceQueue`: sources sorted by priority, stable on ties
//! - `resolve_chain`: the short-circuit fallback scan
//! - `TransformerPipeline`: post-processing of found values
//! - `Resolve`: the `get` / `get_or` / `get_or_fail` / `resolve` / `get_many` surface
//! - `SourceConductor`: builder for anonymous chains

mod result;
mod priority;
mod transform;
mod engine;
mod resolve;
mod conductor;

pub use result::{Resolution, ResolutionAttempt};
pub use priority::{PrioritizedSource, SourceQueue, DEFAULT_PRIORITY};
pub use transform::{TransformerFn, TransformerPipeline};
pub use engine::{resolve_chain, ResolutionChain};
pub(crate) use engine::layer_context;
pub use resolve::{DefaultValue, Resolve};
pub use conductor::SourceConductor;
