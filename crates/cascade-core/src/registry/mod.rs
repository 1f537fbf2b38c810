//! Named resolvers
//!
//! This module provides reusable, named resolution chains:
//! - `ResolverRegistry`: name → resolver, with nearest-name suggestions
//! - `NamedResolver`: a chain extended through a shared builder handle
//! - `ResolutionConductor`: resolves through a named resolver, optionally
//!   bound to a subject's context

mod subject;
mod suggest;
mod named;
mod conductor;
mod store;

pub use subject::{derive_context, HasCascadeContext, HasIdentity, Subject};
pub use suggest::suggest_names;
pub use named::NamedResolver;
pub use conductor::ResolutionConductor;
pub use store::ResolverRegistry;
