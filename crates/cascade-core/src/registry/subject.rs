//! Context derivation from subject objects

use serde_json::Value;

use crate::source::Context;

/// A subject that can describe itself as resolution context
pub trait HasCascadeContext {
    /// Context contributed by this subject; only object values are merged
    fn cascade_context(&self) -> Value;
}

/// A subject with an identity
pub trait HasIdentity {
    /// Identity value; `null` contributes nothing
    fn identity(&self) -> Value;

    /// Type name used to build the `<type>_id` context key
    ///
    /// Defaults to the last path segment of the Rust type name.
    fn type_name(&self) -> String {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Something resolution can be performed "for"
///
/// Both capabilities are optional; a subject exposing neither contributes an
/// empty context.
///
/// # Example
///
/// ```
/// use cascade_core::registry::{derive_context, HasIdentity, Subject};
/// use serde_json::{json, Value};
///
/// struct Tenant { id: u64 }
///
/// impl HasIdentity for Tenant {
///     fn identity(&self) -> Value { json!(self.id) }
/// }
///
/// impl Subject for Tenant {
///     fn as_identity(&self) -> Option<&dyn HasIdentity> { Some(self) }
/// }
///
/// let ctx = derive_context(&Tenant { id: 42 });
/// assert_eq!(ctx.get("tenant_id"), Some(&json!(42)));
/// ```
pub trait Subject {
    fn as_cascade_context(&self) -> Option<&dyn HasCascadeContext> {
        None
    }

    fn as_identity(&self) -> Option<&dyn HasIdentity> {
        None
    }
}

/// Build the context contributed by `subject`
///
/// The subject's own context is merged first; the identity entry is added
/// afterwards and wins on collision.
pub fn derive_context(subject: &dyn Subject) -> Context {
    let mut context = Context::new();

    if let Some(provider) = subject.as_cascade_context() {
        match provider.cascade_context() {
            Value::Object(map) => context.extend(map),
            Value::Null => {}
            other => {
                tracing::debug!(kind = value_kind(&other), "ignoring non-map subject context");
            }
        }
    }

    if let Some(identified) = subject.as_identity() {
        let id = identified.identity();
        if !id.is_null() {
            let key = format!("{}_id", identified.type_name().to_lowercase());
            context.insert(key, id);
        }
    }

    context
}

fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Subject for Context {
    fn as_cascade_context(&self) -> Option<&dyn HasCascadeContext> {
        Some(self)
    }
}

impl HasCascadeContext for Context {
    fn cascade_context(&self) -> Value {
        Value::Object(self.clone().into_iter().collect())
    }
}
