//! Post-resolution value transformers

use std::sync::Arc;

use serde_json::Value;

use crate::source::Source;

/// Transformer: `(value, source that produced it) -> new value`
pub type TransformerFn = Arc<dyn Fn(Value, &dyn Source) -> Value + Send + Sync>;

/// Ordered transformers applied to found values
///
/// Each transformer receives the previous one's output. The pipeline never
/// runs over a default value.
#[derive(Clone, Default)]
pub struct TransformerPipeline {
    transformers: Vec<TransformerFn>,
}

impl TransformerPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transformer: TransformerFn) {
        self.transformers.push(transformer);
    }

    /// Run every transformer in registration order
    pub fn apply(&self, value: Value, source: &dyn Source) -> Value {
        self.transformers
            .iter()
            .fold(value, |value, transform| transform(value, source))
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}

impl std::fmt::Debug for TransformerPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformerPipeline")
            .field("transformers", &self.transformers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticMapSource;
    use serde_json::json;

    #[test]
    fn test_applies_in_order() {
        let mut pipeline = TransformerPipeline::new();
        pipeline.push(Arc::new(|v: Value, _: &dyn Source| {
            json!(v.as_str().unwrap_or_default().to_uppercase())
        }));
        pipeline.push(Arc::new(|v: Value, _: &dyn Source| {
            json!(format!("{}!", v.as_str().unwrap_or_default()))
        }));

        let source = StaticMapSource::new("s");
        assert_eq!(pipeline.apply(json!("value"), &source), json!("VALUE!"));
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn test_receives_source() {
        let mut pipeline = TransformerPipeline::new();
        pipeline.push(Arc::new(|v: Value, source: &dyn Source| {
            json!({"value": v, "from": source.name()})
        }));

        let source = StaticMapSource::new("defaults");
        assert_eq!(
            pipeline.apply(json!(1), &source),
            json!({"value": 1, "from": "defaults"})
        );
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = TransformerPipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply(json!([1, 2]), &StaticMapSource::new("s")), json!([1, 2]));
    }
}
