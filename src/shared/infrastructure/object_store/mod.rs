use crate::shared::core::metadata::Metadata;
use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::broadcast;

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("generation mismatch: expected {expected}, actual {actual}")]
    GenerationMismatch { expected: i64, actual: i64 },

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub metadata: Metadata,
    pub body: Value,
}

impl StoredObject {
    pub fn first(id: impl Into<String>, body: Value) -> Self {
        Self {
            metadata: Metadata::new(id, 1, &body),
            body,
        }
    }

    pub fn next_revision(&self, body: Value) -> Self {
        Self {
            metadata: self.metadata.next(&body),
            body,
        }
    }

    /// The object as callers see it: body fields plus flattened metadata.
    pub fn to_document(&self) -> Value {
        let mut fields = match &self.body {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        fields.insert("id".into(), Value::String(self.metadata.id.clone()));
        fields.insert("etag".into(), Value::String(self.metadata.etag.clone()));
        fields.insert("generation".into(), Value::from(self.metadata.generation));
        Value::Object(fields)
    }
}

/// A committed save or remove. `generation` is 0 for a removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectChange {
    pub type_name: String,
    pub id: String,
    pub generation: i64,
}

/// Storage port. Objects are keyed by `(type_name, id)`; an absent object has
/// generation 0, so a create saves with `expected_generation == 0`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn load(&self, type_name: &str, id: &str)
    -> Result<Option<StoredObject>, ObjectStoreError>;

    async fn load_all(&self, type_name: &str) -> Result<Vec<StoredObject>, ObjectStoreError>;

    async fn save(
        &self,
        type_name: &str,
        expected_generation: i64,
        object: StoredObject,
    ) -> Result<(), ObjectStoreError>;

    async fn remove(
        &self,
        type_name: &str,
        id: &str,
        expected_generation: i64,
    ) -> Result<(), ObjectStoreError>;

    /// Changes committed after this call, in commit order.
    fn subscribe(&self) -> broadcast::Receiver<ObjectChange>;
}

pub mod in_memory;

#[cfg(test)]
mod stored_object_tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn it_should_flatten_metadata_into_the_document() {
        let object = StoredObject::first("abc", json!({"text": "foo", "num": 5}));
        let document = object.to_document();
        assert_eq!(document["id"], "abc");
        assert_eq!(document["generation"], 1);
        assert_eq!(document["etag"], object.metadata.etag.as_str());
        assert_eq!(document["text"], "foo");
        assert_eq!(document["num"], 5);
    }

    #[rstest]
    fn it_should_build_the_next_revision_from_the_current_one() {
        let first = StoredObject::first("abc", json!({"text": "foo"}));
        let second = first.next_revision(json!({"text": "bar"}));
        assert_eq!(second.metadata.id, "abc");
        assert_eq!(second.metadata.generation, 2);
        assert_ne!(second.metadata.etag, first.metadata.etag);
        assert_eq!(second.body, json!({"text": "bar"}));
    }
}
