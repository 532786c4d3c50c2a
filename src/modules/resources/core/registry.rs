// Registered resource types.
//
// Each type is known by its name and a normalizer that pushes a JSON payload
// through the Rust type, so stored bodies always have the type's full shape
// (missing fields take defaults, unknown fields are dropped).

use crate::modules::resources::core::resource::Resource;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

const METADATA_FIELDS: [&str; 3] = ["id", "etag", "generation"];

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("{type_name} payload must be a JSON object")]
    NotAnObject { type_name: &'static str },

    #[error("invalid {type_name} payload: {source}")]
    Decode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

type Normalizer = fn(Value) -> Result<Value, serde_json::Error>;

#[derive(Clone, Copy)]
pub struct ResourceType {
    name: &'static str,
    normalizer: Normalizer,
}

impl ResourceType {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn normalize(&self, payload: Value) -> Result<Value, NormalizeError> {
        let Value::Object(mut fields) = payload else {
            return Err(NormalizeError::NotAnObject {
                type_name: self.name,
            });
        };
        for field in METADATA_FIELDS {
            fields.remove(field);
        }
        let normalized = (self.normalizer)(Value::Object(fields)).map_err(|source| {
            NormalizeError::Decode {
                type_name: self.name,
                source,
            }
        })?;
        if !normalized.is_object() {
            return Err(NormalizeError::NotAnObject {
                type_name: self.name,
            });
        }
        Ok(normalized)
    }
}

fn normalize_as<T: Resource>(payload: Value) -> Result<Value, serde_json::Error> {
    let object: T = serde_json::from_value(payload)?;
    serde_json::to_value(object)
}

#[derive(Clone, Default)]
pub struct ResourceRegistry {
    types: BTreeMap<&'static str, ResourceType>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Resource>(mut self) -> Self {
        self.types.insert(
            T::TYPE_NAME,
            ResourceType {
                name: T::TYPE_NAME,
                normalizer: normalize_as::<T>,
            },
        );
        self
    }

    pub fn get(&self, type_name: &str) -> Option<ResourceType> {
        self.types.get(type_name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }
}
