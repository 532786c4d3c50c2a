use crate::shared::core::metadata::Metadata;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// A Rust type that can be registered with the store. Fields missing from a
/// payload must deserialize to their defaults (`#[serde(default)]`), since a
/// replace overwrites the whole object.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TYPE_NAME: &'static str;
}

/// A stored resource as returned to callers: the object plus the metadata of
/// the revision that was read. Passing it back as `prev` makes a write
/// conditional on that revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    #[serde(flatten)]
    pub metadata: Metadata,
    #[serde(flatten)]
    pub object: T,
}

impl<T> Document<T> {
    pub fn id(&self) -> &str {
        &self.metadata.id
    }
}

impl<T> Deref for Document<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.object
    }
}
