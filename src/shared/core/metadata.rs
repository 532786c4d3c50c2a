// Metadata carried by every stored object.
//
// Purpose
// - Identify an object and describe which revision of it a reader saw.
//
// Responsibilities
// - Derive the content etag from the canonical JSON body.
// - Advance the generation by one on every write.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

pub const ETAG_PREFIX: &str = "etag:";
pub const GENERATION_PREFIX: &str = "generation:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub id: String,
    pub etag: String,
    pub generation: i64,
}

impl Metadata {
    pub fn new(id: impl Into<String>, generation: i64, body: &Value) -> Self {
        Self {
            id: id.into(),
            etag: etag_for(body),
            generation,
        }
    }

    pub fn next(&self, body: &Value) -> Self {
        Self::new(self.id.clone(), self.generation + 1, body)
    }
}

// serde_json maps are ordered by key, so equal bodies always hash the same.
pub fn etag_for(body: &Value) -> String {
    let bytes = body.to_string();
    format!("{ETAG_PREFIX}{}", hex::encode(Sha256::digest(bytes.as_bytes())))
}
