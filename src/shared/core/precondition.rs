// Snapshot tokens used as write and read preconditions.
//
// Accepted header forms (optionally wrapped in double quotes):
// - `etag:<hex>`        matches when the stored content hash is equal
// - `generation:<n>`    matches when the stored write counter is equal
// - `*`                 matches any existing revision
//
// A weak `W/` prefix is accepted and ignored. Comma-separated validator lists
// are rejected.

use crate::shared::core::metadata::{ETAG_PREFIX, GENERATION_PREFIX, Metadata};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("empty precondition")]
    Empty,

    #[error("unknown precondition format: {0}")]
    UnknownFormat(String),

    #[error("invalid generation: {0}")]
    InvalidGeneration(String),

    #[error("validator lists are not supported: {0}")]
    ValidatorList(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    Any,
    ETag(String),
    Generation(i64),
}

impl Precondition {
    pub fn parse(raw: &str) -> Result<Self, PreconditionError> {
        let raw = raw.trim();
        if raw.contains(',') {
            return Err(PreconditionError::ValidatorList(raw.to_string()));
        }
        if raw == "*" {
            return Ok(Self::Any);
        }

        let value = raw.strip_prefix("W/").unwrap_or(raw).trim_matches('"');
        if value.is_empty() {
            return Err(PreconditionError::Empty);
        }

        if value.starts_with(ETAG_PREFIX) {
            return Ok(Self::ETag(value.to_string()));
        }

        if let Some(generation) = value.strip_prefix(GENERATION_PREFIX) {
            return generation
                .parse::<i64>()
                .map(Self::Generation)
                .map_err(|_| PreconditionError::InvalidGeneration(generation.to_string()));
        }

        Err(PreconditionError::UnknownFormat(value.to_string()))
    }

    /// Snapshot token that goes stale on any later write, even one that
    /// restores the same content.
    pub fn from_snapshot(metadata: &Metadata) -> Self {
        Self::Generation(metadata.generation)
    }

    pub fn matches(&self, metadata: &Metadata) -> bool {
        match self {
            Self::Any => true,
            Self::ETag(etag) => *etag == metadata.etag,
            Self::Generation(generation) => *generation == metadata.generation,
        }
    }
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::ETag(etag) => write!(f, "{etag}"),
            Self::Generation(generation) => write!(f, "{GENERATION_PREFIX}{generation}"),
        }
    }
}
