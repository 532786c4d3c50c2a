// Pure decision for conditional writes.
//
// Purpose
// - Check that the target exists and that the caller's snapshot, if any, is
//   still the current revision.
//
// Responsibilities
// - Never perform input or output.

use crate::shared::core::precondition::Precondition;
use crate::shared::infrastructure::object_store::StoredObject;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("{type_name} {id} not found")]
    NotFound { type_name: String, id: String },

    #[error("precondition {expected} failed: current is {etag} at generation {generation}")]
    PreconditionFailed {
        expected: String,
        etag: String,
        generation: i64,
    },
}

pub fn decide_write<'a>(
    type_name: &str,
    id: &str,
    current: Option<&'a StoredObject>,
    precondition: Option<&Precondition>,
) -> Result<&'a StoredObject, DecideError> {
    let Some(current) = current else {
        return Err(DecideError::NotFound {
            type_name: type_name.to_string(),
            id: id.to_string(),
        });
    };

    match precondition {
        Some(precondition) if !precondition.matches(&current.metadata) => {
            Err(DecideError::PreconditionFailed {
                expected: precondition.to_string(),
                etag: current.metadata.etag.clone(),
                generation: current.metadata.generation,
            })
        }
        _ => Ok(current),
    }
}
