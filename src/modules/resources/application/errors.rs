use crate::modules::resources::core::decide::DecideError;
use crate::modules::resources::core::registry::NormalizeError;
use crate::shared::infrastructure::object_store::ObjectStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("unknown resource type: {0}")]
    UnknownType(String),

    #[error(transparent)]
    InvalidPayload(#[from] NormalizeError),

    #[error(transparent)]
    Rejected(#[from] DecideError),

    #[error("write conflict on {type_name} {id} after {attempts} attempts")]
    Conflict {
        type_name: String,
        id: String,
        attempts: u32,
    },

    #[error(transparent)]
    Store(#[from] ObjectStoreError),
}

impl ApplicationError {
    pub fn is_precondition_failed(&self) -> bool {
        matches!(
            self,
            Self::Rejected(DecideError::PreconditionFailed { .. })
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnknownType(_) | Self::Rejected(DecideError::NotFound { .. })
        )
    }
}
