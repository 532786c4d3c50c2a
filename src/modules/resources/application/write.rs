// Conditional write loop shared by replace, update and delete.
//
// Each attempt loads the current revision, decides the caller's precondition
// against it and writes on the loaded generation. A generation mismatch means
// another writer got in between; the attempt is repeated so the precondition
// is decided again against the newer revision.

use crate::modules::resources::application::errors::ApplicationError;
use crate::modules::resources::core::decide::decide_write;
use crate::modules::resources::core::registry::{ResourceRegistry, ResourceType};
use crate::shared::core::precondition::Precondition;
use crate::shared::infrastructure::object_store::{ObjectStore, ObjectStoreError, StoredObject};
use serde_json::Value;
use std::future::Future;

pub fn resolve_type(
    registry: &ResourceRegistry,
    type_name: &str,
) -> Result<ResourceType, ApplicationError> {
    registry
        .get(type_name)
        .ok_or_else(|| ApplicationError::UnknownType(type_name.to_string()))
}

/// Map a store generation mismatch to `Ok(None)` so the attempt is retried.
pub fn retry_on_mismatch<T>(
    result: Result<T, ObjectStoreError>,
) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ObjectStoreError::GenerationMismatch { expected, actual }) => {
            tracing::debug!(expected, actual, "generation moved");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Run `attempt` until it yields a value, fails, or `max_attempts` attempts
/// have returned `Ok(None)`.
pub async fn with_retry<T, F, Fut>(
    type_name: &str,
    id: &str,
    max_attempts: u32,
    mut attempt: F,
) -> Result<T, ApplicationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, ApplicationError>>,
{
    let max_attempts = max_attempts.max(1);
    for n in 1..=max_attempts {
        if let Some(value) = attempt().await? {
            return Ok(value);
        }
        tracing::debug!(attempt = n, "retrying contended write");
    }

    tracing::warn!(attempts = max_attempts, "giving up on contended write");
    Err(ApplicationError::Conflict {
        type_name: type_name.to_string(),
        id: id.to_string(),
        attempts: max_attempts,
    })
}

pub async fn write_with_retry<TStore, F>(
    store: &TStore,
    type_name: &str,
    id: &str,
    precondition: Option<&Precondition>,
    max_attempts: u32,
    next_body: F,
) -> Result<StoredObject, ApplicationError>
where
    TStore: ObjectStore + ?Sized,
    F: Fn(&StoredObject) -> Result<Value, ApplicationError>,
{
    let next_body = &next_body;
    with_retry(type_name, id, max_attempts, move || async move {
        let loaded = store.load(type_name, id).await?;
        let current = decide_write(type_name, id, loaded.as_ref(), precondition)?;
        let next = current.next_revision(next_body(current)?);
        let saved = store
            .save(type_name, current.metadata.generation, next.clone())
            .await;
        Ok::<_, ApplicationError>(retry_on_mismatch(saved)?.map(|()| next))
    })
    .await
}
