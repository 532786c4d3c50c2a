use crate::modules::resources::application::errors::ApplicationError;
use crate::modules::resources::application::write::{resolve_type, write_with_retry};
use crate::modules::resources::core::merge::merge_patch;
use crate::modules::resources::core::registry::ResourceRegistry;
use crate::shared::core::precondition::Precondition;
use crate::shared::infrastructure::object_store::{ObjectStore, StoredObject};
use serde_json::Value;
use std::sync::Arc;

pub struct UpdateResourceHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    registry: Arc<ResourceRegistry>,
    store: Arc<TStore>,
    max_write_attempts: u32,
}

impl<TStore> UpdateResourceHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    pub fn new(registry: Arc<ResourceRegistry>, store: Arc<TStore>, max_write_attempts: u32) -> Self {
        Self {
            registry,
            store,
            max_write_attempts,
        }
    }

    /// Merge `patch` into the current object; the merge is redone on every
    /// retry so it always applies to the revision being replaced.
    #[tracing::instrument(name = "update", skip(self, patch), fields(operation = "update"))]
    pub async fn handle(
        &self,
        type_name: &str,
        id: &str,
        patch: Value,
        prev: Option<&Precondition>,
    ) -> Result<StoredObject, ApplicationError> {
        let resource_type = resolve_type(&self.registry, type_name)?;

        let updated = write_with_retry(
            &*self.store,
            type_name,
            id,
            prev,
            self.max_write_attempts,
            |current| {
                let mut merged = current.body.clone();
                merge_patch(&mut merged, patch.clone());
                Ok(resource_type.normalize(merged)?)
            },
        )
        .await?;

        tracing::info!(generation = updated.metadata.generation, "updated");
        Ok(updated)
    }
}
