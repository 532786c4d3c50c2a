use crate::modules::resources::application::errors::ApplicationError;
use crate::modules::resources::application::write::{resolve_type, write_with_retry};
use crate::modules::resources::core::registry::ResourceRegistry;
use crate::shared::core::precondition::Precondition;
use crate::shared::infrastructure::object_store::{ObjectStore, StoredObject};
use serde_json::Value;
use std::sync::Arc;

pub struct ReplaceResourceHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    registry: Arc<ResourceRegistry>,
    store: Arc<TStore>,
    max_write_attempts: u32,
}

impl<TStore> ReplaceResourceHandler<TStore>
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

    /// Overwrite the whole object. Fields missing from `payload` take the
    /// type's defaults.
    #[tracing::instrument(name = "replace", skip(self, payload), fields(operation = "replace"))]
    pub async fn handle(
        &self,
        type_name: &str,
        id: &str,
        payload: Value,
        prev: Option<&Precondition>,
    ) -> Result<StoredObject, ApplicationError> {
        let resource_type = resolve_type(&self.registry, type_name)?;
        let body = resource_type.normalize(payload)?;

        let replaced = write_with_retry(
            &*self.store,
            type_name,
            id,
            prev,
            self.max_write_attempts,
            |_| Ok(body.clone()),
        )
        .await?;

        tracing::info!(generation = replaced.metadata.generation, "replaced");
        Ok(replaced)
    }
}
