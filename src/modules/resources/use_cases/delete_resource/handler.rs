use crate::modules::resources::application::errors::ApplicationError;
use crate::modules::resources::application::write::{resolve_type, retry_on_mismatch, with_retry};
use crate::modules::resources::core::decide::decide_write;
use crate::modules::resources::core::registry::ResourceRegistry;
use crate::shared::core::precondition::Precondition;
use crate::shared::infrastructure::object_store::ObjectStore;
use std::sync::Arc;

pub struct DeleteResourceHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    registry: Arc<ResourceRegistry>,
    store: Arc<TStore>,
    max_write_attempts: u32,
}

impl<TStore> DeleteResourceHandler<TStore>
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

    #[tracing::instrument(name = "delete", skip(self), fields(operation = "delete"))]
    pub async fn handle(
        &self,
        type_name: &str,
        id: &str,
        prev: Option<&Precondition>,
    ) -> Result<(), ApplicationError> {
        resolve_type(&self.registry, type_name)?;

        let store = &*self.store;
        let generation = with_retry(type_name, id, self.max_write_attempts, move || async move {
            let loaded = store.load(type_name, id).await?;
            let current = decide_write(type_name, id, loaded.as_ref(), prev)?;
            let generation = current.metadata.generation;
            let removed = store.remove(type_name, id, generation).await;
            Ok::<_, ApplicationError>(retry_on_mismatch(removed)?.map(|()| generation))
        })
        .await?;

        tracing::info!(generation, "deleted");
        Ok(())
    }
}
