use crate::modules::resources::application::errors::ApplicationError;
use crate::modules::resources::application::write::resolve_type;
use crate::modules::resources::core::registry::ResourceRegistry;
use crate::shared::infrastructure::object_store::{ObjectStore, ObjectStoreError, StoredObject};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

pub struct CreateResourceHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    registry: Arc<ResourceRegistry>,
    store: Arc<TStore>,
}

impl<TStore> CreateResourceHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    pub fn new(registry: Arc<ResourceRegistry>, store: Arc<TStore>) -> Self {
        Self { registry, store }
    }

    #[tracing::instrument(
        name = "create",
        skip(self, payload),
        fields(operation = "create", id = tracing::field::Empty)
    )]
    pub async fn handle(
        &self,
        type_name: &str,
        payload: Value,
    ) -> Result<StoredObject, ApplicationError> {
        let resource_type = resolve_type(&self.registry, type_name)?;
        let body = resource_type.normalize(payload)?;

        let id = Uuid::now_v7().to_string();
        tracing::Span::current().record("id", id.as_str());

        let object = StoredObject::first(id.clone(), body);
        match self.store.save(type_name, 0, object.clone()).await {
            Ok(()) => {
                tracing::info!(generation = object.metadata.generation, "created");
                Ok(object)
            }
            Err(ObjectStoreError::GenerationMismatch { .. }) => Err(ApplicationError::Conflict {
                type_name: type_name.to_string(),
                id,
                attempts: 1,
            }),
            Err(e) => Err(e.into()),
        }
    }
}
