use crate::modules::resources::application::errors::ApplicationError;
use crate::modules::resources::application::write::resolve_type;
use crate::modules::resources::core::list::ListOpts;
use crate::modules::resources::core::registry::ResourceRegistry;
use crate::shared::infrastructure::object_store::{ObjectStore, StoredObject};
use std::sync::Arc;

pub struct ListResourcesHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    registry: Arc<ResourceRegistry>,
    store: Arc<TStore>,
}

impl<TStore> ListResourcesHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    pub fn new(registry: Arc<ResourceRegistry>, store: Arc<TStore>) -> Self {
        Self { registry, store }
    }

    #[tracing::instrument(name = "list", skip(self, opts), fields(operation = "list"))]
    pub async fn handle(
        &self,
        type_name: &str,
        opts: &ListOpts,
    ) -> Result<Vec<StoredObject>, ApplicationError> {
        resolve_type(&self.registry, type_name)?;
        let objects = self.store.load_all(type_name).await?;
        let total = objects.len();
        let listed = opts.apply(objects);
        tracing::debug!(total, returned = listed.len(), "listed");
        Ok(listed)
    }
}
