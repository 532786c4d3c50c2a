use crate::modules::resources::application::errors::ApplicationError;
use crate::modules::resources::application::write::resolve_type;
use crate::modules::resources::core::registry::ResourceRegistry;
use crate::shared::core::metadata::Metadata;
use crate::shared::core::precondition::Precondition;
use crate::shared::infrastructure::object_store::{ObjectStore, StoredObject};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum GetOutcome {
    Found(StoredObject),
    /// The caller's snapshot is still current.
    NotModified(Metadata),
    Missing,
}

pub struct GetResourceHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    registry: Arc<ResourceRegistry>,
    store: Arc<TStore>,
}

impl<TStore> GetResourceHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    pub fn new(registry: Arc<ResourceRegistry>, store: Arc<TStore>) -> Self {
        Self { registry, store }
    }

    #[tracing::instrument(name = "get", skip(self), fields(operation = "get"))]
    pub async fn handle(
        &self,
        type_name: &str,
        id: &str,
        prev: Option<&Precondition>,
    ) -> Result<GetOutcome, ApplicationError> {
        resolve_type(&self.registry, type_name)?;

        let Some(object) = self.store.load(type_name, id).await? else {
            return Ok(GetOutcome::Missing);
        };

        match prev {
            Some(prev) if prev.matches(&object.metadata) => {
                Ok(GetOutcome::NotModified(object.metadata))
            }
            _ => Ok(GetOutcome::Found(object)),
        }
    }
}
