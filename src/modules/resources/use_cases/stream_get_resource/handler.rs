// Change stream for a single object.
//
// Purpose
// - Follow one object as it is written, without polling.
//
// Responsibilities
// - Yield the revision current when the stream opens, then each newer one.
// - End with NotFound once the object is deleted.

use crate::modules::resources::application::errors::ApplicationError;
use crate::modules::resources::application::write::resolve_type;
use crate::modules::resources::core::decide::DecideError;
use crate::modules::resources::core::registry::ResourceRegistry;
use crate::shared::infrastructure::object_store::{
    ObjectChange, ObjectStore, ObjectStoreError, StoredObject,
};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};

pub struct StreamGetResourceHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    registry: Arc<ResourceRegistry>,
    store: Arc<TStore>,
}

impl<TStore> StreamGetResourceHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    pub fn new(registry: Arc<ResourceRegistry>, store: Arc<TStore>) -> Self {
        Self { registry, store }
    }

    #[tracing::instrument(name = "stream_get", skip(self), fields(operation = "stream_get"))]
    pub async fn handle(
        &self,
        type_name: &str,
        id: &str,
    ) -> Result<ObjectStream<TStore>, ApplicationError> {
        resolve_type(&self.registry, type_name)?;

        // Subscribe before the first load so no write falls in between.
        let changes = self.store.subscribe();
        let current = self
            .store
            .load(type_name, id)
            .await?
            .ok_or_else(|| not_found(type_name, id))?;

        Ok(ObjectStream {
            store: self.store.clone(),
            type_name: type_name.to_string(),
            id: id.to_string(),
            changes,
            pending: Some(current),
            last_generation: 0,
            deleted: false,
        })
    }
}

pub struct ObjectStream<TStore>
where
    TStore: ObjectStore + 'static,
{
    store: Arc<TStore>,
    type_name: String,
    id: String,
    changes: broadcast::Receiver<ObjectChange>,
    pending: Option<StoredObject>,
    last_generation: i64,
    deleted: bool,
}

impl<TStore> ObjectStream<TStore>
where
    TStore: ObjectStore + 'static,
{
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Wait for the next revision. Fails with NotFound once the object is
    /// gone, and keeps failing on later calls.
    pub async fn next(&mut self) -> Result<StoredObject, ApplicationError> {
        if let Some(current) = self.pending.take() {
            self.last_generation = current.metadata.generation;
            return Ok(current);
        }

        loop {
            if self.deleted {
                return Err(not_found(&self.type_name, &self.id));
            }

            match self.changes.recv().await {
                Ok(change) if change.type_name != self.type_name || change.id != self.id => {
                    continue;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "change stream lagged, reloading");
                }
                Err(RecvError::Closed) => {
                    return Err(ObjectStoreError::Backend("change feed closed".into()).into());
                }
            }

            match self.store.load(&self.type_name, &self.id).await? {
                Some(current) if current.metadata.generation != self.last_generation => {
                    self.last_generation = current.metadata.generation;
                    return Ok(current);
                }
                Some(_) => {}
                None => self.deleted = true,
            }
        }
    }
}

fn not_found(type_name: &str, id: &str) -> ApplicationError {
    DecideError::NotFound {
        type_name: type_name.to_string(),
        id: id.to_string(),
    }
    .into()
}
