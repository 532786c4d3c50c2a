// Change stream for a list query.
//
// Yields the list result when the stream opens, then the result again after
// every write to the type that changes it. Writes that leave the filtered,
// sorted and paged result as it was are not re-sent.

use crate::modules::resources::application::errors::ApplicationError;
use crate::modules::resources::application::write::resolve_type;
use crate::modules::resources::core::list::{ListOpts, revisions};
use crate::modules::resources::core::registry::ResourceRegistry;
use crate::shared::infrastructure::object_store::{
    ObjectChange, ObjectStore, ObjectStoreError, StoredObject,
};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};

pub struct StreamListResourcesHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    registry: Arc<ResourceRegistry>,
    store: Arc<TStore>,
}

impl<TStore> StreamListResourcesHandler<TStore>
where
    TStore: ObjectStore + 'static,
{
    pub fn new(registry: Arc<ResourceRegistry>, store: Arc<TStore>) -> Self {
        Self { registry, store }
    }

    #[tracing::instrument(name = "stream_list", skip(self, opts), fields(operation = "stream_list"))]
    pub async fn handle(
        &self,
        type_name: &str,
        opts: ListOpts,
    ) -> Result<ListStream<TStore>, ApplicationError> {
        resolve_type(&self.registry, type_name)?;

        let changes = self.store.subscribe();
        let current = opts.apply(self.store.load_all(type_name).await?);

        Ok(ListStream {
            store: self.store.clone(),
            type_name: type_name.to_string(),
            opts,
            changes,
            pending: Some(current),
            last: Vec::new(),
        })
    }
}

pub struct ListStream<TStore>
where
    TStore: ObjectStore + 'static,
{
    store: Arc<TStore>,
    type_name: String,
    opts: ListOpts,
    changes: broadcast::Receiver<ObjectChange>,
    pending: Option<Vec<StoredObject>>,
    last: Vec<(String, i64)>,
}

impl<TStore> ListStream<TStore>
where
    TStore: ObjectStore + 'static,
{
    /// Wait for the next differing list result.
    pub async fn next(&mut self) -> Result<Vec<StoredObject>, ApplicationError> {
        if let Some(current) = self.pending.take() {
            self.last = revisions(&current);
            return Ok(current);
        }

        loop {
            match self.changes.recv().await {
                Ok(change) if change.type_name != self.type_name => continue,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "change stream lagged, reloading");
                }
                Err(RecvError::Closed) => {
                    return Err(ObjectStoreError::Backend("change feed closed".into()).into());
                }
            }

            let current = self
                .opts
                .apply(self.store.load_all(&self.type_name).await?);
            let current_revisions = revisions(&current);
            if current_revisions != self.last {
                self.last = current_revisions;
                return Ok(current);
            }
        }
    }
}
