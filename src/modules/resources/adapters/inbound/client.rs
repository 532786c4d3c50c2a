// Typed in-process client over the resource handlers.
//
// Purpose
// - Let Rust callers work with `Document<T>` values instead of raw JSON.
//
// Responsibilities
// - Encode objects and patches, decode stored objects into documents.
// - Turn a `prev` document into the snapshot precondition of a read or write.
// - Hand back `prev` itself when a read finds it still current.

use crate::modules::resources::application::errors::ApplicationError;
use crate::modules::resources::application::handlers::ResourceHandlers;
use crate::modules::resources::core::decide::DecideError;
use crate::modules::resources::core::list::{Filter, FilterOp, ListOpts, revisions};
use crate::modules::resources::core::resource::{Document, Resource};
use crate::modules::resources::use_cases::get_resource::handler::GetOutcome;
use crate::modules::resources::use_cases::stream_get_resource::handler::ObjectStream;
use crate::modules::resources::use_cases::stream_list_resources::handler::ListStream;
use crate::shared::core::precondition::Precondition;
use crate::shared::infrastructure::object_store::{ObjectStore, StoredObject};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error(transparent)]
    Codec(#[from] serde_json::Error),

    #[error("{type_name} id prefix {short_id} matched {matches} objects")]
    NotUnique {
        type_name: &'static str,
        short_id: String,
        matches: usize,
    },
}

impl ClientError {
    pub fn is_precondition_failed(&self) -> bool {
        matches!(self, Self::Application(e) if e.is_precondition_failed())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Application(e) if e.is_not_found())
    }
}

/// Options for replace, update and delete. With `prev` set, the write only
/// lands if the object is still at the revision `prev` was read at.
pub struct UpdateOpts<'a, T> {
    pub prev: Option<&'a Document<T>>,
}

impl<'a, T> UpdateOpts<'a, T> {
    pub fn prev(prev: &'a Document<T>) -> Self {
        Self { prev: Some(prev) }
    }
}

/// Options for get. With `prev` set and the object unchanged, `prev` itself
/// is returned.
pub struct GetOpts<'a, T> {
    pub prev: Option<&'a Document<T>>,
}

impl<'a, T> GetOpts<'a, T> {
    pub fn prev(prev: &'a Document<T>) -> Self {
        Self { prev: Some(prev) }
    }
}

fn snapshot_of<T>(prev: Option<&Document<T>>) -> Option<Precondition> {
    prev.map(|p| Precondition::from_snapshot(&p.metadata))
}

fn decode<T: Resource>(stored: &StoredObject) -> Result<Document<T>, ClientError> {
    Ok(serde_json::from_value(stored.to_document())?)
}

fn decode_all<T: Resource>(stored: &[StoredObject]) -> Result<Vec<Document<T>>, ClientError> {
    stored.iter().map(decode).collect()
}

fn is_current<T>(prev: &[Document<T>], stored: &[StoredObject]) -> bool {
    prev.iter()
        .map(|d| (d.metadata.id.as_str(), d.metadata.generation))
        .eq(revisions(stored)
            .iter()
            .map(|(id, generation)| (id.as_str(), *generation)))
}

pub struct Client<TStore>
where
    TStore: ObjectStore + 'static,
{
    handlers: Arc<ResourceHandlers<TStore>>,
}

impl<TStore> Clone for Client<TStore>
where
    TStore: ObjectStore + 'static,
{
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<TStore> Client<TStore>
where
    TStore: ObjectStore + 'static,
{
    pub fn new(handlers: Arc<ResourceHandlers<TStore>>) -> Self {
        Self { handlers }
    }

    pub async fn create<T: Resource>(&self, object: &T) -> Result<Document<T>, ClientError> {
        let stored = self
            .handlers
            .create
            .handle(T::TYPE_NAME, serde_json::to_value(object)?)
            .await?;
        decode(&stored)
    }

    /// Fails with NotFound when no object has this id.
    pub async fn get<T: Resource>(
        &self,
        id: &str,
        opts: Option<GetOpts<'_, T>>,
    ) -> Result<Document<T>, ClientError> {
        let prev = opts.and_then(|o| o.prev).filter(|p| p.id() == id);
        let snapshot = snapshot_of(prev);

        match self
            .handlers
            .get
            .handle(T::TYPE_NAME, id, snapshot.as_ref())
            .await?
        {
            GetOutcome::Found(stored) => decode(&stored),
            GetOutcome::NotModified(_) => match prev {
                Some(prev) => Ok(prev.clone()),
                None => Err(not_found::<T>(id)),
            },
            GetOutcome::Missing => Err(not_found::<T>(id)),
        }
    }

    pub async fn replace<T: Resource>(
        &self,
        id: &str,
        object: &T,
        opts: Option<UpdateOpts<'_, T>>,
    ) -> Result<Document<T>, ClientError> {
        let snapshot = snapshot_of(opts.and_then(|o| o.prev));
        let stored = self
            .handlers
            .replace
            .handle(
                T::TYPE_NAME,
                id,
                serde_json::to_value(object)?,
                snapshot.as_ref(),
            )
            .await?;
        decode(&stored)
    }

    /// Merge the fields set in `patch` into the stored object.
    pub async fn update<T: Resource, P: Serialize>(
        &self,
        id: &str,
        patch: &P,
        opts: Option<UpdateOpts<'_, T>>,
    ) -> Result<Document<T>, ClientError> {
        let snapshot = snapshot_of(opts.and_then(|o| o.prev));
        let stored = self
            .handlers
            .update
            .handle(
                T::TYPE_NAME,
                id,
                serde_json::to_value(patch)?,
                snapshot.as_ref(),
            )
            .await?;
        decode(&stored)
    }

    pub async fn delete<T: Resource>(
        &self,
        id: &str,
        opts: Option<UpdateOpts<'_, T>>,
    ) -> Result<(), ClientError> {
        let snapshot = snapshot_of(opts.and_then(|o| o.prev));
        self.handlers
            .delete
            .handle(T::TYPE_NAME, id, snapshot.as_ref())
            .await?;
        Ok(())
    }

    pub async fn list<T: Resource>(&self, opts: &ListOpts) -> Result<Vec<Document<T>>, ClientError> {
        let stored = self.handlers.list.handle(T::TYPE_NAME, opts).await?;
        decode_all(&stored)
    }

    /// Like `list`, but hands back `prev` when the result holds the same
    /// revisions in the same order.
    pub async fn list_with_prev<T: Resource>(
        &self,
        opts: &ListOpts,
        prev: &[Document<T>],
    ) -> Result<Vec<Document<T>>, ClientError> {
        let stored = self.handlers.list.handle(T::TYPE_NAME, opts).await?;
        if is_current(prev, &stored) {
            return Ok(prev.to_vec());
        }
        decode_all(&stored)
    }

    /// Follow one object. The first `next` yields the current revision (or
    /// `prev`, if still current); later calls wait for newer revisions.
    pub async fn stream_get<T: Resource>(
        &self,
        id: &str,
        opts: Option<GetOpts<'_, T>>,
    ) -> Result<DocumentStream<TStore, T>, ClientError> {
        let inner = self.handlers.stream_get.handle(T::TYPE_NAME, id).await?;
        Ok(DocumentStream {
            inner,
            prev: opts.and_then(|o| o.prev).filter(|p| p.id() == id).cloned(),
        })
    }

    /// Follow a list query. The first `next` yields the current result (or
    /// `prev`, if still current); later calls wait until a write changes it.
    pub async fn stream_list<T: Resource>(
        &self,
        opts: ListOpts,
        prev: Option<&[Document<T>]>,
    ) -> Result<DocumentListStream<TStore, T>, ClientError> {
        let inner = self.handlers.stream_list.handle(T::TYPE_NAME, opts).await?;
        Ok(DocumentListStream {
            inner,
            prev: prev.map(<[Document<T>]>::to_vec),
        })
    }

    /// Look up the single object whose id starts with `short_id`.
    pub async fn find<T: Resource>(&self, short_id: &str) -> Result<Document<T>, ClientError> {
        let opts = ListOpts {
            filters: vec![Filter::new("id", FilterOp::HasPrefix, short_id)],
            limit: Some(2),
            ..Default::default()
        };
        let mut found = self.list::<T>(&opts).await?;
        if found.len() != 1 {
            return Err(ClientError::NotUnique {
                type_name: T::TYPE_NAME,
                short_id: short_id.to_string(),
                matches: found.len(),
            });
        }
        Ok(found.remove(0))
    }
}

fn not_found<T: Resource>(id: &str) -> ClientError {
    ApplicationError::from(DecideError::NotFound {
        type_name: T::TYPE_NAME.to_string(),
        id: id.to_string(),
    })
    .into()
}

pub struct DocumentStream<TStore, T>
where
    TStore: ObjectStore + 'static,
{
    inner: ObjectStream<TStore>,
    prev: Option<Document<T>>,
}

impl<TStore, T> DocumentStream<TStore, T>
where
    TStore: ObjectStore + 'static,
    T: Resource,
{
    /// Fails with NotFound once the object is deleted.
    pub async fn next(&mut self) -> Result<Document<T>, ClientError> {
        let stored = self.inner.next().await?;
        if let Some(prev) = self.prev.take() {
            if prev.metadata.generation == stored.metadata.generation {
                return Ok(prev);
            }
        }
        decode(&stored)
    }
}

pub struct DocumentListStream<TStore, T>
where
    TStore: ObjectStore + 'static,
{
    inner: ListStream<TStore>,
    prev: Option<Vec<Document<T>>>,
}

impl<TStore, T> DocumentListStream<TStore, T>
where
    TStore: ObjectStore + 'static,
    T: Resource,
{
    pub async fn next(&mut self) -> Result<Vec<Document<T>>, ClientError> {
        let stored = self.inner.next().await?;
        if let Some(prev) = self.prev.take() {
            if is_current(&prev, &stored) {
                return Ok(prev);
            }
        }
        decode_all(&stored)
    }
}
