// In memory implementation of the ObjectStore port.
//
// Purpose
// - Back the service and its tests without a database.
//
// Responsibilities
// - Store objects per type and id in memory.
// - Enforce optimistic concurrency by checking the expected generation under
//   the same write guard that performs the write.
// - Announce every committed write on a broadcast channel, still under that
//   guard, so subscribers see changes in commit order.

use crate::shared::infrastructure::object_store::{
    ObjectChange, ObjectStore, ObjectStoreError, StoredObject,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, broadcast};

type Key = (String, String);

const CHANGE_CAPACITY: usize = 256;

pub struct InMemoryObjectStore {
    inner: RwLock<HashMap<Key, StoredObject>>,
    changes: broadcast::Sender<ObjectChange>,
    is_offline: bool,
    delay_save_ms: AtomicU64,
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            inner: RwLock::default(),
            changes,
            is_offline: false,
            delay_save_ms: AtomicU64::new(0),
        }
    }
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Sleep before every save and remove, widening the gap between a
    /// handler's load and its write.
    pub fn set_delay_save_ms(&self, ms: u64) {
        self.delay_save_ms.store(ms, Ordering::Relaxed);
    }

    fn ensure_online(&self) -> Result<(), ObjectStoreError> {
        if self.is_offline {
            return Err(ObjectStoreError::Backend("Object store offline".into()));
        }
        Ok(())
    }

    fn announce(&self, type_name: &str, id: &str, generation: i64) {
        // No subscribers is not an error.
        let _ = self.changes.send(ObjectChange {
            type_name: type_name.to_string(),
            id: id.to_string(),
            generation,
        });
    }

    async fn delay(&self) {
        let ms = self.delay_save_ms.load(Ordering::Relaxed);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

fn key(type_name: &str, id: &str) -> Key {
    (type_name.to_string(), id.to_string())
}

#[async_trait::async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn load(
        &self,
        type_name: &str,
        id: &str,
    ) -> Result<Option<StoredObject>, ObjectStoreError> {
        self.ensure_online()?;
        Ok(self.inner.read().await.get(&key(type_name, id)).cloned())
    }

    async fn load_all(&self, type_name: &str) -> Result<Vec<StoredObject>, ObjectStoreError> {
        self.ensure_online()?;
        let guard = self.inner.read().await;
        Ok(guard
            .iter()
            .filter(|((t, _), _)| t == type_name)
            .map(|(_, object)| object.clone())
            .collect())
    }

    async fn save(
        &self,
        type_name: &str,
        expected_generation: i64,
        object: StoredObject,
    ) -> Result<(), ObjectStoreError> {
        self.ensure_online()?;
        self.delay().await;
        let mut g = self.inner.write().await;
        let k = key(type_name, &object.metadata.id);
        let actual = g.get(&k).map(|o| o.metadata.generation).unwrap_or(0);
        if actual != expected_generation {
            return Err(ObjectStoreError::GenerationMismatch {
                expected: expected_generation,
                actual,
            });
        }
        self.announce(type_name, &object.metadata.id, object.metadata.generation);
        g.insert(k, object);
        Ok(())
    }

    async fn remove(
        &self,
        type_name: &str,
        id: &str,
        expected_generation: i64,
    ) -> Result<(), ObjectStoreError> {
        self.ensure_online()?;
        self.delay().await;
        let mut g = self.inner.write().await;
        let k = key(type_name, id);
        let actual = g.get(&k).map(|o| o.metadata.generation).unwrap_or(0);
        if actual == 0 || actual != expected_generation {
            return Err(ObjectStoreError::GenerationMismatch {
                expected: expected_generation,
                actual,
            });
        }
        g.remove(&k);
        self.announce(type_name, id, 0);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ObjectChange> {
        self.changes.subscribe()
    }
}
