use crate::shared::infrastructure::object_store::in_memory::InMemoryObjectStore;
use crate::shared::infrastructure::object_store::{ObjectStore, StoredObject};
use serde_json::json;
use uuid::Uuid;

/// Put a TestType straight into the store, bypassing the handlers.
pub async fn stored_test_type(store: &InMemoryObjectStore, text: &str, num: i64) -> StoredObject {
    let object = StoredObject::first(
        Uuid::now_v7().to_string(),
        json!({"text": text, "num": num}),
    );
    store
        .save("testtype", 0, object.clone())
        .await
        .expect("fixture save failed");
    object
}
