use crate::modules::resources::adapters::inbound::client::Client;
use crate::modules::resources::application::handlers::ResourceHandlers;
use crate::shared::infrastructure::object_store::in_memory::InMemoryObjectStore;
use crate::tests::fixtures::registry::test_registry;
use rstest::fixture;
use std::sync::Arc;

pub type TestClient = Client<InMemoryObjectStore>;

#[fixture]
pub fn test_client() -> TestClient {
    let store = Arc::new(InMemoryObjectStore::new());
    Client::new(Arc::new(ResourceHandlers::new(test_registry(), store, 3)))
}
