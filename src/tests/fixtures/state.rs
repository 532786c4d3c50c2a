use crate::modules::resources::application::handlers::ResourceHandlers;
use crate::shared::infrastructure::object_store::in_memory::InMemoryObjectStore;
use crate::shell::state::AppState;
use crate::tests::fixtures::registry::test_registry;
use std::sync::Arc;

pub fn make_test_state() -> AppState {
    let store = Arc::new(InMemoryObjectStore::new());
    AppState {
        handlers: Arc::new(ResourceHandlers::new(test_registry(), store, 3)),
    }
}

pub fn make_offline_object_store_state() -> AppState {
    let mut store = InMemoryObjectStore::new();
    store.toggle_offline();
    AppState {
        handlers: Arc::new(ResourceHandlers::new(test_registry(), Arc::new(store), 3)),
    }
}
