use crate::modules::resources::application::handlers::ResourceHandlers;
use crate::shared::infrastructure::object_store::in_memory::InMemoryObjectStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub handlers: Arc<ResourceHandlers<InMemoryObjectStore>>,
}
