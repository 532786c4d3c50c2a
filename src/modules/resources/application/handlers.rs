use crate::modules::resources::core::registry::ResourceRegistry;
use crate::modules::resources::use_cases::create_resource::handler::CreateResourceHandler;
use crate::modules::resources::use_cases::delete_resource::handler::DeleteResourceHandler;
use crate::modules::resources::use_cases::get_resource::handler::GetResourceHandler;
use crate::modules::resources::use_cases::list_resources::handler::ListResourcesHandler;
use crate::modules::resources::use_cases::replace_resource::handler::ReplaceResourceHandler;
use crate::modules::resources::use_cases::stream_get_resource::handler::StreamGetResourceHandler;
use crate::modules::resources::use_cases::stream_list_resources::handler::StreamListResourcesHandler;
use crate::modules::resources::use_cases::update_resource::handler::UpdateResourceHandler;
use crate::shared::infrastructure::object_store::ObjectStore;
use std::sync::Arc;

/// Every resource use case wired to the same registry and store.
pub struct ResourceHandlers<TStore>
where
    TStore: ObjectStore + 'static,
{
    pub registry: Arc<ResourceRegistry>,
    pub create: CreateResourceHandler<TStore>,
    pub get: GetResourceHandler<TStore>,
    pub replace: ReplaceResourceHandler<TStore>,
    pub update: UpdateResourceHandler<TStore>,
    pub delete: DeleteResourceHandler<TStore>,
    pub list: ListResourcesHandler<TStore>,
    pub stream_get: StreamGetResourceHandler<TStore>,
    pub stream_list: StreamListResourcesHandler<TStore>,
}

impl<TStore> ResourceHandlers<TStore>
where
    TStore: ObjectStore + 'static,
{
    pub fn new(registry: Arc<ResourceRegistry>, store: Arc<TStore>, max_write_attempts: u32) -> Self {
        Self {
            create: CreateResourceHandler::new(registry.clone(), store.clone()),
            get: GetResourceHandler::new(registry.clone(), store.clone()),
            replace: ReplaceResourceHandler::new(registry.clone(), store.clone(), max_write_attempts),
            update: UpdateResourceHandler::new(registry.clone(), store.clone(), max_write_attempts),
            delete: DeleteResourceHandler::new(registry.clone(), store.clone(), max_write_attempts),
            list: ListResourcesHandler::new(registry.clone(), store.clone()),
            stream_get: StreamGetResourceHandler::new(registry.clone(), store.clone()),
            stream_list: StreamListResourcesHandler::new(registry.clone(), store),
            registry,
        }
    }
}
