use crate::modules::resources::core::registry::ResourceRegistry;
use crate::modules::resources::core::test_type::TestType;
use std::sync::Arc;

pub fn test_registry() -> Arc<ResourceRegistry> {
    Arc::new(ResourceRegistry::new().register::<TestType>())
}
