use anyhow::Context;
use resource_store::modules::resources::application::handlers::ResourceHandlers;
use resource_store::modules::resources::core::registry::ResourceRegistry;
use resource_store::modules::resources::core::test_type::TestType;
use resource_store::shared::infrastructure::object_store::in_memory::InMemoryObjectStore;
use resource_store::shell::config::Settings;
use resource_store::shell::http::router;
use resource_store::shell::state::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().context("failed to load settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level)),
        )
        .init();

    let registry = Arc::new(ResourceRegistry::new().register::<TestType>());
    let store = Arc::new(InMemoryObjectStore::new());
    let state = AppState {
        handlers: Arc::new(ResourceHandlers::new(
            registry.clone(),
            store,
            settings.store.max_write_attempts,
        )),
    };

    let address = settings.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    tracing::info!(
        %address,
        types = ?registry.names().collect::<Vec<_>>(),
        "resource store listening"
    );

    axum::serve(listener, router(state))
        .await
        .context("server error")?;

    Ok(())
}
