// src/bin/api_server.rs

use restaurant_hub::infra::{Config, StorageBackend};
use restaurant_hub::storage::{AnyStorage, MemoryStorage, PgStorage};
use restaurant_hub::transport;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

async fn open_storage(config: &Config) -> anyhow::Result<AnyStorage> {
    match (config.backend, config.database_url.as_deref()) {
        (StorageBackend::Postgres, Some(url)) => {
            tracing::info!(max_connections = config.max_connections, "> Connecting to Postgres...");
            let storage = PgStorage::connect(url, config.max_connections).await?;
            storage.apply_schema().await?;
            Ok(storage.into())
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL must be set for the postgres backend")
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("> Using in-memory storage; data is lost on shutdown");
            Ok(MemoryStorage::new().into())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // --- Storage Initialization ---
    let storage = open_storage(&config).await?;
    tracing::info!(backend = storage.backend(), "> Storage initialized");

    let app_state = transport::http::AppState::new(storage);

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("> API server listening on http://{}", config.bind_addr);
    tracing::info!("> Swagger UI available at http://{}/swagger-ui", config.bind_addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("> Shutdown signal received (Ctrl+C), stopping.");
        }
    }

    Ok(())
}
