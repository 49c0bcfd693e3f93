use std::sync::Arc;

use anyhow::Context;
use storage::Database;
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod routes;
mod sanitize;
mod state;
mod validation;

#[cfg(test)]
mod test_support;

use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::categories::handlers::list_categories,
        features::categories::handlers::get_category,
        features::categories::handlers::create_category,
        features::categories::handlers::update_category,
        features::categories::handlers::delete_category,
        features::products::handlers::list_products,
        features::products::handlers::get_product,
        features::products::handlers::create_product,
        features::products::handlers::update_product,
        features::products::handlers::delete_product,
    ),
    components(
        schemas(
            features::categories::requests::CreateCategoryRequest,
            features::categories::requests::RenameCategoryBody,
            features::products::requests::CreateProductRequest,
            features::products::requests::UpdateProductBody,
            storage::models::Category,
            storage::models::CategoryDetail,
            storage::models::CategoryRef,
            storage::models::Product,
            storage::dto::common::MessageResponse,
            validation::FieldError,
            validation::ValidationFailure,
        )
    ),
    tags(
        (name = "categories", description = "Category endpoints"),
        (name = "products", description = "Product endpoints"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting catalog API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let app = routes::router(AppState::new(Arc::new(db)));

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
