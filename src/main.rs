use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use drinks_api::api::{router, AppState};
use drinks_api::auth::{RemoteJwks, TokenValidator};
use drinks_api::config::{AppConfig, StoreKind};
use drinks_api::domain::repositories::DrinkRepository;
use drinks_api::infrastructure::repositories::{InMemoryDrinkRepository, PostgresDrinkRepository};
use drinks_api::infrastructure::schema;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::process::exit(1);
    });

    let drinks: Arc<dyn DrinkRepository> = match config.store {
        StoreKind::Postgres => {
            // Connect to database
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await
                .expect("Failed to connect to database");

            if config.reset_database {
                tracing::warn!("RESET_DATABASE set, dropping all drinks");
                schema::reset_with_seed(&pool)
                    .await
                    .expect("Failed to reset drink table");
            } else {
                schema::ensure_schema(&pool)
                    .await
                    .expect("Failed to create drink table");
            }

            tracing::info!("Database connected successfully");
            Arc::new(PostgresDrinkRepository::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory drink store, data is lost on exit");
            Arc::new(InMemoryDrinkRepository::new())
        }
    };

    // Signing keys are fetched from the identity provider on first use
    let keys = RemoteJwks::new(config.auth.jwks_url(), config.auth.jwks_timeout)
        .expect("Failed to build key set client")
        .with_refetch_cooldown(config.auth.jwks_refetch_cooldown);
    let validator = TokenValidator::new(
        &config.auth.issuer(),
        &config.auth.audience,
        config.auth.algorithms.clone(),
        Arc::new(keys),
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = router(AppState::new(drinks, Arc::new(validator))).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
