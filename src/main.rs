use sesg_portal::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    store::{FallbackStore, PostgresStore, StoreState},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point for the application, responsible for initializing
/// all core components: Configuration, Logging, Document Store, and the HTTP Server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    // AppConfig::load() implements the fail-fast principle for missing Production secrets.
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Sets the default log level. It prioritizes the RUST_LOG environment variable,
    // falling back to sensible defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sesg_portal=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment (Production Observability)
    // The structured logging format is dynamically selected based on the APP_ENV.
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability during local debugging.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by centralized log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Document Store Initialization (Postgres)
    // The pool connects lazily: a database that is down at startup keeps the
    // service alive, with reads answered by the in-memory fallback until the
    // database returns.
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy(&config.db_url)
        .expect("FATAL: DATABASE_URL could not be parsed.");

    let postgres = PostgresStore::new(pool);
    if let Err(e) = postgres.ensure_schema().await {
        tracing::warn!(
            "schema init failed, serving reads from the in-memory fallback: {:?}",
            e
        );
    }

    // Wrap the primary store with the fallback composition and share it.
    let store = Arc::new(FallbackStore::new(Arc::new(postgres))) as StoreState;

    // 5. Unified State Assembly
    // Bundles all initialized dependencies into the shared AppState.
    let app_state = AppState { store, config };

    // 6. Router and Server Startup
    let app = create_router(app_state);

    // Binds the TCP listener and initiates the HTTP server.
    let listener = TcpListener::bind("0.0.0.0:8001").await.unwrap();

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on 0.0.0.0:8001");
    tracing::info!("API Documentation (Swagger UI) available at: http://localhost:8001/swagger-ui");

    // The long-running Axum server process.
    axum::serve(listener, app).await.unwrap();
}
