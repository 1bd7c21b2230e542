use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

// Module for routing segregation (Public, Admin).
pub mod routes;
use auth::AuthUser; // The resolved authenticated admin identity.
use routes::{admin, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use config::AppConfig;
pub use error::ApiError;
pub use store::{FallbackStore, MemoryStore, PostgresStore, StoreState};

/// ApiDoc
///
/// This struct auto-generates the OpenAPI documentation (Swagger JSON) for the application.
/// It aggregates all API paths and data schemas that have been decorated with
/// the `#[utoipa::path]` and `#[derive(utoipa::ToSchema)]` macros.
/// The resulting JSON is served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    // List all public handler functions here for documentation generation.
    paths(
        handlers::root, handlers::health_check, handlers::login,
        handlers::get_dashboard_stats, handlers::get_settings, handlers::update_settings,
        handlers::get_people, handlers::get_person, handlers::create_person,
        handlers::update_person, handlers::delete_person,
        handlers::get_publications, handlers::get_publication, handlers::create_publication,
        handlers::update_publication, handlers::delete_publication,
        handlers::get_projects, handlers::get_project, handlers::create_project,
        handlers::update_project, handlers::delete_project,
        handlers::get_achievements, handlers::get_achievement, handlers::create_achievement,
        handlers::update_achievement, handlers::delete_achievement,
        handlers::get_news, handlers::get_news_item, handlers::create_news,
        handlers::update_news, handlers::delete_news,
        handlers::get_events, handlers::get_event, handlers::create_event,
        handlers::update_event, handlers::delete_event,
        handlers::get_photos, handlers::get_photo, handlers::create_photo,
        handlers::update_photo, handlers::delete_photo,
        handlers::get_research_areas, handlers::get_research_area,
        handlers::create_research_area, handlers::update_research_area,
        handlers::delete_research_area
    ),
    // List all models (schemas) used in the request/response bodies.
    components(
        schemas(
            models::LoginRequest, models::TokenResponse, models::MessageResponse,
            models::DashboardStats, models::SiteSettings, models::SocialLinks,
            models::Person, models::CreatePersonRequest, models::UpdatePersonRequest,
            models::Publication, models::CreatePublicationRequest, models::UpdatePublicationRequest,
            models::Project, models::CreateProjectRequest, models::UpdateProjectRequest,
            models::Achievement, models::CreateAchievementRequest, models::UpdateAchievementRequest,
            models::NewsItem, models::CreateNewsRequest, models::UpdateNewsRequest,
            models::Event, models::CreateEventRequest, models::UpdateEventRequest,
            models::Photo, models::CreatePhotoRequest, models::UpdatePhotoRequest,
            models::ResearchArea, models::CreateResearchAreaRequest, models::UpdateResearchAreaRequest,
        )
    ),
    tags(
        (name = "sesg-portal", description = "SESG Research Group CMS API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Implements the **Unified State Pattern**. This is the single, thread-safe, and immutable
/// container holding all essential application services and configuration.
/// The application state is shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Store Layer: Abstracts document collection access (Postgres with in-memory fallback).
    pub store: StoreState,
    /// Configuration: The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These implementations allow handlers to selectively pull components from the shared AppState.
// This is critical for dependency injection and keeping the extractor decoupled from handlers.

impl FromRef<AppState> for StoreState {
    fn from_ref(app_state: &AppState) -> StoreState {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// A middleware function that enforces authentication for the admin routes.
///
/// *Mechanism*: It attempts to extract `AuthUser` from the request. Since `AuthUser`
/// implements `FromRequestParts`, if authentication (bearer token validation) fails,
/// the extractor immediately rejects the request with a 401 Unauthorized status,
/// preventing execution of the handler. If successful, it allows the request to proceed.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and scoped middleware,
/// and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public Routes: No middleware applied.
        .merge(public::public_routes())
        // Admin Routes: Protected by the `auth_middleware`. The mutating methods
        // share their paths with the public read methods, so the two routers
        // merge at the method level.
        .merge(
            admin::admin_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        // Apply the Unified State to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: Generates a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: Wraps the entire request/response lifecycle in a tracing span.
                // Uses the `trace_span_logger` to include the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: Ensures the generated x-request-id header is
                // returned to the client and injected into subsequent service calls.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer (Applied last, allowing all traffic in/out after processing)
        .layer(cors)
}

/// trace_span_logger
///
/// Helper function used by `TraceLayer` to customize the tracing span creation.
/// It extracts the `x-request-id` header (if present) and includes it in the
/// structured logging metadata alongside the HTTP method and URI.
///
/// *Goal*: Ensure every log line for a single request is correlated by a unique ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    // The structured log format used by the tracing macros.
    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
