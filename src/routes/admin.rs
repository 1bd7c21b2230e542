use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Admin Router Module
///
/// Defines every mutating route plus the dashboard statistics endpoint. The
/// routes share their paths with the public read endpoints (method-level
/// split), so this router is merged alongside the public one.
///
/// Access Control:
/// This entire router must be wrapped in a middleware layer that first
/// authenticates the request (using the `AuthUser` extractor). The handlers
/// then explicitly check for the `role="admin"` claim before touching the
/// store, so a valid token with any other role is rejected with 403.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /api/dashboard/stats
        // Per-collection record totals for the admin dashboard landing page.
        .route("/api/dashboard/stats", get(handlers::get_dashboard_stats))
        // PUT /api/settings
        // Merges keys into the settings singleton (never replaces it).
        .route("/api/settings", put(handlers::update_settings))
        // --- Collection Mutations ---
        .route("/api/people", post(handlers::create_person))
        .route(
            "/api/people/{id}",
            put(handlers::update_person).delete(handlers::delete_person),
        )
        .route("/api/publications", post(handlers::create_publication))
        .route(
            "/api/publications/{id}",
            put(handlers::update_publication).delete(handlers::delete_publication),
        )
        .route("/api/projects", post(handlers::create_project))
        .route(
            "/api/projects/{id}",
            put(handlers::update_project).delete(handlers::delete_project),
        )
        .route("/api/achievements", post(handlers::create_achievement))
        .route(
            "/api/achievements/{id}",
            put(handlers::update_achievement).delete(handlers::delete_achievement),
        )
        .route("/api/news", post(handlers::create_news))
        .route(
            "/api/news/{id}",
            put(handlers::update_news).delete(handlers::delete_news),
        )
        .route("/api/events", post(handlers::create_event))
        .route(
            "/api/events/{id}",
            put(handlers::update_event).delete(handlers::delete_event),
        )
        .route("/api/photo-gallery", post(handlers::create_photo))
        .route(
            "/api/photo-gallery/{id}",
            put(handlers::update_photo).delete(handlers::delete_photo),
        )
        .route("/api/research-areas", post(handlers::create_research_area))
        .route(
            "/api/research-areas/{id}",
            put(handlers::update_research_area).delete(handlers::delete_research_area),
        )
}
