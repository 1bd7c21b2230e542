use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client
/// (anonymous or logged-in). The public website renders entirely from these
/// read-only listings; the only public mutation is the login gateway itself.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // Service banner, mirrored by uptime checks pointed at the bare domain.
        .route("/", get(handlers::root))
        // GET /api/health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        .route("/api/health", get(handlers::health_check))
        // POST /api/auth/login
        // The single-admin login. Issues the bearer token consumed by the admin routes.
        .route("/api/auth/login", post(handlers::login))
        // --- Collection Listings ---
        // Each listing supports its collection-specific query filters; detail
        // routes fetch one record by identifier.
        .route("/api/people", get(handlers::get_people))
        .route("/api/people/{id}", get(handlers::get_person))
        .route("/api/publications", get(handlers::get_publications))
        .route("/api/publications/{id}", get(handlers::get_publication))
        .route("/api/projects", get(handlers::get_projects))
        .route("/api/projects/{id}", get(handlers::get_project))
        .route("/api/achievements", get(handlers::get_achievements))
        .route("/api/achievements/{id}", get(handlers::get_achievement))
        .route("/api/news", get(handlers::get_news))
        .route("/api/news/{id}", get(handlers::get_news_item))
        .route("/api/events", get(handlers::get_events))
        .route("/api/events/{id}", get(handlers::get_event))
        .route("/api/photo-gallery", get(handlers::get_photos))
        .route("/api/photo-gallery/{id}", get(handlers::get_photo))
        .route("/api/research-areas", get(handlers::get_research_areas))
        .route("/api/research-areas/{id}", get(handlers::get_research_area))
        // GET /api/settings
        // The site-wide configuration singleton (footer text, contact info, ...).
        .route("/api/settings", get(handlers::get_settings))
}
