use axum::{
    Json,
    extract::{Path, Query, State},
};
use sesg_portal::{
    AppState,
    auth::AuthUser,
    config::AppConfig,
    error::ApiError,
    handlers,
    models::{
        CreateEventRequest, CreateNewsRequest, CreatePersonRequest, CreatePublicationRequest,
        SiteSettings, UpdatePersonRequest,
    },
    store::MemoryStore,
};
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

// --- Test Utilities ---

fn create_test_state() -> AppState {
    AppState {
        store: Arc::new(MemoryStore::new()),
        config: AppConfig::default(),
    }
}

fn admin_user() -> AuthUser {
    AuthUser {
        username: "admin".to_string(),
        role: "admin".to_string(),
    }
}

/// A syntactically valid token identity whose role claim does not grant admin
/// access. Handlers must reject it with Forbidden.
fn viewer_user() -> AuthUser {
    AuthUser {
        username: "admin".to_string(),
        role: "viewer".to_string(),
    }
}

fn person_payload(name: &str, category: &str) -> CreatePersonRequest {
    CreatePersonRequest {
        name: name.to_string(),
        category: Some(category.to_string()),
        ..CreatePersonRequest::default()
    }
}

fn publication_payload(title: &str, year: i32) -> CreatePublicationRequest {
    CreatePublicationRequest {
        title: title.to_string(),
        authors: vec!["Ahmad, S.".to_string()],
        publication_type: Some("journal".to_string()),
        year,
        ..CreatePublicationRequest::default()
    }
}

// --- CRUD Round Trips ---

#[tokio::test]
async fn test_create_person_then_get_round_trips() {
    let state = create_test_state();

    let Json(created) = handlers::create_person(
        admin_user(),
        State(state.clone()),
        Json(person_payload("Dr. Shameem Ahmad", "advisors")),
    )
    .await
    .unwrap();

    assert_eq!(created.name, "Dr. Shameem Ahmad");
    assert_ne!(created.id, Uuid::nil());

    let Json(fetched) = handlers::get_person(State(state), Path(created.id))
        .await
        .unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.category.as_deref(), Some("advisors"));
}

#[tokio::test]
async fn test_get_person_not_found() {
    let state = create_test_state();
    let result = handlers::get_person(State(state), Path(Uuid::new_v4())).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_update_person_merges_partial_payload() {
    let state = create_test_state();
    let Json(created) = handlers::create_person(
        admin_user(),
        State(state.clone()),
        Json(person_payload("Dr. Amirul Islam", "advisors")),
    )
    .await
    .unwrap();

    let update = UpdatePersonRequest {
        title: Some("Assistant Professor".to_string()),
        ..UpdatePersonRequest::default()
    };
    let Json(updated) = handlers::update_person(
        admin_user(),
        State(state),
        Path(created.id),
        Json(update),
    )
    .await
    .unwrap();

    // Only the provided field changed.
    assert_eq!(updated.title.as_deref(), Some("Assistant Professor"));
    assert_eq!(updated.name, "Dr. Amirul Islam");
    assert_eq!(updated.category.as_deref(), Some("advisors"));
}

#[tokio::test]
async fn test_delete_person_then_get_not_found() {
    let state = create_test_state();
    let Json(created) = handlers::create_person(
        admin_user(),
        State(state.clone()),
        Json(person_payload("Temp", "alumni")),
    )
    .await
    .unwrap();

    let Json(confirmation) =
        handlers::delete_person(admin_user(), State(state.clone()), Path(created.id))
            .await
            .unwrap();
    assert!(confirmation.message.contains("deleted"));

    let result = handlers::get_person(State(state), Path(created.id)).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_missing_person_not_found() {
    let state = create_test_state();
    let result = handlers::delete_person(admin_user(), State(state), Path(Uuid::new_v4())).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

// --- Authorization ---

#[tokio::test]
async fn test_mutations_forbidden_without_admin_role() {
    let state = create_test_state();

    let result = handlers::create_person(
        viewer_user(),
        State(state.clone()),
        Json(person_payload("Sneaky", "advisors")),
    )
    .await;
    assert!(matches!(result, Err(ApiError::Forbidden)));

    // The rejected mutation must not have touched the store.
    let Json(people) = handlers::get_people(
        State(state),
        Query(handlers::PeopleFilter { category: None }),
    )
    .await
    .unwrap();
    assert!(people.is_empty());
}

#[tokio::test]
async fn test_dashboard_stats_forbidden_without_admin_role() {
    let state = create_test_state();
    let result = handlers::get_dashboard_stats(viewer_user(), State(state)).await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
}

// --- Filters ---

#[tokio::test]
async fn test_people_filtered_by_category() {
    let state = create_test_state();
    for (name, category) in [
        ("A", "advisors"),
        ("B", "team_members"),
        ("C", "advisors"),
    ] {
        handlers::create_person(
            admin_user(),
            State(state.clone()),
            Json(person_payload(name, category)),
        )
        .await
        .unwrap();
    }

    let Json(advisors) = handlers::get_people(
        State(state),
        Query(handlers::PeopleFilter {
            category: Some("advisors".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(advisors.len(), 2);
    assert!(
        advisors
            .iter()
            .all(|p| p.category.as_deref() == Some("advisors"))
    );
}

#[tokio::test]
async fn test_publications_filtered_by_year() {
    let state = create_test_state();
    for (title, year) in [("Old", 2022), ("New", 2024), ("Newer", 2024)] {
        handlers::create_publication(
            admin_user(),
            State(state.clone()),
            Json(publication_payload(title, year)),
        )
        .await
        .unwrap();
    }

    let Json(found) = handlers::get_publications(
        State(state),
        Query(handlers::PublicationFilter {
            publication_type: None,
            year: Some(2024),
            research_area: None,
            search: None,
            limit: None,
        }),
    )
    .await
    .unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|p| p.year == 2024));
}

#[tokio::test]
async fn test_publications_search_matches_title_and_authors() {
    let state = create_test_state();
    handlers::create_publication(
        admin_user(),
        State(state.clone()),
        Json(publication_payload("Smart Grid Stability", 2024)),
    )
    .await
    .unwrap();
    handlers::create_publication(
        admin_user(),
        State(state.clone()),
        Json(publication_payload("Microgrid Economics", 2024)),
    )
    .await
    .unwrap();

    let Json(found) = handlers::get_publications(
        State(state),
        Query(handlers::PublicationFilter {
            publication_type: None,
            year: None,
            research_area: None,
            search: Some("smart grid".to_string()),
            limit: None,
        }),
    )
    .await
    .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Smart Grid Stability");
}

#[tokio::test]
async fn test_news_featured_filter_and_limit() {
    let state = create_test_state();
    for (title, featured) in [("F1", true), ("Plain", false), ("F2", true), ("F3", true)] {
        handlers::create_news(
            admin_user(),
            State(state.clone()),
            Json(CreateNewsRequest {
                title: title.to_string(),
                content: "body".to_string(),
                is_featured: featured,
                ..CreateNewsRequest::default()
            }),
        )
        .await
        .unwrap();
    }

    let Json(found) = handlers::get_news(
        State(state),
        Query(handlers::NewsFilter {
            featured: Some(true),
            category: None,
            status: None,
            limit: Some(2),
        }),
    )
    .await
    .unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|n| n.is_featured));
}

#[tokio::test]
async fn test_events_upcoming_filter() {
    let state = create_test_state();
    for (title, offset_days) in [("Past Workshop", -30), ("Future Seminar", 30)] {
        handlers::create_event(
            admin_user(),
            State(state.clone()),
            Json(CreateEventRequest {
                title: title.to_string(),
                start_date: Utc::now() + Duration::days(offset_days),
                ..CreateEventRequest::default()
            }),
        )
        .await
        .unwrap();
    }

    let Json(upcoming) = handlers::get_events(
        State(state),
        Query(handlers::EventFilter {
            upcoming: Some(true),
        }),
    )
    .await
    .unwrap();

    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].title, "Future Seminar");
}

// --- Settings & Stats ---

#[tokio::test]
async fn test_settings_merge_preserves_existing_keys() {
    let state = create_test_state();

    let first = SiteSettings(
        json!({ "site_name": "SESG", "contact_email": "info@sesgrg.com" })
            .as_object()
            .unwrap()
            .clone(),
    );
    handlers::update_settings(admin_user(), State(state.clone()), Json(first))
        .await
        .unwrap();

    let second = SiteSettings(
        json!({ "contact_email": "hello@sesgrg.com" })
            .as_object()
            .unwrap()
            .clone(),
    );
    handlers::update_settings(admin_user(), State(state.clone()), Json(second))
        .await
        .unwrap();

    let Json(settings) = handlers::get_settings(State(state)).await.unwrap();
    assert_eq!(settings.0.get("site_name"), Some(&json!("SESG")));
    assert_eq!(
        settings.0.get("contact_email"),
        Some(&json!("hello@sesgrg.com"))
    );
}

#[tokio::test]
async fn test_settings_empty_by_default() {
    let state = create_test_state();
    let Json(settings) = handlers::get_settings(State(state)).await.unwrap();
    assert!(settings.0.is_empty());
}

#[tokio::test]
async fn test_dashboard_stats_counts_collections() {
    let state = create_test_state();
    handlers::create_person(
        admin_user(),
        State(state.clone()),
        Json(person_payload("One", "advisors")),
    )
    .await
    .unwrap();
    handlers::create_publication(
        admin_user(),
        State(state.clone()),
        Json(publication_payload("P", 2024)),
    )
    .await
    .unwrap();

    let Json(stats) = handlers::get_dashboard_stats(admin_user(), State(state))
        .await
        .unwrap();

    assert_eq!(stats.total_people, 1);
    assert_eq!(stats.total_publications, 1);
    assert_eq!(stats.total_projects, 0);
}
