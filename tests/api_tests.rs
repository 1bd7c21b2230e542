use sesg_portal::{
    AppConfig, AppState, MemoryStore, create_router,
    models::{Person, TokenResponse},
    store::StoreState,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

/// Spins up the full router on an ephemeral port, backed by the in-memory
/// store so the suite runs hermetically.
async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::new()) as StoreState;
    let config = AppConfig::default();

    let state = AppState { store, config };
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

async fn login(app: &TestApp, client: &reqwest::Client) -> String {
    let config = AppConfig::default();
    let response = client
        .post(format!("{}/api/auth/login", app.address))
        .json(&serde_json::json!({
            "username": config.admin_username,
            "password": config.admin_password,
        }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(response.status(), 200);

    let token: TokenResponse = response.json().await.unwrap();
    assert_eq!(token.token_type, "bearer");
    assert_eq!(token.user_role, "admin");
    token.access_token
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/auth/login", app.address))
        .json(&serde_json::json!({ "username": "admin", "password": "wrong" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_mutation_requires_token() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // No Authorization header at all.
    let response = client
        .post(format!("{}/api/people", app.address))
        .json(&serde_json::json!({ "name": "Ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // A forged token must fail the same way.
    let response = client
        .post(format!("{}/api/people", app.address))
        .bearer_auth("forged.token.value")
        .json(&serde_json::json!({ "name": "Ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Neither attempt may have mutated the store.
    let list: Vec<Person> = client
        .get(format!("{}/api/people", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_person_lifecycle() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&app, &client).await;

    // Create
    let response = client
        .post(format!("{}/api/people", app.address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "name": "Dr. Shameem Ahmad",
            "title": "Associate Professor",
            "category": "advisors",
            "research_interests": ["Microgrids", "Smart Grid Technologies"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let person: Person = response.json().await.unwrap();
    assert_eq!(person.name, "Dr. Shameem Ahmad");

    // Read back through the filtered listing
    let advisors: Vec<Person> = client
        .get(format!("{}/api/people?category=advisors", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(advisors.len(), 1);
    assert_eq!(advisors[0].id, person.id);

    // Update
    let response = client
        .put(format!("{}/api/people/{}", app.address, person.id))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "title": "Professor" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let updated: Person = response.json().await.unwrap();
    assert_eq!(updated.title.as_deref(), Some("Professor"));
    assert_eq!(updated.name, "Dr. Shameem Ahmad");

    // Delete
    let response = client
        .delete(format!("{}/api/people/{}", app.address, person.id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Gone
    let response = client
        .get(format!("{}/api/people/{}", app.address, person.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_update_missing_record_is_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&app, &client).await;

    let response = client
        .put(format!(
            "{}/api/projects/{}",
            app.address,
            uuid::Uuid::new_v4()
        ))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "status": "completed" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_settings_round_trip() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&app, &client).await;

    // Starts empty.
    let settings: serde_json::Value = client
        .get(format!("{}/api/settings", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(settings, serde_json::json!({}));

    // Merge twice; the first key must survive the second write.
    let response = client
        .put(format!("{}/api/settings", app.address))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "site_name": "SESG Research Group" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    client
        .put(format!("{}/api/settings", app.address))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "contact_email": "info@sesgrg.com" }))
        .send()
        .await
        .unwrap();

    let settings: serde_json::Value = client
        .get(format!("{}/api/settings", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(settings["site_name"], "SESG Research Group");
    assert_eq!(settings["contact_email"], "info@sesgrg.com");
}

#[tokio::test]
async fn test_dashboard_stats_requires_token() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/dashboard/stats", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let token = login(&app, &client).await;
    let response = client
        .get(format!("{}/api/dashboard/stats", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}
