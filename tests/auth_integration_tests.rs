use axum::{
    extract::FromRequestParts,
    http::{Method, Request, Uri, header, request::Parts},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use sesg_portal::{
    AppState,
    auth::{AuthUser, Claims, issue_token},
    config::AppConfig,
    error::ApiError,
    store::MemoryStore,
};
use std::{sync::Arc, time::SystemTime};

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "super-secure-test-secret-value-local";

/// Signs a token directly (bypassing the issuer) so tests can control the
/// secret, role and expiry offset independently.
fn create_token(secret: &str, role: &str, exp_offset: i64) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: "admin".to_string(),
        role: role.to_string(),
        iat: now as usize,
        exp: (now + exp_offset) as usize,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn create_app_state() -> AppState {
    AppState {
        store: Arc::new(MemoryStore::new()),
        config: AppConfig::default(),
    }
}

/// Helper to get the mutable Parts struct from a generated Request
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

fn bearer_parts(token: &str) -> Parts {
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    parts
}

// --- Issuer Tests ---

#[test]
fn test_issue_token_with_valid_credentials() {
    let config = AppConfig::default();

    let token = issue_token(&config.admin_username, &config.admin_password, &config)
        .expect("valid credentials must yield a token");

    // The issued token must decode back to the admin role with the same secret.
    let decoded = jsonwebtoken::decode::<Claims>(
        &token,
        &jsonwebtoken::DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &jsonwebtoken::Validation::default(),
    )
    .expect("issued token must validate");

    assert_eq!(decoded.claims.role, "admin");
    assert_eq!(decoded.claims.sub, config.admin_username);
    assert!(decoded.claims.exp > decoded.claims.iat);
}

#[test]
fn test_issue_token_rejects_wrong_password() {
    let config = AppConfig::default();

    let result = issue_token(&config.admin_username, "not-the-password", &config);

    assert!(matches!(result, Err(ApiError::InvalidCredentials)));
}

#[test]
fn test_issue_token_rejects_unknown_username() {
    let config = AppConfig::default();

    let result = issue_token("intruder", &config.admin_password, &config);

    assert!(matches!(result, Err(ApiError::InvalidCredentials)));
}

// --- Extractor Tests ---

#[tokio::test]
async fn test_auth_success_with_issued_token() {
    let app_state = create_app_state();
    let token = issue_token(
        &app_state.config.admin_username,
        &app_state.config.admin_password,
        &app_state.config,
    )
    .unwrap();

    let mut parts = bearer_parts(&token);
    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_ok());
    let user = auth_user.unwrap();
    assert_eq!(user.username, app_state.config.admin_username);
    assert_eq!(user.role, "admin");
}

#[tokio::test]
async fn test_auth_failure_with_missing_header() {
    let app_state = create_app_state();

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(matches!(auth_user, Err(ApiError::InvalidToken)));
}

#[tokio::test]
async fn test_auth_failure_with_non_bearer_header() {
    let app_state = create_app_state();

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_static("Basic YWRtaW46cGFzcw=="),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(matches!(auth_user, Err(ApiError::InvalidToken)));
}

#[tokio::test]
async fn test_auth_failure_with_expired_token() {
    let app_state = create_app_state();
    // Expired five minutes ago, safely beyond the default validation leeway.
    let token = create_token(TEST_JWT_SECRET, "admin", -300);

    let mut parts = bearer_parts(&token);
    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(matches!(auth_user, Err(ApiError::InvalidToken)));
}

#[tokio::test]
async fn test_auth_failure_with_wrong_signature() {
    let app_state = create_app_state();
    let token = create_token("a-completely-different-secret", "admin", 3600);

    let mut parts = bearer_parts(&token);
    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(matches!(auth_user, Err(ApiError::InvalidToken)));
}

#[tokio::test]
async fn test_auth_failure_with_garbage_token() {
    let app_state = create_app_state();

    let mut parts = bearer_parts("not.a.jwt");
    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(matches!(auth_user, Err(ApiError::InvalidToken)));
}

#[tokio::test]
async fn test_auth_preserves_role_claim() {
    // The extractor resolves whatever role is signed into the token; the
    // admin check itself lives in the handlers.
    let app_state = create_app_state();
    let token = create_token(TEST_JWT_SECRET, "viewer", 3600);

    let mut parts = bearer_parts(&token);
    let user = AuthUser::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();

    assert_eq!(user.role, "viewer");
}
