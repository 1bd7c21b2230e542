use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::{config::AppConfig, error::ApiError};

/// Claims
///
/// Represents the payload structure carried inside the bearer token (JWT).
/// These claims are signed with the server's secret and validated upon every
/// protected request. Tokens are stateless: there is no revocation list, they
/// simply stop validating once `exp` passes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the admin username the token was issued to.
    pub sub: String,
    /// Role claim. The issuer only ever produces "admin".
    pub role: String,
    /// Expiration Time (exp): Timestamp after which the token must not be accepted.
    pub exp: usize,
    /// Issued At (iat): Timestamp when the token was issued.
    pub iat: usize,
}

/// issue_token
///
/// The token issuer: succeeds only if the submitted credentials equal the one
/// configured admin identity, and on success signs an HS256 token embedding
/// {sub, role="admin", exp = now + configured window}. Anything else fails with
/// `InvalidCredentials` — no lockout, no rate limiting, no refresh mechanism.
pub fn issue_token(username: &str, password: &str, config: &AppConfig) -> Result<String, ApiError> {
    if username != config.admin_username || password != config.admin_password {
        return Err(ApiError::InvalidCredentials);
    }

    let now = Utc::now().timestamp();
    let exp = now + config.token_expire_minutes * 60;

    let claims = Claims {
        sub: username.to_string(),
        role: "admin".to_string(),
        iat: now as usize,
        exp: exp as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|_| ApiError::TokenCreation)
}

/// AuthUser Extractor Result
///
/// This struct represents the resolved identity of an authenticated request.
/// Handlers use it to verify that the role claim grants admin access before
/// touching the store.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The username carried in the subject claim.
    pub username: String,
    /// The role claim, checked against "admin" by every mutating handler.
    pub role: String,
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a
/// function argument in any protected handler. This cleanly separates
/// authentication (extractor) from authorization and business logic (the
/// handler).
///
/// The process:
/// 1. Dependency Resolution: Accessing AppConfig from the application state.
/// 2. Token Extraction: Standard Bearer header parsing.
/// 3. Token Validation: signature + expiry via the shared secret.
///
/// Rejection: `ApiError::InvalidToken` (401) on any failure. There is no
/// database lookup — the only identity in the system is the configured admin,
/// and the signed role claim is the sole source of authorization.
impl<S> FromRequestParts<S> for AuthUser
where
    // S must allow sending across threads and sharing.
    S: Send + Sync,
    // Allows the extractor to pull the AppConfig (for the signing secret).
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // 1. Dependency Resolution
        let config = AppConfig::from_ref(state);

        // 2. Token Extraction
        // Attempt to retrieve the Authorization header and ensure it is prefixed with "Bearer ".
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::InvalidToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::InvalidToken)?;

        // 3. Decoding Setup
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::default();

        // Ensure expiration time validation is always active.
        validation.validate_exp = true;

        // 4. Decode and Validate the Token
        let token_data = match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(data) => data,
            Err(e) => {
                match e.kind() {
                    // Token expired: the most common failure for a valid-but-old token.
                    ErrorKind::ExpiredSignature => return Err(ApiError::InvalidToken),
                    // Catch all other failure types (bad signature, malformed token, etc.).
                    _ => return Err(ApiError::InvalidToken),
                }
            }
        };

        // Success: Return the resolved identity.
        Ok(AuthUser {
            username: token_data.claims.sub,
            role: token_data.claims.role,
        })
    }
}
