//! Optional single-user login guarding the `/api/v1` resource routes.
//!
//! The configured user logs in with an Argon2-hashed password and receives an
//! HS256 access token whose subject is the user name. Without an
//! [`AuthConfig`] the gate is open and `/auth/login` answers 404.

use std::sync::Arc;
use std::time::Duration;

use argon2::{
    password_hash::{Error as PasswordHashError, PasswordHash, PasswordVerifier},
    Argon2,
};
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::{error::ErrorBody, main_lib::AppState};

const TOKEN_TYPE: &str = "Bearer";

#[derive(Clone)]
pub struct AuthConfig {
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub jwt_secret: Vec<u8>,
    pub access_token_ttl: Duration,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Authentication is not configured for this server")]
    NotConfigured,
    #[error("{0}")]
    Internal(String),
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::NotConfigured => StatusCode::NOT_FOUND,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AuthError::Internal(msg) = &self {
            tracing::error!("Authentication error: {}", msg);
        }
        ErrorBody::new(status, self.to_string()).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Name of the logged-in user.
    sub: String,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub requires_password: bool,
}

pub struct AuthManager {
    username: String,
    password_hash: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> anyhow::Result<Self> {
        PasswordHash::new(&config.password_hash)
            .map_err(|e| anyhow::anyhow!("Invalid SH_AUTH_PASSWORD_HASH: {e}"))?;
        Ok(Self {
            username: config.username.clone(),
            password_hash: config.password_hash.clone(),
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation: Validation::new(Algorithm::HS256),
            token_ttl: config.access_token_ttl,
        })
    }

    /// The hash is verified even when the user name is wrong, so both
    /// failures cost the same.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let hash = PasswordHash::new(&self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {e}")))?;
        let password_matches = match Argon2::default().verify_password(password.as_bytes(), &hash)
        {
            Ok(()) => true,
            Err(PasswordHashError::Password) => false,
            Err(e) => return Err(AuthError::Internal(format!("Password check failed: {e}"))),
        };
        if password_matches && username.trim() == self.username {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub fn issue_token(&self) -> Result<LoginResponse, AuthError> {
        let issued_at = Utc::now().timestamp();
        let claims = Claims {
            sub: self.username.clone(),
            iat: issued_at,
            exp: issued_at + self.token_ttl.as_secs() as i64,
        };
        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))?;
        Ok(LoginResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: self.token_ttl.as_secs(),
        })
    }

    /// Returns the user a valid token was issued to.
    pub fn validate_token(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Rejected access token: {:?}", e.kind());
            AuthError::Unauthorized
        })?;
        if data.claims.sub != self.username {
            return Err(AuthError::Unauthorized);
        }
        Ok(data.claims.sub)
    }
}

/// The token of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(TOKEN_TYPE) && !token.is_empty()).then_some(token)
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 404, description = "Authentication disabled")
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let auth = state.auth.as_ref().ok_or(AuthError::NotConfigured)?;
    auth.verify_credentials(&payload.username, &payload.password)
        .inspect_err(|_| tracing::warn!("Failed login for user '{}'", payload.username))?;
    Ok(Json(auth.issue_token()?))
}

#[utoipa::path(get, path = "/api/v1/auth/status", responses((status = 200, body = AuthStatusResponse)))]
pub async fn auth_status(State(state): State<Arc<AppState>>) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        requires_password: state.auth.is_some(),
    })
}

pub async fn require_jwt(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    if let Some(auth) = state.auth.as_ref() {
        let token = bearer_token(request.headers()).ok_or(AuthError::Unauthorized)?;
        let user = auth.validate_token(token)?;
        tracing::debug!("{} {} by '{}'", request.method(), request.uri().path(), user);
    }
    Ok(next.run(request).await)
}
