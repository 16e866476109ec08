// SPDX-License-Identifier: MIT

//! Request authentication.
//!
//! Two interchangeable strategies resolve an opaque credential to a user id
//! before the controller runs:
//!
//! - **Header-trust** (`x-naive-auth`): the header's scalar value is taken as
//!   the user id, unverified. Local/testing use only.
//! - **Bearer token**: an HS256 JWT in the `Authorization` header; invalid or
//!   missing tokens short-circuit with 401 before any handler is invoked.
//!
//! Either way the controller only ever sees a pre-resolved [`Identity`].

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Header consulted by the header-trust strategy.
pub const NAIVE_AUTH_HEADER: &str = "x-naive-auth";

/// Why the header-trust strategy could not resolve a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthErrorCode {
    #[serde(rename = "AUTH_HEADER_MISSING_OR_EMPTY")]
    HeaderMissingOrEmpty,
    #[serde(rename = "AUTH_HEADER_INVALID_FORMAT")]
    HeaderInvalidFormat,
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthErrorCode::HeaderMissingOrEmpty => f.write_str("AUTH_HEADER_MISSING_OR_EMPTY"),
            AuthErrorCode::HeaderInvalidFormat => f.write_str("AUTH_HEADER_INVALID_FORMAT"),
        }
    }
}

/// Resolved caller identity, inserted into request extensions.
///
/// Exactly one of `user_id`/`error` is populated by the header-trust
/// strategy; the bearer strategy never produces an error here because it
/// rejects the request outright.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub user_id: Option<String>,
    pub error: Option<AuthErrorCode>,
}

impl Identity {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            error: None,
        }
    }

    fn failed(error: AuthErrorCode) -> Self {
        Self {
            user_id: None,
            error: Some(error),
        }
    }
}

/// Resolve the header-trust identity from request headers.
///
/// Multi-valued headers are rejected: the transport delivered a sequence
/// where a scalar was expected.
pub fn resolve_naive_identity(headers: &HeaderMap) -> Identity {
    let mut values = headers.get_all(NAIVE_AUTH_HEADER).iter();
    match (values.next(), values.next()) {
        (None, _) => Identity::failed(AuthErrorCode::HeaderMissingOrEmpty),
        (Some(_), Some(_)) => Identity::failed(AuthErrorCode::HeaderInvalidFormat),
        (Some(value), None) => match value.to_str() {
            Ok(user_id) if !user_id.is_empty() => Identity::user(user_id),
            Ok(_) => Identity::failed(AuthErrorCode::HeaderMissingOrEmpty),
            Err(_) => Identity::failed(AuthErrorCode::HeaderInvalidFormat),
        },
    }
}

/// Header-trust middleware: never rejects, the controller answers 401 when
/// no user could be resolved.
pub async fn naive_auth(mut request: Request, next: Next) -> Response {
    let identity = resolve_naive_identity(request.headers());
    request.extensions_mut().insert(identity);
    next.run(request).await
}

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Bearer-token middleware: requires a valid JWT and short-circuits with
/// 401 before the controller is invoked otherwise.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) if h.starts_with("Bearer ") => &h[7..],
        _ => return Err(StatusCode::UNAUTHORIZED),
    };

    let key = DecodingKey::from_secret(&state.config.jwt_signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data =
        decode::<Claims>(token, &key, &validation).map_err(|_| StatusCode::UNAUTHORIZED)?;

    request
        .extensions_mut()
        .insert(Identity::user(token_data.claims.sub));

    Ok(next.run(request).await)
}

/// Create a JWT for a user session.
pub fn create_jwt(user_id: &str, signing_key: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + 30 * 24 * 60 * 60, // 30 days
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_missing_header_yields_error_code() {
        let identity = resolve_naive_identity(&HeaderMap::new());
        assert!(identity.user_id.is_none());
        assert_eq!(identity.error, Some(AuthErrorCode::HeaderMissingOrEmpty));
    }

    #[test]
    fn test_empty_header_yields_error_code() {
        let mut headers = HeaderMap::new();
        headers.insert(NAIVE_AUTH_HEADER, HeaderValue::from_static(""));
        let identity = resolve_naive_identity(&headers);
        assert_eq!(identity.error, Some(AuthErrorCode::HeaderMissingOrEmpty));
    }

    #[test]
    fn test_scalar_header_becomes_user_id() {
        let mut headers = HeaderMap::new();
        headers.insert(NAIVE_AUTH_HEADER, HeaderValue::from_static("user-1"));
        let identity = resolve_naive_identity(&headers);
        assert_eq!(identity.user_id.as_deref(), Some("user-1"));
        assert!(identity.error.is_none());
    }

    #[test]
    fn test_multi_valued_header_is_invalid_format() {
        let mut headers = HeaderMap::new();
        headers.append(NAIVE_AUTH_HEADER, HeaderValue::from_static("user-1"));
        headers.append(NAIVE_AUTH_HEADER, HeaderValue::from_static("user-2"));
        let identity = resolve_naive_identity(&headers);
        assert_eq!(identity.error, Some(AuthErrorCode::HeaderInvalidFormat));
    }
}
