use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::auth::{Claims, JwtKeys};
use crate::error::ApiError;

/// Caller identity decoded from a verified bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub claims: Claims,
}

impl AuthUser {
    /// The `email` claim, when the token was issued for a user record
    pub fn email(&self) -> Option<&str> {
        self.claims.payload.get("email").and_then(|v| v.as_str())
    }
}

/// Pass/reject decision for a guarded request.
///
/// A missing `Authorization` header is 401; a header without a token segment or a
/// token failing verification is 403.
pub fn authorize(headers: &HeaderMap, keys: &JwtKeys) -> Result<AuthUser, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("unauthorized access"))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::forbidden("Invalid Authorization header format"))?;

    let token = value
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ApiError::forbidden("Authorization header must use Bearer token format"))?;

    let claims = keys.verify(token)?;
    Ok(AuthUser { claims })
}

/// Route layer guarding mutating routes; rejected requests never reach the handler
pub async fn require_bearer(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    match authorize(request.headers(), &state.keys) {
        Ok(user) => {
            tracing::debug!("Authorized {} {} for {:?}", request.method(), request.uri(), user.email());
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!("Rejected {} {}: {}", request.method(), request.uri(), err);
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use serde_json::json;

    fn keys() -> JwtKeys {
        JwtKeys::new("gate-secret", 1).unwrap()
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = authorize(&HeaderMap::new(), &keys()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn header_without_token_is_forbidden() {
        let err = authorize(&headers_with("Bearer"), &keys()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn bad_token_is_forbidden() {
        let err = authorize(&headers_with("Bearer not.a.token"), &keys()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn valid_token_passes_with_claims() {
        let keys = keys();
        let token = keys.issue(json!({"email": "reader@example.com"})).unwrap();
        let user = authorize(&headers_with(&format!("Bearer {token}")), &keys).unwrap();
        assert_eq!(user.email(), Some("reader@example.com"));
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let keys = keys();
        let token = keys.issue(json!({})).unwrap();
        assert!(authorize(&headers_with(&format!("Bearer   {token}")), &keys).is_ok());
    }
}
