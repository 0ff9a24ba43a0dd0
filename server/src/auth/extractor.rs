use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::db::{get_identity_from_token, Identity};

/// Authenticated caller. Rejects the request with 401 when the token is missing or invalid.
pub struct AuthUser(pub Identity);

/// Caller identity on public routes. Missing or invalid tokens are treated as anonymous.
pub struct MaybeAuthUser(pub Option<Identity>);

#[derive(Debug)]
pub struct AuthError(pub &'static str);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Pull the bearer token out of the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError("Missing Authorization header"))?;
    let value = value
        .to_str()
        .map_err(|_| AuthError("Invalid Authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .ok_or(AuthError("Invalid Authorization header format"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        pool: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        get_identity_from_token(pool, token)
            .await
            .map(AuthUser)
            .ok_or(AuthError("Invalid or expired token"))
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        pool: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = match bearer_token(&parts.headers) {
            Ok(token) => get_identity_from_token(pool, token).await,
            Err(_) => None,
        };
        Ok(MaybeAuthUser(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(
            bearer_token(&headers).unwrap_err().0,
            "Missing Authorization header"
        );

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(
            bearer_token(&headers).unwrap_err().0,
            "Invalid Authorization header format"
        );

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc");
    }
}
