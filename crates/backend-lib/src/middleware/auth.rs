//! Bearer-token gate for protected routes.
//!
//! `Unauthenticated -> TokenPresented -> Authenticated`; any failed step
//! ends the request with 401 and is never retried.
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use metrics::counter;
use starboard_common::UserId;
use std::sync::Arc;

use crate::error::AuthError;
use crate::metrics::AUTH_REJECTED;
use crate::AppState;

/// Identity attached to an authenticated request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserId,
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::Unauthorized("missing authorization header"))?
        .to_str()
        .map_err(|_| AuthError::Unauthorized("malformed authorization header"))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthError::Unauthorized("malformed authorization header"))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::Unauthorized("unsupported authorization scheme"));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Unauthorized("empty bearer token"));
    }
    Ok(token)
}

/// Authentication middleware
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let verified = bearer_token(request.headers()).and_then(|token| state.auth.authenticate(token));

    let user_id = match verified {
        Ok(user_id) => user_id,
        Err(err) => {
            let err = err.into_unauthorized();
            counter!(AUTH_REJECTED).increment(1);
            tracing::info!(
                path = %request.uri().path(),
                reason = %err,
                "rejected unauthenticated request"
            );
            return Err(err);
        },
    };

    request.extensions_mut().insert(AuthContext { user_id });
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .ok_or(AuthError::Unauthorized("route is not behind require_auth"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Ok("abc"));
    }

    #[test]
    fn test_bearer_token_rejections() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::Unauthorized(_))
        ));
        for value in ["Bearer", "Bearer ", "Basic dXNlcjpwYXNz", "abc"] {
            assert!(
                matches!(bearer_token(&headers(value)), Err(AuthError::Unauthorized(_))),
                "{value}"
            );
        }
    }
}
