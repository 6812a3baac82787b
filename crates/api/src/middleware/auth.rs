//! Request identity extractor for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use newsroom_core::identity::Identity;

use crate::auth::jwt::validate_token;
use crate::state::AppState;

/// Cookie that carries the access token for browser clients.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// The actor behind the request.
///
/// Never rejects: a missing, malformed, or expired token yields
/// [`Identity::Anonymous`], so protected pages can redirect to the login page
/// instead of answering 401.
///
/// ```ignore
/// async fn my_handler(CurrentUser(actor): CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = ?actor.id(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = token_from_headers(&parts.headers) else {
            return Ok(CurrentUser(Identity::Anonymous));
        };

        match validate_token(&token, &state.config.jwt) {
            Ok(claims) => Ok(CurrentUser(claims.identity())),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid access token");
                Ok(CurrentUser(Identity::Anonymous))
            }
        }
    }
}

/// Bearer token from `Authorization`, falling back to the access-token cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == ACCESS_TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value storing `token` for `max_age_secs`.
pub fn access_token_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{ACCESS_TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// `Set-Cookie` value that clears the access-token cookie.
pub fn clear_access_token_cookie() -> String {
    format!("{ACCESS_TOKEN_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(COOKIE, HeaderValue::from_static("access_token=def"));
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn token_is_read_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; access_token=def; lang=ru"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("def"));
    }

    #[test]
    fn missing_or_malformed_credentials_yield_none() {
        assert_eq!(token_from_headers(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        headers.insert(COOKIE, HeaderValue::from_static("access_token="));
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        assert!(clear_access_token_cookie().contains("Max-Age=0"));
        assert!(access_token_cookie("t", 60).starts_with("access_token=t;"));
    }
}
