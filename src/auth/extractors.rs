use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
    response::Redirect,
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::cookies;

pub const SESSION_COOKIE: &str = "session";
pub const LOGIN_PATH: &str = "/login";

/// Logged-in user id, taken from the `session` cookie or a bearer token.
/// Anything else sends the client to the login page.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")));
        let Some(token) = bearer.or_else(|| cookies::get(&parts.headers, SESSION_COOKIE)) else {
            return Err(Redirect::to(LOGIN_PATH));
        };

        match JwtKeys::from_ref(state).verify(token) {
            Ok(claims) => Ok(AuthUser(claims.sub)),
            Err(e) => {
                warn!(error = %e, "invalid or expired session");
                Err(Redirect::to(LOGIN_PATH))
            }
        }
    }
}
