use axum::{
    extract::{FromRef, State},
    http::header,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{AuthResponse, Credentials, LoginPage, PublicUser},
    extractors::{AuthUser, LOGIN_PATH, SESSION_COOKIE},
    jwt::JwtKeys,
    repo::User,
    services::{hash_password, is_valid_email, normalize_email, verify_password, MIN_PASSWORD_LEN},
};
use crate::{
    cookies,
    error::AppError,
    flash::{self, Flashes},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", axum::routing::post(register))
        .route(LOGIN_PATH, get(login_page).post(login))
        .route("/logout", get(logout))
}

/// Sign a token for `user` and hand it back both as JSON and as the session cookie.
fn start_session(state: &AppState, user: User) -> Result<Response, AppError> {
    let token = JwtKeys::from_ref(state).sign(user.id)?;
    let cookie = cookies::set(SESSION_COOKIE, &token, state.config.cookie_secure);
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(AuthResponse {
            access_token: token,
            user: PublicUser {
                id: user.id,
                email: user.email,
            },
        }),
    )
        .into_response())
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Response, AppError> {
    let email = normalize_email(&payload.email);

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::BadRequest("Password too short".into()));
    }
    if state.store.find_user_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = state.store.create_user(&email, &hash).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    start_session(&state, user)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Response, AppError> {
    let email = normalize_email(&payload.email);

    let Some(user) = state.store.find_user_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::Unauthorized);
    };
    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized);
    }

    info!(user_id = %user.id, "user logged in");
    start_session(&state, user)
}

pub async fn login_page(flashes: Flashes) -> Response {
    flash::page(flashes, LoginPage { title: "Log in" })
}

#[instrument]
pub async fn logout(AuthUser(user_id): AuthUser) -> impl IntoResponse {
    info!(%user_id, "user logged out");
    (
        AppendHeaders([(header::SET_COOKIE, cookies::clear(SESSION_COOKIE))]),
        Redirect::to(LOGIN_PATH),
    )
}
