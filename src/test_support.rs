//! Helpers for driving the full router against the in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::FromRef,
    http::{header, Request},
    response::Response,
    Router,
};
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    app::build_app, auth::jwt::JwtKeys, state::AppState, store::memory::MemoryStore,
    store::CalorieStore,
};

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    state: AppState,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let state = AppState::fake(store.clone());
        let router = build_app(state.clone());
        Self {
            store,
            state,
            router,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.unwrap()
    }

    /// Creates an account directly in the store and returns its id and a
    /// valid session token.
    pub async fn user(&self, email: &str) -> (Uuid, String) {
        let user = self
            .store
            .create_user(email, "unused-hash")
            .await
            .unwrap();
        let token = JwtKeys::from_ref(&self.state).sign(user.id).unwrap();
        (user.id, token)
    }
}

fn request(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(t) => builder.header(header::AUTHORIZATION, format!("Bearer {t}")),
        None => builder,
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request("GET", uri, token).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    request("POST", uri, token)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    request("POST", uri, None)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn location(res: &Response) -> String {
    res.headers()[header::LOCATION].to_str().unwrap().to_string()
}

pub async fn body_json(res: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
