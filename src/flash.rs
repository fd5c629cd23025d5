//! One-shot user notices carried across a redirect in the `flash` cookie.
//!
//! The cookie holds base64url-encoded JSON so arbitrary message text survives
//! cookie value restrictions. A page handler takes [`Flashes`] as an extractor
//! and renders through [`page`], which also expires the cookie.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Json,
};
use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};

use crate::{config::AppConfig, cookies};

const COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flash {
    pub category: Category,
    pub message: String,
}

impl Flash {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            category: Category::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: Category::Error,
            message: message.into(),
        }
    }
}

/// Flashes pending for the current request. Never rejects; a missing or
/// unreadable cookie yields an empty list.
#[derive(Debug, Default)]
pub struct Flashes(pub Vec<Flash>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Flashes {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(cookies::get(&parts.headers, COOKIE)
            .map(decode)
            .map(Flashes)
            .unwrap_or_default())
    }
}

fn encode(flashes: &[Flash]) -> String {
    let json = serde_json::to_vec(flashes).unwrap_or_default();
    Base64UrlUnpadded::encode_string(&json)
}

fn decode(raw: &str) -> Vec<Flash> {
    Base64UrlUnpadded::decode_vec(raw)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

/// 303 redirect that leaves `flash` for the next page view.
pub fn redirect(config: &AppConfig, to: &str, flash: Flash) -> Response {
    let cookie = cookies::set(COOKIE, &encode(&[flash]), config.cookie_secure);
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::to(to),
    )
        .into_response()
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub flashes: Vec<Flash>,
    #[serde(flatten)]
    pub content: T,
}

/// Render a page context, consuming any pending flashes.
pub fn page<T: Serialize>(flashes: Flashes, content: T) -> Response {
    let consumed = !flashes.0.is_empty();
    let body = Json(Page {
        flashes: flashes.0,
        content,
    });
    if consumed {
        (
            AppendHeaders([(header::SET_COOKIE, cookies::clear(COOKIE))]),
            body,
        )
            .into_response()
    } else {
        body.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request, StatusCode};

    #[test]
    fn cookie_value_survives_arbitrary_text() {
        let flashes = vec![Flash::error("Date is required; pick one = now")];
        let raw = encode(&flashes);
        assert!(!raw.contains(';') && !raw.contains('='));
        assert_eq!(decode(&raw), flashes);
    }

    #[test]
    fn garbage_cookie_decodes_to_nothing() {
        assert!(decode("%%%not-base64").is_empty());
        assert!(decode(&Base64UrlUnpadded::encode_string(b"not json")).is_empty());
    }

    #[tokio::test]
    async fn extractor_reads_cookie() {
        let cookie = format!("flash={}", encode(&[Flash::info("hi")]));
        let req = Request::builder()
            .header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let Flashes(got) = Flashes::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(got, vec![Flash::info("hi")]);
    }

    #[test]
    fn redirect_cookie_follows_secure_setting() {
        let mut config = AppConfig::test();
        let res = redirect(&config, "/calendar", Flash::error("x"));
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let set = res.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set.starts_with("flash=") && !set.contains("Secure"));

        config.cookie_secure = true;
        let res = redirect(&config, "/calendar", Flash::error("x"));
        let set = res.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set.ends_with("; Secure"));
    }

    #[test]
    fn page_clears_cookie_only_when_flashes_were_shown() {
        let res = page(Flashes(vec![Flash::info("x")]), serde_json::json!({}));
        assert_eq!(res.status(), StatusCode::OK);
        let set = res.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set.starts_with("flash=;"));

        let res = page(Flashes::default(), serde_json::json!({}));
        assert!(res.headers().get(header::SET_COOKIE).is_none());
    }
}
