//! Static pages with no data behind them.

use axum::{response::Response, routing::get, Router};
use serde::Serialize;

use crate::{
    auth::AuthUser,
    flash::{self, Flashes},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/feedback", get(feedback))
        .route("/calculator", get(calculator).post(calculator))
}

#[derive(Debug, Serialize)]
struct StaticPage {
    title: &'static str,
    template: &'static str,
    body: &'static str,
}

async fn feedback(_user: AuthUser, flashes: Flashes) -> Response {
    flash::page(
        flashes,
        StaticPage {
            title: "User Feedback",
            template: "feedback-template",
            body: "You are now logged in!",
        },
    )
}

// POST is accepted and ignored.
async fn calculator(flashes: Flashes) -> Response {
    flash::page(
        flashes,
        StaticPage {
            title: "Calculator",
            template: "calculator-template",
            body: "",
        },
    )
}
