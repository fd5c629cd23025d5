use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{AddFoodForm, CalendarPage, CreateLogForm, LogPage},
    services::{self, parse_date, parse_grams, DateInput, LogAccess},
};
use crate::{
    auth::AuthUser,
    error::AppError,
    flash::{self, Flash, Flashes},
    state::AppState,
};

const CALENDAR: &str = "/calendar";

pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route(CALENDAR, get(calendar))
        .route("/create_log", post(create_log))
        .route("/view/:log_id", get(view_log).post(add_food_to_log))
        .route("/add_food_to_log/:log_id", post(add_food_to_log))
        .route(
            "/remove_food_from_log/:log_id/:prod_id",
            get(remove_food_from_log),
        )
}

fn view_path(log_id: Uuid) -> String {
    format!("/view/{log_id}")
}

/// A path id that is not a UUID cannot name a row, so it is simply not found.
fn parse_id(raw: &str, entity: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(entity))
}

#[instrument(skip(state, flashes))]
pub async fn calendar(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    flashes: Flashes,
) -> Result<Response, AppError> {
    let logs = services::calendar(state.store.as_ref(), user_id).await?;
    Ok(flash::page(
        flashes,
        CalendarPage {
            title: "Calendar",
            logs,
        },
    ))
}

#[instrument(skip(state))]
pub async fn create_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Form(form): Form<CreateLogForm>,
) -> Result<Response, AppError> {
    let date = match parse_date(&form.date) {
        Ok(d) => d,
        Err(DateInput::Missing) => {
            warn!(%user_id, "log creation without a date");
            return Ok(flash::redirect(
                &state.config,
                CALENDAR,
                Flash::error("Please pick a date."),
            ));
        }
        Err(DateInput::Invalid) => {
            warn!(%user_id, raw = %form.date, "log creation with invalid date");
            return Ok(flash::redirect(
                &state.config,
                CALENDAR,
                Flash::error("That date is not valid."),
            ));
        }
    };

    let log = state.store.create_log(user_id, date).await?;
    info!(%user_id, log_id = %log.id, %date, "log created");
    Ok(Redirect::to(&view_path(log.id)).into_response())
}

#[instrument(skip(state, flashes))]
pub async fn view_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(log_id): Path<String>,
    flashes: Flashes,
) -> Result<Response, AppError> {
    let log_id = parse_id(&log_id, "Log")?;
    let log = match services::load_log(state.store.as_ref(), user_id, log_id).await? {
        LogAccess::Owner(log) => log,
        LogAccess::Foreign => return Ok(Redirect::to(CALENDAR).into_response()),
    };

    let (prods, total_calories) = services::log_contents(state.store.as_ref(), &log).await?;
    Ok(flash::page(
        flashes,
        LogPage {
            title: format!("Log for {}", log.date),
            log,
            prods,
            total_calories,
        },
    ))
}

#[instrument(skip(state))]
pub async fn add_food_to_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(log_id): Path<String>,
    Form(form): Form<AddFoodForm>,
) -> Result<Response, AppError> {
    let log_id = parse_id(&log_id, "Log")?;
    let log = match services::load_log(state.store.as_ref(), user_id, log_id).await? {
        LogAccess::Owner(log) => log,
        LogAccess::Foreign => return Ok(Redirect::to(CALENDAR).into_response()),
    };

    let food_name = form.food_name.trim();
    if food_name.is_empty() {
        return Ok(flash::redirect(
            &state.config,
            &view_path(log_id),
            Flash::error("Please choose a food."),
        ));
    }
    let Some(grams) = parse_grams(&form.grams) else {
        warn!(%log_id, raw = %form.grams, "rejected gram quantity");
        return Ok(flash::redirect(
            &state.config,
            &view_path(log_id),
            Flash::error("Quantity must be a positive number of grams, at most 100 kg."),
        ));
    };

    services::add_food(state.store.as_ref(), &log, food_name, grams).await?;
    Ok(Redirect::to(&view_path(log_id)).into_response())
}

#[instrument(skip(state))]
pub async fn remove_food_from_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((log_id, prod_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let log_id = parse_id(&log_id, "Log")?;
    if let LogAccess::Foreign = services::load_log(state.store.as_ref(), user_id, log_id).await? {
        return Ok(Redirect::to(CALENDAR).into_response());
    }
    let prod_id = parse_id(&prod_id, "Portion")?;

    if state.store.remove_prod(log_id, prod_id).await? {
        info!(%log_id, %prod_id, "portion removed");
    } else {
        warn!(%log_id, %prod_id, "portion not on log");
    }
    Ok(Redirect::to(&view_path(log_id)).into_response())
}
