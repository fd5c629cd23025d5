use axum::{extract::State, Json};
use tracing::instrument;

use super::repo::Food;
use crate::{error::AppError, state::AppState};

/// Whole catalog for client-side autocomplete.
#[instrument(skip(state))]
pub async fn list_foods(State(state): State<AppState>) -> Result<Json<Vec<Food>>, AppError> {
    Ok(Json(state.store.list_foods().await?))
}
