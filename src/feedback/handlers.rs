use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use tracing::{info, instrument, warn};

use super::dto::{FeedbackForm, FieldErrors, HomePage};
use crate::{
    error::AppError,
    flash::{self, Flash, Flashes},
    state::AppState,
};

const TITLE: &str = "Home";

/// Home page with an empty feedback form.
pub async fn home(flashes: Flashes) -> Response {
    flash::page(
        flashes,
        HomePage {
            title: TITLE,
            form: FeedbackForm::default(),
            errors: FieldErrors::new(),
        },
    )
}

#[instrument(skip(state, flashes, form))]
pub async fn submit(
    State(state): State<AppState>,
    flashes: Flashes,
    Form(form): Form<FeedbackForm>,
) -> Result<Response, AppError> {
    let feedback = match form.validate() {
        Ok(fb) => fb,
        Err(errors) => {
            warn!(fields = ?errors.keys().collect::<Vec<_>>(), "feedback rejected");
            let page = flash::page(
                flashes,
                HomePage {
                    title: TITLE,
                    form,
                    errors,
                },
            );
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let saved = state.store.create_feedback(feedback).await?;
    info!(feedback_id = %saved.id, "feedback received");
    Ok(flash::redirect(&state.config, "/", Flash::info("Thanks for your feedback!")))
}
