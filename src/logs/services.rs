use time::{macros::format_description, Date};
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::LogTotal,
    repo_types::{Log, NewProd, Prod},
};
use crate::{error::AppError, store::CalorieStore};

/// Calories of `grams` of a food, fixed at the moment the portion is created.
pub fn portion_calories(grams: f64, calories_per_gram: f64) -> f64 {
    grams * calories_per_gram
}

pub fn total_calories(prods: &[Prod]) -> f64 {
    prods.iter().map(|p| p.calories).sum()
}

#[derive(Debug, PartialEq, Eq)]
pub enum DateInput {
    Missing,
    Invalid,
}

/// Parse the `YYYY-MM-DD` value of an HTML date input.
pub fn parse_date(raw: &str) -> Result<Date, DateInput> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DateInput::Missing);
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]")).map_err(|_| DateInput::Invalid)
}

/// Largest single portion accepted, in grams (100 kg).
pub const MAX_GRAMS: f64 = 100_000.0;

/// Positive gram weight no larger than [`MAX_GRAMS`].
pub fn parse_grams(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|g| *g > 0.0 && *g <= MAX_GRAMS)
}

pub enum LogAccess {
    Owner(Log),
    Foreign,
}

/// Unknown ids are an error; another user's log is not.
pub async fn load_log(
    store: &dyn CalorieStore,
    user_id: Uuid,
    log_id: Uuid,
) -> Result<LogAccess, AppError> {
    let log = store
        .find_log(log_id)
        .await?
        .ok_or(AppError::NotFound("Log"))?;
    if log.user_id != user_id {
        warn!(%user_id, %log_id, owner = %log.user_id, "log access by non-owner");
        return Ok(LogAccess::Foreign);
    }
    Ok(LogAccess::Owner(log))
}

pub async fn add_food(
    store: &dyn CalorieStore,
    log: &Log,
    food_name: &str,
    grams: f64,
) -> Result<Prod, AppError> {
    let food = store
        .find_food_by_name(food_name)
        .await?
        .ok_or_else(|| AppError::UnknownFood(food_name.to_string()))?;

    let calories = portion_calories(grams, food.calories_per_gram);
    if !calories.is_finite() {
        warn!(log_id = %log.id, food = %food.name, grams, "portion calories overflow");
        return Err(AppError::BadRequest("Portion is too large".into()));
    }

    let prod = store
        .add_prod(
            log.id,
            NewProd {
                calories,
                name: food.name,
                grams,
            },
        )
        .await?;
    info!(log_id = %log.id, prod_id = %prod.id, calories = prod.calories, "portion added");
    Ok(prod)
}

pub async fn log_contents(store: &dyn CalorieStore, log: &Log) -> anyhow::Result<(Vec<Prod>, f64)> {
    let prods = store.list_prods(log.id).await?;
    let total = total_calories(&prods);
    Ok((prods, total))
}

/// Every log of the user with its total, newest date first.
pub async fn calendar(store: &dyn CalorieStore, user_id: Uuid) -> anyhow::Result<Vec<LogTotal>> {
    let logs = store.list_logs(user_id).await?;
    let mut out = Vec::with_capacity(logs.len());
    for log in logs {
        let (_, total_calories) = log_contents(store, &log).await?;
        out.push(LogTotal {
            id: log.id,
            date: log.date,
            total_calories,
        });
    }
    Ok(out)
}
