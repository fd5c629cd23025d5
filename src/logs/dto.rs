use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::repo_types::{Log, Prod};

#[derive(Debug, Deserialize)]
pub struct CreateLogForm {
    #[serde(default)]
    pub date: String,
}

/// Raw form strings; parsed in the handler so bad input can be flashed.
#[derive(Debug, Deserialize)]
pub struct AddFoodForm {
    #[serde(default)]
    pub food_name: String,
    #[serde(default)]
    pub grams: String,
}

#[derive(Debug, Serialize)]
pub struct LogTotal {
    pub id: Uuid,
    pub date: Date,
    pub total_calories: f64,
}

#[derive(Debug, Serialize)]
pub struct CalendarPage {
    pub title: &'static str,
    pub logs: Vec<LogTotal>,
}

#[derive(Debug, Serialize)]
pub struct LogPage {
    pub title: String,
    pub log: Log,
    pub prods: Vec<Prod>,
    pub total_calories: f64,
}
