use serde::Serialize;
use sqlx::FromRow;
use time::Date;
use uuid::Uuid;

/// One user's record for one calendar date.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Log {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
}

/// A portion on a log. `name` and `calories` are snapshots taken from the
/// food when the portion was added.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Prod {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub grams: f64,
}

#[derive(Debug, Clone)]
pub struct NewProd {
    pub name: String,
    pub calories: f64,
    pub grams: f64,
}
