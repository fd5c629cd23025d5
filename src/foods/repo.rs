use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Catalog entry. Seeded outside the app and never written here.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Food {
    pub name: String,
    pub calories_per_gram: f64,
}

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Food>> {
    sqlx::query_as::<_, Food>(
        r#"
        SELECT name, calories_per_gram
          FROM foods
         ORDER BY name ASC
        "#,
    )
    .fetch_all(db)
    .await
    .context("list foods")
}

/// Exact, case-sensitive name match.
pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<Food>> {
    sqlx::query_as::<_, Food>(
        r#"
        SELECT name, calories_per_gram
          FROM foods
         WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(db)
    .await
    .context("find food by name")
}
