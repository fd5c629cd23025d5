use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Feedback {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub body: String,
    pub created_at: OffsetDateTime,
}

/// Validated submission, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub body: String,
}

pub async fn insert(db: &PgPool, fb: &NewFeedback) -> anyhow::Result<Feedback> {
    sqlx::query_as::<_, Feedback>(
        r#"
        INSERT INTO feedback (full_name, email, phone, body)
        VALUES ($1, $2, $3, $4)
        RETURNING id, full_name, email, phone, body, created_at
        "#,
    )
    .bind(&fb.full_name)
    .bind(&fb.email)
    .bind(&fb.phone)
    .bind(&fb.body)
    .fetch_one(db)
    .await
    .context("insert feedback")
}
