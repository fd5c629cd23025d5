use anyhow::Context;
use sqlx::{PgPool, Postgres, Transaction};
use time::Date;
use uuid::Uuid;

use super::repo_types::{Log, NewProd, Prod};

pub async fn insert_log(db: &PgPool, user_id: Uuid, date: Date) -> anyhow::Result<Log> {
    sqlx::query_as::<_, Log>(
        r#"
        INSERT INTO logs (user_id, date)
        VALUES ($1, $2)
        RETURNING id, user_id, date
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(db)
    .await
    .context("insert log")
}

pub async fn get_log(db: &PgPool, log_id: Uuid) -> anyhow::Result<Option<Log>> {
    sqlx::query_as::<_, Log>(
        r#"
        SELECT id, user_id, date
          FROM logs
         WHERE id = $1
        "#,
    )
    .bind(log_id)
    .fetch_optional(db)
    .await
    .context("get log")
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Log>> {
    sqlx::query_as::<_, Log>(
        r#"
        SELECT id, user_id, date
          FROM logs
         WHERE user_id = $1
         ORDER BY date DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list logs by user")
}

pub async fn list_prods(db: &PgPool, log_id: Uuid) -> anyhow::Result<Vec<Prod>> {
    sqlx::query_as::<_, Prod>(
        r#"
        SELECT p.id, p.name, p.calories, p.grams
          FROM prods p
          JOIN log_prods lp ON lp.prod_id = p.id
         WHERE lp.log_id = $1
         ORDER BY p.created_at ASC
        "#,
    )
    .bind(log_id)
    .fetch_all(db)
    .await
    .context("list prods by log")
}

pub async fn insert_prod_tx(
    tx: &mut Transaction<'_, Postgres>,
    prod: &NewProd,
) -> anyhow::Result<Prod> {
    sqlx::query_as::<_, Prod>(
        r#"
        INSERT INTO prods (name, calories, grams)
        VALUES ($1, $2, $3)
        RETURNING id, name, calories, grams
        "#,
    )
    .bind(&prod.name)
    .bind(prod.calories)
    .bind(prod.grams)
    .fetch_one(&mut **tx)
    .await
    .context("insert prod")
}

pub async fn link_prod_tx(
    tx: &mut Transaction<'_, Postgres>,
    log_id: Uuid,
    prod_id: Uuid,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO log_prods (log_id, prod_id)
        VALUES ($1, $2)
        "#,
    )
    .bind(log_id)
    .bind(prod_id)
    .execute(&mut **tx)
    .await
    .context("link prod to log")?;
    Ok(())
}

/// Returns the number of association rows removed (0 or 1).
pub async fn unlink_prod_tx(
    tx: &mut Transaction<'_, Postgres>,
    log_id: Uuid,
    prod_id: Uuid,
) -> anyhow::Result<u64> {
    let res = sqlx::query(
        r#"
        DELETE FROM log_prods
         WHERE log_id = $1 AND prod_id = $2
        "#,
    )
    .bind(log_id)
    .bind(prod_id)
    .execute(&mut **tx)
    .await
    .context("unlink prod from log")?;
    Ok(res.rows_affected())
}

pub async fn delete_prod_tx(tx: &mut Transaction<'_, Postgres>, prod_id: Uuid) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM prods WHERE id = $1")
        .bind(prod_id)
        .execute(&mut **tx)
        .await
        .context("delete prod")?;
    Ok(())
}
