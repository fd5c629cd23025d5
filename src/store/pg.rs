use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use time::Date;
use tracing::warn;
use uuid::Uuid;

use super::CalorieStore;
use crate::{
    auth::{self, repo::User},
    feedback::{
        self,
        repo::{Feedback, NewFeedback},
    },
    foods::{self, repo::Food},
    logs::{
        self,
        repo_types::{Log, NewProd, Prod},
    },
};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    /// Apply embedded migrations. Failure is logged and tolerated so the app
    /// can start against a schema managed elsewhere.
    pub async fn migrate(&self) {
        if let Err(e) = sqlx::migrate!("./migrations").run(&self.db).await {
            warn!(error = %e, "migration failed; continuing");
        }
    }
}

#[async_trait]
impl CalorieStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        auth::repo::find_by_email(&self.db, email).await
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<User> {
        auth::repo::insert(&self.db, email, password_hash).await
    }

    async fn list_foods(&self) -> anyhow::Result<Vec<Food>> {
        foods::repo::list_all(&self.db).await
    }

    async fn find_food_by_name(&self, name: &str) -> anyhow::Result<Option<Food>> {
        foods::repo::find_by_name(&self.db, name).await
    }

    async fn create_log(&self, user_id: Uuid, date: Date) -> anyhow::Result<Log> {
        logs::repo::insert_log(&self.db, user_id, date).await
    }

    async fn find_log(&self, log_id: Uuid) -> anyhow::Result<Option<Log>> {
        logs::repo::get_log(&self.db, log_id).await
    }

    async fn list_logs(&self, user_id: Uuid) -> anyhow::Result<Vec<Log>> {
        logs::repo::list_by_user(&self.db, user_id).await
    }

    async fn list_prods(&self, log_id: Uuid) -> anyhow::Result<Vec<Prod>> {
        logs::repo::list_prods(&self.db, log_id).await
    }

    async fn add_prod(&self, log_id: Uuid, prod: NewProd) -> anyhow::Result<Prod> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        let created = logs::repo::insert_prod_tx(&mut tx, &prod).await?;
        logs::repo::link_prod_tx(&mut tx, log_id, created.id).await?;
        tx.commit().await.context("commit tx")?;
        Ok(created)
    }

    async fn remove_prod(&self, log_id: Uuid, prod_id: Uuid) -> anyhow::Result<bool> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        let unlinked = logs::repo::unlink_prod_tx(&mut tx, log_id, prod_id).await?;
        if unlinked == 0 {
            tx.rollback().await.context("rollback tx")?;
            return Ok(false);
        }
        logs::repo::delete_prod_tx(&mut tx, prod_id).await?;
        tx.commit().await.context("commit tx")?;
        Ok(true)
    }

    async fn create_feedback(&self, fb: NewFeedback) -> anyhow::Result<Feedback> {
        feedback::repo::insert(&self.db, &fb).await
    }
}
