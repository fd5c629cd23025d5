use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use crate::{
    auth::repo::User,
    feedback::repo::{Feedback, NewFeedback},
    foods::repo::Food,
    logs::repo_types::{Log, NewProd, Prod},
};

#[cfg(test)]
pub mod memory;
mod pg;

pub use pg::PgStore;

/// Persistence seam used by every handler.
#[async_trait]
pub trait CalorieStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<User>;

    async fn list_foods(&self) -> anyhow::Result<Vec<Food>>;
    async fn find_food_by_name(&self, name: &str) -> anyhow::Result<Option<Food>>;

    async fn create_log(&self, user_id: Uuid, date: Date) -> anyhow::Result<Log>;
    async fn find_log(&self, log_id: Uuid) -> anyhow::Result<Option<Log>>;
    /// Logs owned by `user_id`, newest date first.
    async fn list_logs(&self, user_id: Uuid) -> anyhow::Result<Vec<Log>>;

    async fn list_prods(&self, log_id: Uuid) -> anyhow::Result<Vec<Prod>>;
    /// Insert the portion and link it to the log as one unit.
    async fn add_prod(&self, log_id: Uuid, prod: NewProd) -> anyhow::Result<Prod>;
    /// Unlink and delete the portion. Returns false when it was not on the log.
    async fn remove_prod(&self, log_id: Uuid, prod_id: Uuid) -> anyhow::Result<bool>;

    async fn create_feedback(&self, feedback: NewFeedback) -> anyhow::Result<Feedback>;
}
