use std::sync::Mutex;

use async_trait::async_trait;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::CalorieStore;
use crate::{
    auth::repo::User,
    feedback::repo::{Feedback, NewFeedback},
    foods::repo::Food,
    logs::repo_types::{Log, NewProd, Prod},
};

/// In-process store backing router tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    foods: Vec<Food>,
    logs: Vec<Log>,
    prods: Vec<Prod>,
    log_prods: Vec<(Uuid, Uuid)>,
    feedback: Vec<Feedback>,
}

impl MemoryStore {
    pub fn seed_food(&self, name: &str, calories_per_gram: f64) {
        self.inner.lock().unwrap().foods.push(Food {
            name: name.into(),
            calories_per_gram,
        });
    }

    pub fn feedback(&self) -> Vec<Feedback> {
        self.inner.lock().unwrap().feedback.clone()
    }

    pub fn prod_count(&self) -> usize {
        self.inner.lock().unwrap().prods.len()
    }
}

#[async_trait]
impl CalorieStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let t = self.inner.lock().unwrap();
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<User> {
        let mut t = self.inner.lock().unwrap();
        anyhow::ensure!(
            t.users.iter().all(|u| u.email != email),
            "duplicate email {email}"
        );
        let user = User {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn list_foods(&self) -> anyhow::Result<Vec<Food>> {
        let mut foods = self.inner.lock().unwrap().foods.clone();
        foods.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(foods)
    }

    async fn find_food_by_name(&self, name: &str) -> anyhow::Result<Option<Food>> {
        let t = self.inner.lock().unwrap();
        Ok(t.foods.iter().find(|f| f.name == name).cloned())
    }

    async fn create_log(&self, user_id: Uuid, date: Date) -> anyhow::Result<Log> {
        let log = Log {
            id: Uuid::new_v4(),
            user_id,
            date,
        };
        self.inner.lock().unwrap().logs.push(log.clone());
        Ok(log)
    }

    async fn find_log(&self, log_id: Uuid) -> anyhow::Result<Option<Log>> {
        let t = self.inner.lock().unwrap();
        Ok(t.logs.iter().find(|l| l.id == log_id).cloned())
    }

    async fn list_logs(&self, user_id: Uuid) -> anyhow::Result<Vec<Log>> {
        let t = self.inner.lock().unwrap();
        let mut logs: Vec<Log> = t.logs.iter().filter(|l| l.user_id == user_id).cloned().collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(logs)
    }

    async fn list_prods(&self, log_id: Uuid) -> anyhow::Result<Vec<Prod>> {
        let t = self.inner.lock().unwrap();
        Ok(t.log_prods
            .iter()
            .filter(|(l, _)| *l == log_id)
            .filter_map(|(_, p)| t.prods.iter().find(|prod| prod.id == *p).cloned())
            .collect())
    }

    async fn add_prod(&self, log_id: Uuid, prod: NewProd) -> anyhow::Result<Prod> {
        let mut t = self.inner.lock().unwrap();
        let created = Prod {
            id: Uuid::new_v4(),
            name: prod.name,
            calories: prod.calories,
            grams: prod.grams,
        };
        t.prods.push(created.clone());
        t.log_prods.push((log_id, created.id));
        Ok(created)
    }

    async fn remove_prod(&self, log_id: Uuid, prod_id: Uuid) -> anyhow::Result<bool> {
        let mut t = self.inner.lock().unwrap();
        let before = t.log_prods.len();
        t.log_prods.retain(|link| *link != (log_id, prod_id));
        if t.log_prods.len() == before {
            return Ok(false);
        }
        t.prods.retain(|p| p.id != prod_id);
        Ok(true)
    }

    async fn create_feedback(&self, fb: NewFeedback) -> anyhow::Result<Feedback> {
        let created = Feedback {
            id: Uuid::new_v4(),
            full_name: fb.full_name,
            email: fb.email,
            phone: fb.phone,
            body: fb.body,
            created_at: OffsetDateTime::now_utc(),
        };
        self.inner.lock().unwrap().feedback.push(created.clone());
        Ok(created)
    }
}
