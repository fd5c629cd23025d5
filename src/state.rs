use crate::config::AppConfig;
use crate::store::{CalorieStore, PgStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CalorieStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = PgStore::connect(&config.database_url).await?;
        store.migrate().await;

        Ok(Self::from_parts(Arc::new(store), config))
    }

    pub fn from_parts(store: Arc<dyn CalorieStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }
}

#[cfg(test)]
impl AppState {
    pub fn fake(store: Arc<crate::store::memory::MemoryStore>) -> Self {
        let config = Arc::new(AppConfig::test());
        Self::from_parts(store, config)
    }
}
