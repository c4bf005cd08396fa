use chrono::Duration;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn, orm_from_pool},
    staging::StagingStore,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub staging: StagingStore,
}

impl AppState {
    pub fn new(pool: DbPool, config: &AppConfig) -> Self {
        Self::with_staging_ttl(pool, Duration::minutes(config.staging_ttl_minutes))
    }

    pub fn with_staging_ttl(pool: DbPool, ttl: Duration) -> Self {
        let orm = orm_from_pool(&pool);
        Self {
            pool,
            orm,
            staging: StagingStore::new(ttl),
        }
    }
}
