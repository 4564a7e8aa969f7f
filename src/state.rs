//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use crate::cache::redis_client::RedisClient;
use crate::cache::RecordCache;
use crate::config::environment::EnvironmentConfig;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub redis: RedisClient,
    pub record_cache: RecordCache,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, redis: RedisClient) -> Self {
        let record_cache = RecordCache::new(redis.clone());
        Self {
            pool,
            config,
            redis,
            record_cache,
        }
    }
}
