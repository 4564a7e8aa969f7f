//! Cache
//!
//! Este módulo contiene el sistema de cache de lecturas sobre Redis:
//! cliente, configuración y la caché versionada de listados.

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

pub mod cache_config;
pub mod record_cache;
pub mod redis_client;

pub use cache_config::CacheConfig;
pub use record_cache::RecordCache;
pub use redis_client::RedisClient;

/// Operaciones básicas de cache
#[async_trait::async_trait]
pub trait CacheOperations {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}
