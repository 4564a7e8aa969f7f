//! Caché de listados versionada
//!
//! Cada listado se guarda bajo una clave que incluye la versión vigente
//! del par usuario/entidad y un checksum MD5 de los filtros. Invalidar
//! es incrementar la versión: las claves viejas quedan huérfanas y
//! expiran solas por TTL, sin necesidad de borrados por patrón.

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{CacheOperations, RedisClient};

/// Entidades con listados cacheables
pub const ENTITY_VEHICLES: &str = "vehicles";
pub const ENTITY_FUEL_RECORDS: &str = "fuel_records";
pub const ENTITY_MAINTENANCE_LOGS: &str = "maintenance_logs";
pub const ENTITY_DOCUMENTS: &str = "documents";

/// Caché de listados por usuario y entidad
#[derive(Clone)]
pub struct RecordCache {
    redis: RedisClient,
}

impl RecordCache {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }

    /// Checksum MD5 de la firma canónica de los filtros
    fn checksum(signature: &str) -> String {
        format!("{:x}", md5::compute(signature.as_bytes()))
    }

    /// Clave del listado bajo la versión vigente
    async fn list_key(&self, user_id: Uuid, entity: &str, signature: &str) -> String {
        let version_key = self.redis.version_key(user_id, entity);
        let version = self.redis.current_version(&version_key).await;
        self.redis
            .list_key(user_id, entity, version, &Self::checksum(signature))
    }

    /// Leer un listado cacheado. Cualquier fallo degrada a `None` y el
    /// llamante consulta la base de datos.
    pub async fn get_list<T: DeserializeOwned + Send>(
        &self,
        user_id: Uuid,
        entity: &str,
        signature: &str,
    ) -> Option<Vec<T>> {
        let key = self.list_key(user_id, entity, signature).await;

        match self.redis.get::<Vec<T>>(&key).await {
            Ok(found) => found,
            Err(e) => {
                debug!("⚠️ Cache ilegible para {}: {}", key, e);
                None
            }
        }
    }

    /// Guardar un listado. Best effort: un fallo solo se registra.
    pub async fn store_list<T: Serialize + Send + Sync>(
        &self,
        user_id: Uuid,
        entity: &str,
        signature: &str,
        records: &Vec<T>,
    ) {
        let key = self.list_key(user_id, entity, signature).await;
        let ttl = self.redis.config().list_ttl;

        if let Err(e) = self.redis.set(&key, records, ttl).await {
            debug!("⚠️ No se pudo cachear {}: {}", key, e);
        }
    }

    /// Invalidar todos los listados de una entidad para un usuario
    pub async fn invalidate(&self, user_id: Uuid, entity: &str) {
        let key = self.redis.version_key(user_id, entity);
        let ttl = self.redis.config().version_ttl;

        if let Err(e) = self.redis.bump_version(&key, ttl).await {
            debug!("⚠️ No se pudo invalidar cache {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;

    fn disabled_cache() -> RecordCache {
        RecordCache::new(RedisClient::disabled(CacheConfig::default()))
    }

    #[test]
    fn test_checksum_is_stable_hex() {
        let a = RecordCache::checksum("vehicle=None|start=None|end=None");
        let b = RecordCache::checksum("vehicle=None|start=None|end=None");
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_checksum_distinguishes_filters() {
        let all = RecordCache::checksum("vehicle=None");
        let one = RecordCache::checksum("vehicle=Some(abc)");
        assert_ne!(all, one);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_misses() {
        let cache = disabled_cache();
        let user_id = Uuid::new_v4();

        let found: Option<Vec<String>> = cache
            .get_list(user_id, ENTITY_VEHICLES, "vehicle=None")
            .await;
        assert!(found.is_none());

        // Guardar e invalidar no deben fallar con el cliente apagado
        cache
            .store_list(
                user_id,
                ENTITY_VEHICLES,
                "vehicle=None",
                &vec!["registro".to_string()],
            )
            .await;
        cache.invalidate(user_id, ENTITY_VEHICLES).await;
    }
}
