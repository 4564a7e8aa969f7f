use anyhow::Result;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{CacheConfig, CacheOperations};

/// Cliente Redis con connection pooling y operaciones async.
///
/// El manager es opcional: si Redis no está disponible el cliente queda
/// deshabilitado y todas las operaciones degradan en silencio, de modo
/// que la API sigue sirviendo desde la base de datos.
#[derive(Clone)]
pub struct RedisClient {
    manager: Option<ConnectionManager>,
    config: CacheConfig,
}

impl RedisClient {
    /// Crear nuevo cliente Redis
    pub async fn new(config: CacheConfig) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self {
            manager: Some(manager),
            config,
        })
    }

    /// Cliente deshabilitado: todas las lecturas fallan a la base de datos
    pub fn disabled(config: CacheConfig) -> Self {
        Self {
            manager: None,
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Generar clave de cache con prefijo
    fn make_key(&self, prefix: &str, identifier: &str) -> String {
        format!("vehicle_pulse:{}:{}", prefix, identifier)
    }

    /// Clave de versión por usuario y entidad
    pub fn version_key(&self, user_id: Uuid, entity: &str) -> String {
        self.make_key("version", &format!("{}:{}", user_id, entity))
    }

    /// Clave de un listado cacheado, atada a la versión vigente
    pub fn list_key(&self, user_id: Uuid, entity: &str, version: i64, checksum: &str) -> String {
        self.make_key(entity, &format!("{}:v{}:{}", user_id, version, checksum))
    }

    /// Versión vigente de una clave de versión (0 si no existe)
    pub async fn current_version(&self, key: &str) -> i64 {
        let Some(mut conn) = self.manager.clone() else {
            return 0;
        };

        match conn.get::<_, Option<i64>>(key).await {
            Ok(Some(version)) => version,
            Ok(None) => 0,
            Err(e) => {
                warn!("⚠️ Error leyendo versión de cache {}: {}", key, e);
                0
            }
        }
    }

    /// Incrementar la versión de una clave, renovando su TTL
    pub async fn bump_version(&self, key: &str, ttl: u64) -> Result<i64> {
        let Some(mut conn) = self.manager.clone() else {
            return Ok(0);
        };

        let version: i64 = conn.incr(key, 1i64).await?;

        // Renovar el TTL para que versiones huérfanas no queden para siempre
        let expire: RedisResult<()> = redis::cmd("EXPIRE")
            .arg(key)
            .arg(ttl as i64)
            .query_async(&mut conn)
            .await;
        if let Err(e) = expire {
            warn!("⚠️ Error renovando TTL de {}: {}", key, e);
        }

        debug!("🔄 Versión de cache {} ahora en {}", key, version);
        Ok(version)
    }

    /// Verificar si Redis está conectado
    pub async fn is_connected(&self) -> bool {
        let Some(manager) = self.manager.clone() else {
            return false;
        };

        let mut conn = manager;
        match redis::cmd("PING").query_async::<_, String>(&mut conn).await {
            Ok(response) => response == "PONG",
            Err(_) => false,
        }
    }
}

#[async_trait::async_trait]
impl CacheOperations for RedisClient {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        let Some(mut conn) = self.manager.clone() else {
            return Ok(None);
        };

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!("📥 Cache HIT para clave: {}", key);
                let deserialized: T = serde_json::from_str(&value)?;
                Ok(Some(deserialized))
            }
            Ok(None) => {
                debug!("❌ Cache MISS para clave: {}", key);
                Ok(None)
            }
            Err(e) => {
                warn!("⚠️ Error leyendo cache para clave {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()> {
        let Some(mut conn) = self.manager.clone() else {
            return Ok(());
        };

        let serialized = serde_json::to_string(value)?;

        let result: RedisResult<()> = conn.set_ex(key, serialized, ttl).await;

        match result {
            Ok(()) => {
                debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, ttl);
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ Error guardando en cache para clave {}: {}", key, e);
                Err(anyhow::anyhow!("Error de Redis: {}", e))
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let Some(mut conn) = self.manager.clone() else {
            return Ok(());
        };

        let result: RedisResult<i64> = conn.del(key).await;

        match result {
            Ok(count) => {
                debug!("🗑️ Cache DELETE para clave: {} (eliminados: {})", key, count);
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ Error eliminando cache para clave {}: {}", key, e);
                Ok(()) // No fallar si no se puede eliminar
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let client = RedisClient::disabled(CacheConfig::default());
        let user_id = Uuid::nil();

        let version_key = client.version_key(user_id, "vehicles");
        assert_eq!(
            version_key,
            format!("vehicle_pulse:version:{}:vehicles", user_id)
        );

        let list_key = client.list_key(user_id, "vehicles", 3, "abc123");
        assert_eq!(
            list_key,
            format!("vehicle_pulse:vehicles:{}:v3:abc123", user_id)
        );
    }

    #[tokio::test]
    async fn test_disabled_client_degrades_silently() {
        let client = RedisClient::disabled(CacheConfig::default());

        assert!(!client.is_connected().await);
        assert_eq!(client.current_version("cualquier:clave").await, 0);
        assert_eq!(client.bump_version("cualquier:clave", 60).await.unwrap(), 0);

        let missing: Option<Vec<String>> = client.get("cualquier:clave").await.unwrap();
        assert!(missing.is_none());

        client
            .set("cualquier:clave", &vec!["valor".to_string()], 60)
            .await
            .unwrap();
        client.delete("cualquier:clave").await.unwrap();
    }
}
