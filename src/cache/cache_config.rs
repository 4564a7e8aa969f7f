//! Configuración de cache
//!
//! Este módulo contiene la configuración para el sistema de cache.

use serde::{Deserialize, Serialize};

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub redis_url: String,
    /// TTL de los payloads de listados cacheados
    pub list_ttl: u64,
    /// TTL de las claves de versión por usuario/entidad
    pub version_ttl: u64,
    pub max_connections: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            list_ttl: 300,     // 5 minutos
            version_ttl: 86400, // 24 horas
            max_connections: 10,
        }
    }
}

impl CacheConfig {
    /// Construir la configuración desde variables de entorno
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            redis_url: std::env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            list_ttl: std::env::var("CACHE_LIST_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.list_ttl),
            version_ttl: std::env::var("CACHE_VERSION_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.version_ttl),
            max_connections: defaults.max_connections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.list_ttl, 300);
        assert_eq!(config.version_ttl, 86400);
    }
}
