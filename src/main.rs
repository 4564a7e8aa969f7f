use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use vehicle_pulse::cache::{CacheConfig, RedisClient};
use vehicle_pulse::config::environment::EnvironmentConfig;
use vehicle_pulse::database::DatabaseConnection;
use vehicle_pulse::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Vehicle Pulse - Gestión de gastos de vehículos");
    info!("=================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    db_connection.run_migrations().await?;

    // Inicializar Redis; sin Redis la API funciona sin cache
    let cache_config = CacheConfig::from_env();
    let redis_client = match RedisClient::new(cache_config.clone()).await {
        Ok(client) => client,
        Err(e) => {
            warn!("⚠️ Redis no disponible, continuando sin cache: {}", e);
            RedisClient::disabled(cache_config)
        }
    };

    // Crear router de la API
    let app_state = AppState::new(db_connection.pool().clone(), config.clone(), redis_client);
    let app = create_app(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login usuario");
    info!("   GET  /api/auth/me - Obtener perfil actual");
    info!("   PUT  /api/auth/me - Actualizar perfil");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle - Listar vehículos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo");
    info!("   POST /api/vehicle/:id/primary - Marcar como principal");
    info!("⛽ Endpoints - Fuel:");
    info!("   POST /api/fuel - Registrar repostaje");
    info!("   GET  /api/fuel - Listar repostajes");
    info!("   PUT  /api/fuel/:id - Actualizar repostaje");
    info!("   DELETE /api/fuel/:id - Eliminar repostaje");
    info!("🔧 Endpoints - Maintenance:");
    info!("   POST /api/maintenance - Registrar mantenimiento");
    info!("   GET  /api/maintenance - Listar mantenimientos");
    info!("   PUT  /api/maintenance/:id - Actualizar mantenimiento");
    info!("   DELETE /api/maintenance/:id - Eliminar mantenimiento");
    info!("📄 Endpoints - Document:");
    info!("   POST /api/document - Subir documento");
    info!("   GET  /api/document - Listar documentos");
    info!("   GET  /api/document/:id - Obtener documento");
    info!("   PUT  /api/document/:id - Actualizar documento");
    info!("   DELETE /api/document/:id - Eliminar documento");
    info!("   GET  /files/*path - Servir fichero subido");
    info!("📊 Endpoints - Stats:");
    info!("   GET  /api/stats/vehicle/:id - Estadísticas de vehículo");
    info!("   GET  /api/stats/vehicle/:id/monthly - Serie mensual de gasto");
    info!("📋 Endpoints - Dashboard:");
    info!("   GET  /api/dashboard/summary - Resumen del mes");
    info!("   GET  /api/dashboard/timeline - Próximos vencimientos");
    info!("   GET  /api/dashboard/alerts - Alertas de documentos");
    info!("   GET  /api/dashboard/activity - Actividad reciente");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
