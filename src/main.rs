use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use kendaraan_api::config::EnvironmentConfig;
use kendaraan_api::database::DatabaseConnection;
use kendaraan_api::{create_app_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    info!("🚗 Kendaraan API - transmisi & kendaraan");
    info!("========================================");

    let config = EnvironmentConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Configuración inválida: {}", e))?;

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new(&config.database).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if config.run_migrations {
        db_connection.run_migrations().await?;
    }

    let app_state = AppState::new(db_connection.pool().clone(), &config);
    let app = create_app_router(app_state);

    let addr: SocketAddr = config.server_url().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("🌐 aplikasi berjalan di http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /api/transmisi");
    info!("   POST   /api/transmisi/store");
    info!("   GET    /api/transmisi/:id");
    info!("   PATCH  /api/transmisi/update/:id");
    info!("   DELETE /api/transmisi/delete/:id");
    info!("   GET    /api/kendaraan");
    info!("   POST   /api/kendaraan/store");
    info!("   PUT    /api/kendaraan/kendaraan/:no_pol");
    info!("   DELETE /api/kendaraan/kendaraan/:no_pol");
    info!("🖼️ Imágenes en {}", config.upload_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
