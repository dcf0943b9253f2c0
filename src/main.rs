// Módulos de la aplicación
mod api;
mod app_state;
mod config;
mod error;
mod models;
mod scanner;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Cargar .env e inicializar logging
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Cargar configuración
    let cfg = config::AppConfig::from_env().context("Error al cargar la configuración")?;
    info!(
        "📁 Directorios: datos={} widgets={} estáticos={}",
        cfg.samples_dir.display(),
        cfg.widgets_dir.display(),
        cfg.static_root.display()
    );

    // 3. Estado inmutable y router
    let app_state = AppState::new(cfg.clone());
    let app = api::create_router(app_state);

    // 4. Iniciar el servidor principal y, si se pide, el de widgets
    let main_server = serve(cfg.server_addr, app.clone());
    match cfg.widget_server_addr {
        Some(widget_addr) => {
            tokio::try_join!(main_server, serve(widget_addr, app))?;
        }
        None => main_server.await?,
    }

    info!("✅ Servidor cerrado correctamente.");
    Ok(())
}

async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("No se pudo escuchar en {addr}"))?;
    let server_url = format!("http://{addr}");
    info!("🚀 Servidor escuchando en {}", server_url);
    info!("📋 CSV:      {server_url}/api/discover-csv");
    info!("🧩 Widgets:  {server_url}/api/discover-widgets | {server_url}/list-widgets");
    info!("💓 Salud:    {server_url}/health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| format!("Error sirviendo en {addr}"))?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Señal de apagado recibida, iniciando cierre del servidor."),
        Err(e) => {
            warn!("No se pudo instalar el manejador de Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    }
}
