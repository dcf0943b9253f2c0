//! Carga y gestión de configuración del servicio de descubrimiento.

use std::{env, net::SocketAddr, path::PathBuf};
use anyhow::{anyhow, Result};

const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_SERVICE_NAME: &str = "Widget Discovery Server";

/// Configuración completa de la aplicación.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_addr: SocketAddr,
    /// Segundo listener opcional (los consumidores antiguos usan el puerto 8081).
    pub widget_server_addr: Option<SocketAddr>,
    pub static_root: PathBuf,
    pub samples_dir: PathBuf,
    pub widgets_dir: PathBuf,
    pub service_name: String,
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno (usando .env si existe).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env`, pero leyendo las variables desde `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_addr = parse_addr(
            "SERVER_ADDR",
            &lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
        )?;

        let widget_server_addr = match lookup("WIDGET_SERVER_ADDR") {
            Some(raw) if !raw.trim().is_empty() => Some(parse_addr("WIDGET_SERVER_ADDR", &raw)?),
            _ => None,
        };

        let static_root = PathBuf::from(lookup("STATIC_ROOT").unwrap_or_else(|| ".".to_string()));
        let samples_dir = PathBuf::from(lookup("SAMPLES_DIR").unwrap_or_else(|| "samples".to_string()));
        let widgets_dir =
            PathBuf::from(lookup("WIDGETS_DIR").unwrap_or_else(|| "src/widgets".to_string()));
        let service_name =
            lookup("SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        Ok(Self {
            server_addr,
            widget_server_addr,
            static_root,
            samples_dir,
            widgets_dir,
            service_name,
        })
    }
}

fn parse_addr(key: &str, raw: &str) -> Result<SocketAddr> {
    raw.trim()
        .parse()
        .map_err(|e| anyhow!("Valor inválido en {key} ({raw}): {e}"))
}
