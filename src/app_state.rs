use std::sync::Arc;
use crate::{config::AppConfig, models::ResourceKind, scanner::DirectorySpec};

/// Estado compartido por los handlers. Inmutable: se construye una vez al arrancar.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub directories: Arc<DirectoryTable>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let directories = DirectoryTable {
            data_files: DirectorySpec::data_files(&config.samples_dir),
            script_widgets: DirectorySpec::script_widgets(&config.widgets_dir),
        };
        Self {
            config: Arc::new(config),
            directories: Arc::new(directories),
        }
    }
}

/// Un `DirectorySpec` por cada tipo de recurso.
#[derive(Debug)]
pub struct DirectoryTable {
    pub data_files: DirectorySpec,
    pub script_widgets: DirectorySpec,
}

impl DirectoryTable {
    pub fn spec(&self, kind: ResourceKind) -> &DirectorySpec {
        match kind {
            ResourceKind::DataFiles => &self.data_files,
            ResourceKind::ScriptWidgets => &self.script_widgets,
        }
    }
}
