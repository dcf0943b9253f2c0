//! Modelos de dominio y envoltorios JSON de las respuestas de la API.

use serde::Serialize;

/// Tipo de recurso que se puede descubrir.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    DataFiles,
    ScriptWidgets,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::DataFiles => "csv",
            Self::ScriptWidgets => "widgets",
        }
    }
}

/// Metadatos de un fichero descubierto. Instantánea tomada en el momento del escaneo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileEntry {
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Siempre con separadores `/`, sea cual sea el sistema operativo.
    #[serde(rename = "path")]
    pub relative_path: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// Segundos desde epoch.
    #[serde(rename = "lastModified")]
    pub last_modified: f64,
}

/// Envoltorio completo: `{success, entries, count, error?}`.
///
/// Solo se construye con [`DiscoveryResult::build`] o [`DiscoveryResult::failure`],
/// así `count` coincide siempre con `entries.len()` y un fallo nunca lleva entradas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryResult {
    success: bool,
    entries: Vec<FileEntry>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl DiscoveryResult {
    /// Ordena las entradas por `fileName` (orden de bytes) y construye el resultado.
    pub fn build(mut entries: Vec<FileEntry>) -> Self {
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Self {
            success: true,
            count: entries.len(),
            entries,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            entries: Vec::new(),
            count: 0,
            error: Some(message.into()),
        }
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Proyección a solo nombres, en el mismo orden.
    pub fn file_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.file_name.clone()).collect()
    }
}

/// Respuesta de `/api/discover-widgets`: el envoltorio completo más la lista `widgets`.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetDiscovery {
    #[serde(flatten)]
    pub result: DiscoveryResult,
    pub widgets: Vec<String>,
}

impl From<DiscoveryResult> for WidgetDiscovery {
    fn from(result: DiscoveryResult) -> Self {
        let widgets = result.file_names();
        Self { result, widgets }
    }
}

/// Respuesta reducida de `/list-widgets`: `{widgets, count, error?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetNameList {
    pub widgets: Vec<String>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Momento de la respuesta (segundos desde epoch), como el servidor antiguo del puerto 8081.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

impl From<&DiscoveryResult> for WidgetNameList {
    fn from(result: &DiscoveryResult) -> Self {
        Self {
            widgets: result.file_names(),
            count: result.count(),
            error: result.error().map(str::to_string),
            timestamp: None,
        }
    }
}

impl From<DiscoveryResult> for WidgetNameList {
    fn from(result: DiscoveryResult) -> Self {
        Self::from(&result)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: String,
    pub timestamp: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
