//! Escaneo de los directorios configurados y extracción de metadatos de cada
//! fichero que cumple la regla de nombres.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use tracing::debug;
use walkdir::WalkDir;

use crate::{
    error::{DiscoveryError, Result},
    models::{DiscoveryResult, FileEntry},
};

/// Regla pura sobre el nombre del fichero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    /// Termina en el sufijo, sin distinguir mayúsculas.
    SuffixIgnoreCase(String),
    /// Empieza por el prefijo y termina en el sufijo (exacto).
    PrefixSuffix { prefix: String, suffix: String },
}

impl MatchRule {
    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            Self::SuffixIgnoreCase(suffix) => {
                file_name.to_lowercase().ends_with(&suffix.to_lowercase())
            }
            Self::PrefixSuffix { prefix, suffix } => {
                file_name.len() >= prefix.len() + suffix.len()
                    && file_name.starts_with(prefix.as_str())
                    && file_name.ends_with(suffix.as_str())
            }
        }
    }
}

/// Un tipo de recurso descubrible: directorio raíz + regla de nombres.
#[derive(Debug, Clone)]
pub struct DirectorySpec {
    pub root: PathBuf,
    pub rule: MatchRule,
}

impl DirectorySpec {
    /// Ficheros `*.csv` (sin distinguir mayúsculas).
    pub fn data_files(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rule: MatchRule::SuffixIgnoreCase(".csv".to_string()),
        }
    }

    /// Scripts `widget_*.js`.
    pub fn script_widgets(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rule: MatchRule::PrefixSuffix {
                prefix: "widget_".to_string(),
                suffix: ".js".to_string(),
            },
        }
    }
}

/// Entrada que pasó el filtro, antes de leer sus metadatos.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub file_name: String,
    pub path: PathBuf,
}

/// Lista las entradas inmediatas de `spec.root` que cumplen la regla y son
/// ficheros regulares (los enlaces simbólicos a ficheros cuentan).
///
/// Un directorio raíz inexistente no es un error: devuelve una lista vacía.
/// El orden del resultado es el del sistema de ficheros y no se garantiza.
pub fn scan(spec: &DirectorySpec) -> Result<Vec<ScannedFile>> {
    match fs::metadata(&spec.root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            debug!("{} no es un directorio, resultado vacío", spec.root.display());
            return Ok(Vec::new());
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} no existe, resultado vacío", spec.root.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(DiscoveryError::from_io(&spec.root, e)),
    }

    // Sin seguir enlaces: el destino solo se consulta si el nombre encaja.
    let walker = WalkDir::new(&spec.root).min_depth(1).max_depth(1);

    let mut files = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 || err.path() == Some(spec.root.as_path()) => {
                return Err(DiscoveryError::from_io(&spec.root, io::Error::from(err)));
            }
            Err(err) => {
                debug!("Entrada omitida en {}: {}", spec.root.display(), err);
                continue;
            }
        };

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !spec.rule.matches(&file_name) {
            continue;
        }

        // `fs::metadata` sigue enlaces: un enlace a fichero cuenta como fichero.
        match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => files.push(ScannedFile {
                file_name,
                path: entry.into_path(),
            }),
            Ok(_) => {}
            Err(e) => debug!("Entrada omitida {}: {}", entry.path().display(), e),
        }
    }

    Ok(files)
}

/// Lee tamaño y fecha de modificación de un fichero ya escaneado.
pub fn extract(spec: &DirectorySpec, file: &ScannedFile) -> io::Result<FileEntry> {
    let meta = fs::metadata(&file.path)?;
    if !meta.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "la entrada ya no es un fichero regular",
        ));
    }
    let modified: DateTime<Utc> = meta.modified()?.into();

    Ok(FileEntry {
        file_name: file.file_name.clone(),
        relative_path: relative_path(&spec.root, &file.file_name),
        size_bytes: meta.len(),
        last_modified: modified.timestamp_micros() as f64 / 1_000_000.0,
    })
}

/// Pipeline completo: escaneo, metadatos y construcción del resultado ordenado.
/// Las entradas que fallan al leer sus metadatos se descartan sin abortar.
pub fn discover(spec: &DirectorySpec) -> Result<DiscoveryResult> {
    let entries = scan(spec)?
        .iter()
        .filter_map(|file| match extract(spec, file) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Sin metadatos para {}: {}", file.path.display(), e);
                None
            }
        })
        .collect();

    Ok(DiscoveryResult::build(entries))
}

fn relative_path(root: &Path, file_name: &str) -> String {
    let root = root.to_string_lossy().replace('\\', "/");
    match root.trim_end_matches('/') {
        "" if root.starts_with('/') => format!("/{file_name}"),
        "" => file_name.to_string(),
        trimmed => format!("{trimmed}/{file_name}"),
    }
}
