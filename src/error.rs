//! Errores del pipeline de descubrimiento.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Clase de fallo de un escaneo completo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PermissionDenied,
    Io,
}

impl From<io::ErrorKind> for ErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Io,
        }
    }
}

/// Fallo que aborta un escaneo. Los fallos por entrada no llegan aquí.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Permission denied reading {}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Discovery task failed: {0}")]
    Task(String),
}

impl DiscoveryError {
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match ErrorKind::from(source.kind()) {
            ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            ErrorKind::Io => Self::Io { path, source },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::Io { .. } | Self::Task(_) => ErrorKind::Io,
        }
    }
}

impl From<tokio::task::JoinError> for DiscoveryError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_classified_by_kind() {
        let denied = DiscoveryError::from_io(
            "samples",
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert_eq!(denied.kind(), ErrorKind::PermissionDenied);
        assert_eq!(denied.to_string(), "Permission denied reading samples");

        let other = DiscoveryError::from_io("samples", io::Error::other("disk on fire"));
        assert_eq!(other.kind(), ErrorKind::Io);
        assert!(other.to_string().contains("disk on fire"));
    }
}
