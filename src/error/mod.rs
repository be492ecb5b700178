use std::{any::Any, io, path::PathBuf};

use thiserror::Error;
use wordex_error::{ErrorExt, StatusCode, TableError};

pub type IndexResult<T> = Result<T, IndexError>;

/// Ошибки уровня приложения: чтение входа, настройки, таблица.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Cannot read '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Table(#[from] TableError),
}

impl IndexError {
    pub fn file(
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

impl ErrorExt for IndexError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::File { source, .. } | Self::Io(source) => match source.kind() {
                io::ErrorKind::NotFound => StatusCode::NotFound,
                io::ErrorKind::UnexpectedEof => StatusCode::UnexpectedEof,
                io::ErrorKind::InvalidData => StatusCode::InvalidData,
                _ => StatusCode::Io,
            },
            Self::Config(_) | Self::InvalidSettings(_) => StatusCode::InvalidConfig,
            Self::Table(err) => err.status_code(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_error_keeps_path() {
        let err = IndexError::file(
            "missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("missing.txt"));
        assert_eq!(err.status_code(), StatusCode::NotFound);
    }

    #[test]
    fn test_io_kind_mapping() {
        let cases = [
            (io::ErrorKind::NotFound, StatusCode::NotFound),
            (io::ErrorKind::UnexpectedEof, StatusCode::UnexpectedEof),
            (io::ErrorKind::PermissionDenied, StatusCode::Io),
        ];
        for (kind, expected) in cases {
            let err: IndexError = io::Error::new(kind, "x").into();
            assert_eq!(err.status_code(), expected, "kind={kind:?}");
        }
    }

    /// Тест проверяет, что ошибка таблицы пробрасывается со своим кодом.
    #[test]
    fn test_table_error_is_transparent() {
        let err: IndexError = TableError::InvalidCapacity { capacity: 0 }.into();
        assert_eq!(err.status_code(), StatusCode::InvalidArgs);
        assert_eq!(
            err.to_string(),
            TableError::InvalidCapacity { capacity: 0 }.to_string()
        );
    }

    #[test]
    fn test_settings_error_code() {
        let err = IndexError::InvalidSettings("start_size must be positive".into());
        assert_eq!(err.status_code(), StatusCode::InvalidConfig);
    }
}
