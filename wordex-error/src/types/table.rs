use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

pub type TableResult<T> = Result<T, TableError>;

/// Ошибки хеш-таблицы и динамического массива.
///
/// Нулевых дескрипторов в Rust нет, поэтому отдельного варианта для
/// "невалидного дескриптора" тоже нет: вместо него проверяются параметры
/// конструктора.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Не удалось зарезервировать память.
    #[error("Allocation failed: {what} ({requested} elements)")]
    AllocationFailure {
        what: &'static str,
        requested: usize,
    },

    /// Ключ отсутствует в таблице.
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    /// Таблица с нулём бакетов невозможна.
    #[error("Invalid capacity: {capacity}, expected a positive bucket count")]
    InvalidCapacity { capacity: usize },

    /// Порог заполненности должен быть конечным и положительным.
    #[error("Invalid max load factor: {max_load}, expected a positive finite value")]
    InvalidLoadFactor { max_load: f64 },
}

impl TableError {
    pub fn allocation(
        what: &'static str,
        requested: usize,
    ) -> Self {
        Self::AllocationFailure { what, requested }
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Отсутствующий ключ: нормальный исход, а не аномалия.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }
}

impl ErrorExt for TableError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AllocationFailure { .. } => StatusCode::AllocationFailed,
            Self::KeyNotFound { .. } => StatusCode::NotFound,
            Self::InvalidCapacity { .. } | Self::InvalidLoadFactor { .. } => {
                StatusCode::InvalidArgs
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
