use std::fmt;

/// Коды статуса для категоризации ошибок индекса.
///
/// # Диапазоны:
/// - 1xxx: Общие ошибки и конфигурация
/// - 2xxx: Ошибки данных (ключи)
/// - 5xxx: Память
/// - 6xxx: IO
/// - 8xxx: Разбор входных данных
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    // === 1xxx: Общие ошибки ===
    Internal = 1003,
    InvalidArgs = 1004,
    InvalidConfig = 1006,

    // === 2xxx: Ошибки данных ===
    NotFound = 2000,

    // === 5xxx: Память ===
    AllocationFailed = 5008,

    // === 6xxx: IO ===
    Io = 6000,
    UnexpectedEof = 6007,

    // === 8xxx: Разбор ===
    InvalidData = 8004,
}

/// Уровень, на котором логируется ошибка, завершившая работу.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Warn,
    Error,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl StatusCode {
    /// Числовое представление кода статуса.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Рекомендуемый уровень логирования для данного кода.
    ///
    /// Ошибки в аргументах и настройках исправляет сам пользователь, поэтому
    /// они идут на `Warn`; остальное на `Error`.
    pub fn log_level(&self) -> LogLevel {
        match self {
            Self::InvalidArgs | Self::InvalidConfig => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для StatusCode
////////////////////////////////////////////////////////////////////////////////

impl From<StatusCode> for u32 {
    fn from(c: StatusCode) -> Self {
        c.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
