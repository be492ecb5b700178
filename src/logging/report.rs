use tracing::{error, warn, Level};
use wordex_error::{ErrorExt, LogLevel};

/// Логирует ошибку, завершившую работу, на уровне её статус-кода.
///
/// Возвращает `false`, если событие никуда не попадёт (подписчик не
/// установлен или уровень отфильтрован). Тогда сообщение печатает сам
/// вызывающий код.
pub fn log_failure<E: ErrorExt>(err: &E) -> bool {
    let status = err.status_code();

    match status.log_level() {
        LogLevel::Error => {
            if !tracing::enabled!(Level::ERROR) {
                return false;
            }
            error!(
                status = %status,
                kind = %err.type_name(),
                details = %err.log_message(),
                "{}",
                err.client_message()
            );
        }
        LogLevel::Warn => {
            if !tracing::enabled!(Level::WARN) {
                return false;
            }
            warn!(
                status = %status,
                kind = %err.type_name(),
                details = %err.log_message(),
                "{}",
                err.client_message()
            );
        }
    }

    true
}
