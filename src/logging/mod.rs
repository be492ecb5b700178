pub mod config;
mod filters;
mod formatter;
mod report;

pub use config::{LogFormat, LoggingConfig};
pub use report::log_failure;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Инициализация логирования с конфигурацией.
///
/// Повторный вызов возвращает ошибку, а не паникует: глобальный подписчик
/// можно установить только один раз.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    config.validate()?;

    let env_filter = filters::build_filter_from_config(config);
    let layer = formatter::build_formatter_from_config(config);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        format = ?config.format,
        "Logging system initialized"
    );

    Ok(())
}
