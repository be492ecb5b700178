use std::io::{self, Stderr};

/// Для возврата используем trait-объект: Box<dyn
/// tracing_subscriber::layer::Layer<S> + Send + Sync>
use tracing_subscriber::layer::Layer as LayerTrait;
use tracing_subscriber::{fmt, registry::LookupSpan};

use crate::logging::config::{LogFormat, LoggingConfig};

/// Build formatter на основе конфигурации.
///
/// Возвращаем boxed trait-объект, чтобы стереть конкретный тип формата
/// (json/pretty/compact).
pub fn build_formatter_from_config<S>(config: &LoggingConfig) -> Box<dyn LayerTrait<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    // Явно указываем writer как fn() -> Stderr
    let writer: fn() -> Stderr = io::stderr;

    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(config.with_target);
            Box::new(layer)
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            Box::new(layer)
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            Box::new(layer)
        }
    }
}
