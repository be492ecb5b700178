use tracing_subscriber::EnvFilter;

use crate::logging::config::LoggingConfig;

/// Собирает фильтр: `RUST_LOG`, если задан, иначе директива из конфигурации.
pub fn build_filter_from_config(config: &LoggingConfig) -> EnvFilter {
    let directive = config.build_filter_directive();

    match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => match EnvFilter::try_new(&directive) {
            Ok(filter) => filter,
            Err(e) => {
                // Подписчик ещё не установлен, поэтому пишем напрямую в stderr.
                eprintln!(
                    "Invalid log filter directive from config ('{directive}'): {e}; falling back to 'info'"
                );
                EnvFilter::new("info")
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        sync::{Arc, Mutex},
    };

    use serial_test::serial;
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{fmt, prelude::*, registry::Registry};

    use super::*;

    // Мини-буферный writer для тестов
    struct VecMakeWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for VecMakeWriter {
        type Writer = VecWriterGuard;

        fn make_writer(&'a self) -> Self::Writer {
            VecWriterGuard(self.0.clone())
        }
    }

    struct VecWriterGuard(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for VecWriterGuard {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    #[serial]
    fn test_build_filter_without_env() {
        env::remove_var("RUST_LOG");
        let f = build_filter_from_config(&LoggingConfig::default());
        assert_eq!(f.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    #[serial]
    fn test_env_overrides_config() {
        env::set_var("RUST_LOG", "trace");
        let f = build_filter_from_config(&LoggingConfig::default());
        env::remove_var("RUST_LOG");
        assert_eq!(f.max_level_hint(), Some(LevelFilter::TRACE));
    }

    /// Тест проверяет откат на "info" при некорректной директиве.
    #[test]
    #[serial]
    fn test_invalid_directive_falls_back() {
        env::remove_var("RUST_LOG");
        let cfg = LoggingConfig {
            level: "trace".into(),
            directives: vec!["bad!!=nonsense".into()],
            ..Default::default()
        };
        assert!(EnvFilter::try_new(cfg.build_filter_directive()).is_err());

        let f = build_filter_from_config(&cfg);
        assert_eq!(f.max_level_hint(), Some(LevelFilter::INFO));
    }

    /// Тест проверяет фильтрацию в runtime: при уровне warn сообщения info
    /// отбрасываются.
    #[test]
    #[serial]
    fn test_filter_drops_lower_levels() {
        env::remove_var("RUST_LOG");
        let cfg = LoggingConfig {
            level: "warn".into(),
            ..Default::default()
        };
        let filter = build_filter_from_config(&cfg);

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let layer = fmt::layer()
            .with_writer(VecMakeWriter(buffer.clone()))
            .with_ansi(false)
            .with_filter(filter);
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "wordex", "info message should be filtered out");
            tracing::warn!(target: "wordex", "warn message should pass through");
        });

        let out = buffer.lock().unwrap();
        let s = String::from_utf8_lossy(&out);
        assert!(s.contains("warn message should pass through"));
        assert!(!s.contains("info message should be filtered out"));
    }
}
