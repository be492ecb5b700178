use serde::{Deserialize, Serialize};

/// Формат строки лога.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Конфигурация логирования.
///
/// Логи всегда пишутся в stderr: stdout занят ответами на запросы и отчётом
/// замеров.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Уровень для крейтов проекта: trace, debug, info, warn, error
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_true")]
    pub with_ansi: bool,
    #[serde(default)]
    pub with_target: bool,
    /// Дополнительные директивы EnvFilter (например "wordex::index=trace")
    #[serde(default)]
    pub directives: Vec<String>,
}

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            with_ansi: true,
            with_target: false,
            directives: Vec::new(),
        }
    }
}

impl LoggingConfig {
    /// Поднимает или опускает уровень по флагам командной строки.
    /// `quiet` важнее `verbose`.
    pub fn with_verbosity(
        mut self,
        verbose: bool,
        quiet: bool,
    ) -> Self {
        if quiet {
            self.level = "warn".to_string();
        } else if verbose {
            self.level = "debug".to_string();
        }
        self
    }

    /// Проверяет, что уровень логирования известен.
    pub fn validate(&self) -> Result<(), String> {
        let level = self.level.to_ascii_lowercase();
        if LEVELS.contains(&level.as_str()) {
            Ok(())
        } else {
            Err(format!(
                "unknown log level '{}', expected one of {LEVELS:?}",
                self.level
            ))
        }
    }

    /// Строит директиву EnvFilter: `"warn,wordex=<level>,wordex_error=<level>"`
    /// плюс пользовательские директивы.
    pub fn build_filter_directive(&self) -> String {
        let level = self.level.to_ascii_lowercase();
        let mut parts = vec![
            "warn".to_string(),
            format!("wordex={level}"),
            format!("wordex_error={level}"),
        ];
        parts.extend(self.directives.iter().cloned());
        parts.join(",")
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
