use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{
    database::{HashKind, ResizePolicy, MIN_GROW_LOAD},
    error::{IndexError, IndexResult},
    index::{SweepConfig, TableParams},
    logging::LoggingConfig,
};

/// Сетка параметров для режима замеров.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SweepSettings {
    pub start_sizes: Vec<usize>,
    pub max_loads: Vec<f64>,
    pub hashes: Vec<HashKind>,
}

/// Настройки индекса.
///
/// Источники в порядке приоритета: флаги командной строки
/// ([`Settings::apply_overrides`]), переменные окружения `WORDEX_*`
/// (вложенные ключи через `__`, например `WORDEX_LOGGING__LEVEL`), файл
/// настроек, значения по умолчанию.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub start_size: usize,
    pub max_load: f64,
    pub hash: HashKind,
    /// Включает рост таблицы при превышении `max_load`.
    pub grow: bool,
    pub sweep: SweepSettings,
    pub logging: LoggingConfig,
}

/// Значения, переданные флагами командной строки.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub start_size: Option<usize>,
    pub max_load: Option<f64>,
    pub hash: Option<HashKind>,
    pub grow: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl Default for SweepSettings {
    fn default() -> Self {
        let grid = SweepConfig::default();
        Self {
            start_sizes: grid.start_sizes,
            max_loads: grid.max_loads,
            hashes: grid.hashes,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_size: 65536,
            max_load: 1.0,
            hash: HashKind::Djb2,
            grow: false,
            sweep: SweepSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Загружает настройки: значения по умолчанию, затем файл (если задан),
    /// затем переменные окружения с префиксом `WORDEX`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // Добавляем значения по умолчанию
            .set_default("start_size", 65536_i64)?
            .set_default("max_load", 1.0)?
            .set_default("hash", "djb2")?
            .set_default("grow", false)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let cfg = builder
            // Переменные окружения с префиксом WORDEX_
            .add_source(
                Environment::with_prefix("WORDEX")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        cfg.try_deserialize()
    }

    /// Применяет флаги командной строки поверх загруженных значений.
    pub fn apply_overrides(
        &mut self,
        overrides: &Overrides,
    ) {
        if let Some(start_size) = overrides.start_size {
            self.start_size = start_size;
        }
        if let Some(max_load) = overrides.max_load {
            self.max_load = max_load;
        }
        if let Some(hash) = overrides.hash {
            self.hash = hash;
        }
        if overrides.grow {
            self.grow = true;
        }
        self.logging =
            std::mem::take(&mut self.logging).with_verbosity(overrides.verbose, overrides.quiet);
    }

    /// Проверяет значения, которые иначе всплыли бы ошибкой только при
    /// создании таблицы.
    pub fn validate(&self) -> IndexResult<()> {
        if self.start_size == 0 {
            return Err(IndexError::InvalidSettings(
                "start_size must be a positive bucket count".into(),
            ));
        }
        if !self.max_load.is_finite() || self.max_load <= 0.0 {
            return Err(IndexError::InvalidSettings(format!(
                "max_load must be a positive number, got {}",
                self.max_load
            )));
        }
        if self.grow
            && (self.max_load < MIN_GROW_LOAD
                || self.sweep.max_loads.iter().any(|l| *l < MIN_GROW_LOAD))
        {
            return Err(IndexError::InvalidSettings(format!(
                "max_load below {MIN_GROW_LOAD} is not allowed together with grow"
            )));
        }
        if self.sweep.start_sizes.contains(&0) {
            return Err(IndexError::InvalidSettings(
                "sweep.start_sizes must not contain 0".into(),
            ));
        }
        if self
            .sweep
            .max_loads
            .iter()
            .any(|l| !l.is_finite() || *l <= 0.0)
        {
            return Err(IndexError::InvalidSettings(
                "sweep.max_loads must contain only positive numbers".into(),
            ));
        }
        self.logging
            .validate()
            .map_err(IndexError::InvalidSettings)?;
        Ok(())
    }

    pub fn policy(&self) -> ResizePolicy {
        if self.grow {
            ResizePolicy::Grow
        } else {
            ResizePolicy::Fixed
        }
    }

    pub fn table_params(&self) -> TableParams {
        TableParams::new(self.start_size, self.max_load, self.hash).with_policy(self.policy())
    }

    pub fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            start_sizes: self.sweep.start_sizes.clone(),
            max_loads: self.sweep.max_loads.clone(),
            hashes: self.sweep.hashes.clone(),
            policy: self.policy(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
