//! wordex
//!
//! Строит индекс слов по текстовому файлу и отвечает на запросы из stdin:
//! для каждого слова печатает номера строк, где оно встречается. С флагом
//! `-t` вместо запросов замеряет время построения индекса на сетке
//! параметров.

use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use wordex::{
    build_from_file,
    logging::{init_logging, log_failure},
    run_lookup, run_sweep, ErrorExt, HashKind, IndexError, KeyHasher, Overrides, Settings,
};

/// Аргументы командной строки
#[derive(Parser)]
#[command(name = "wordex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Word-occurrence index: look up the lines a word appears on", long_about = None)]
struct Cli {
    /// Текстовый файл для индексации
    #[arg(help = "Текстовый файл для индексации")]
    file: PathBuf,
    /// Режим замеров вместо интерактивного поиска
    #[arg(
        short = 't',
        long,
        help = "Замерить время построения индекса для сетки параметров"
    )]
    timed: bool,
    /// Хеш-функция таблицы
    #[arg(long, value_enum, help = "Хеш-функция: trivial, djb2, lose-lose")]
    hash: Option<HashKind>,
    /// Начальное число бакетов
    #[arg(long, help = "Начальное число бакетов таблицы")]
    start_size: Option<usize>,
    /// Порог заполненности
    #[arg(long, help = "Максимальная заполненность (len / capacity)")]
    max_load: Option<f64>,
    /// Рост таблицы при превышении порога
    #[arg(long, help = "Удваивать таблицу при превышении max-load")]
    grow: bool,
    /// Файл настроек
    #[arg(
        short,
        long,
        env = "WORDEX_CONFIG_FILE",
        help = "Файл настроек (toml, yaml, json)"
    )]
    config: Option<PathBuf>,
    /// Включить подробный вывод (debug)
    #[arg(short, long, help = "Включить подробный вывод для отладки")]
    verbose: bool,
    /// Подавить большинство логов (только warn/error)
    #[arg(short = 'q', long, help = "Подавить логирование (только warn/error)")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            start_size: self.start_size,
            max_load: self.max_load,
            hash: self.hash,
            grow: self.grow,
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

/// Сообщает об ошибке ровно один раз: через лог, если он её покажет, иначе
/// напрямую в stderr (например, если настройки не загрузились и логирование
/// ещё не настроено).
fn report_failure(err: &anyhow::Error) {
    match err.downcast_ref::<IndexError>() {
        Some(index_err) => {
            if !log_failure(index_err) {
                eprintln!("wordex: {}", index_err.client_message());
            }
        }
        None => eprintln!("wordex: {err:#}"),
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    settings.apply_overrides(&cli.overrides());
    settings.validate()?;

    if let Err(e) = init_logging(&settings.logging) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if cli.timed {
        let mut out = BufWriter::new(io::stdout().lock());
        let samples = run_sweep(&cli.file, &settings.sweep_config(), &mut out)?;
        out.flush()?;
        info!(samples = samples.len(), "timing sweep finished");
        return Ok(());
    }

    let params = settings.table_params();
    let table = build_from_file(&cli.file, &params)?;
    info!(
        file = %cli.file.display(),
        words = table.len(),
        capacity = table.capacity(),
        hasher = table.hasher().name(),
        policy = ?table.policy(),
        "index ready, reading queries from stdin"
    );

    // Каждый ответ сбрасывается внутри run_lookup сразу после печати.
    let served = run_lookup(&table, io::stdin().lock(), io::stdout().lock())?;
    info!(queries = served, "done");

    Ok(())
}
