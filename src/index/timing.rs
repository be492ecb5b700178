use std::{
    io::Write,
    path::Path,
    time::{Duration, Instant},
};

use tracing::{debug, info};

use super::builder::{build_from_file, TableParams};
use crate::{
    database::{ChainStats, HashKind, ResizePolicy},
    error::IndexResult,
};

/// Сетка параметров для замеров построения индекса.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub start_sizes: Vec<usize>,
    pub max_loads: Vec<f64>,
    pub hashes: Vec<HashKind>,
    pub policy: ResizePolicy,
}

/// Результат одного прогона.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSample {
    pub start_size: usize,
    pub max_load: f64,
    pub hash: HashKind,
    pub elapsed: Duration,
    pub chain_stats: ChainStats,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start_sizes: vec![2, 16, 64, 256, 1024, 65536],
            max_loads: vec![0.2, 0.5, 0.8, 1.0],
            hashes: HashKind::ALL.to_vec(),
            policy: ResizePolicy::Fixed,
        }
    }
}

impl SweepConfig {
    /// Число комбинаций параметров.
    pub fn combinations(&self) -> usize {
        self.start_sizes.len() * self.max_loads.len() * self.hashes.len()
    }
}

impl SweepSample {
    /// Строка отчёта в формате
    /// `Start: 16\tMax: 0.5\tHash: 1\t -> Time: 420 microsecs`.
    pub fn report_line(&self) -> String {
        format!(
            "Start: {}\tMax: {:.1}\tHash: {}\t -> Time: {} microsecs",
            self.start_size,
            self.max_load,
            self.hash.ordinal(),
            self.elapsed.as_micros()
        )
    }
}

/// Перестраивает индекс по файлу для каждой комбинации параметров и пишет
/// время построения.
///
/// Порядок обхода: размер (внешний цикл), затем порог, затем хеш.
/// Время меряется только на построении; таблица удаляется сразу после
/// замера.
pub fn run_sweep<W: Write>(
    path: impl AsRef<Path>,
    config: &SweepConfig,
    out: &mut W,
) -> IndexResult<Vec<SweepSample>> {
    let path = path.as_ref();
    let mut samples = Vec::with_capacity(config.combinations());

    info!(
        path = %path.display(),
        combinations = config.combinations(),
        policy = ?config.policy,
        "starting timing sweep"
    );

    for &start_size in &config.start_sizes {
        for &max_load in &config.max_loads {
            for &hash in &config.hashes {
                let params = TableParams::new(start_size, max_load, hash).with_policy(config.policy);

                let start = Instant::now();
                let table = build_from_file(path, &params)?;
                let elapsed = start.elapsed();

                let sample = SweepSample {
                    start_size,
                    max_load,
                    hash,
                    elapsed,
                    chain_stats: table.chain_stats(),
                };
                drop(table);

                writeln!(out, "{}", sample.report_line())?;
                debug!(
                    start_size,
                    max_load,
                    hash = %hash,
                    micros = elapsed.as_micros() as u64,
                    longest_chain = sample.chain_stats.longest_chain,
                    "sweep sample"
                );
                samples.push(sample);
            }
        }
    }

    out.flush()?;
    Ok(samples)
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
