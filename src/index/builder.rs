use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use tracing::debug;

use super::tokenize::normalize_line;
use crate::{
    database::{HashKind, KeyHasher, ResizePolicy, WordTable},
    error::{IndexError, IndexResult},
};

/// Параметры построения таблицы индекса.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableParams {
    pub start_size: usize,
    pub max_load: f64,
    pub hash: HashKind,
    pub policy: ResizePolicy,
}

impl TableParams {
    pub fn new(
        start_size: usize,
        max_load: f64,
        hash: HashKind,
    ) -> Self {
        Self {
            start_size,
            max_load,
            hash,
            policy: ResizePolicy::Fixed,
        }
    }

    pub fn with_policy(
        mut self,
        policy: ResizePolicy,
    ) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for TableParams {
    fn default() -> Self {
        Self::new(65536, 1.0, HashKind::Djb2)
    }
}

/// Строит индекс из произвольного источника строк.
///
/// Строки нумеруются с 1. Каждое слово строки вставляется с её номером;
/// некорректный UTF-8 декодируется с заменой.
pub fn build_from_reader<R: BufRead>(
    mut reader: R,
    params: &TableParams,
) -> IndexResult<WordTable<HashKind>> {
    let mut table = WordTable::with_policy(
        params.start_size,
        params.max_load,
        params.hash,
        params.policy,
    )?;

    let mut buf = Vec::new();
    let mut line_no: i32 = 0;
    let mut words = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no = line_no.checked_add(1).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "input has too many lines")
        })?;

        let line = String::from_utf8_lossy(&buf);
        for word in normalize_line(&line) {
            table.insert(&word, line_no)?;
            words += 1;
        }
    }

    let stats = table.chain_stats();
    debug!(
        lines = line_no,
        words,
        distinct = table.len(),
        capacity = table.capacity(),
        hasher = table.hasher().name(),
        longest_chain = stats.longest_chain,
        empty_buckets = stats.empty_buckets,
        "word index built"
    );

    Ok(table)
}

/// Открывает файл и строит по нему индекс.
pub fn build_from_file(
    path: impl AsRef<Path>,
    params: &TableParams,
) -> IndexResult<WordTable<HashKind>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IndexError::file(path, e))?;

    build_from_reader(BufReader::new(file), params).map_err(|err| match err {
        IndexError::Io(source) => IndexError::file(path, source),
        other => other,
    })
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
