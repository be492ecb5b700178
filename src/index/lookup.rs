use std::io::{BufRead, Write};

use tracing::{debug, trace};

use super::tokenize::normalize_query;
use crate::{
    database::{IntArray, KeyHasher, WordTable},
    error::IndexResult,
};

/// Печатает блок ответа на один запрос:
///
/// ```text
/// word
/// * 3
/// * 7
///
/// ```
///
/// Для отсутствующего слова печатается только имя и пустая строка.
pub fn render_occurrences<W: Write>(
    word: &str,
    occurrences: Option<&IntArray>,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "{word}")?;
    for line in occurrences.into_iter().flatten() {
        writeln!(out, "* {line}")?;
    }
    writeln!(out)
}

/// Читает запросы построчно до конца ввода и отвечает на каждый.
///
/// Ответ сбрасывается в `output` сразу после печати, до чтения следующего
/// запроса. Возвращает число обработанных запросов.
pub fn run_lookup<H, R, W>(
    table: &WordTable<H>,
    mut input: R,
    mut output: W,
) -> IndexResult<usize>
where
    H: KeyHasher,
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    let mut served = 0usize;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let word = normalize_query(&String::from_utf8_lossy(&buf));
        let hits = table.lookup(&word);
        if hits.is_none() {
            trace!(word = %word, "lookup miss");
        }

        render_occurrences(&word, hits, &mut output)?;
        output.flush()?;
        served += 1;
    }

    debug!(queries = served, "lookup input exhausted");

    Ok(served)
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
