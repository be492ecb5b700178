//! Слой индекса: разбор текста, построение таблицы по файлу, ответы на
//! запросы и замеры времени построения.

pub mod builder;
pub mod lookup;
pub mod timing;
pub mod tokenize;

pub use builder::{build_from_file, build_from_reader, TableParams};
pub use lookup::{render_occurrences, run_lookup};
pub use timing::{run_sweep, SweepConfig, SweepSample};
pub use tokenize::{normalize_line, normalize_query};
