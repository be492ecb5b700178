/// Index settings loading (defaults, file, `WORDEX_*` environment).
pub mod config;
/// Built-in data structures: IntArray, WordTable and its hashers.
pub mod database;
/// Application-level error types.
pub mod error;
/// Text normalization, index building, interactive lookup, timing sweep.
pub mod index;
/// Logging setup (formatting, filters).
pub mod logging;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// config
pub use config::{Overrides, Settings};
/// Data types: IntArray, WordTable, hashing strategies.
pub use database::{
    ChainStats, Djb2Hasher, FnHasher, HashKind, IntArray, KeyHasher, LoseLoseHasher, ResizePolicy,
    TooSimpleHasher, WordTable,
};
/// Operation errors and result types.
pub use error::{IndexError, IndexResult};
/// Index building and querying.
pub use index::{
    build_from_file, build_from_reader, run_lookup, run_sweep, SweepConfig, SweepSample,
    TableParams,
};
pub use wordex_error::{ErrorExt, StatusCode, TableError, TableResult};
