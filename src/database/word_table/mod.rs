pub mod hasher;
pub mod table_base;

// Publicly re-export the table and the hashing strategies to simplify access
// from external code.
pub use hasher::*;
pub use table_base::*;
