pub mod int_array;
pub mod word_table;

pub use int_array::*;
pub use word_table::*;
