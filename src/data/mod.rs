pub mod source;
pub mod tables;

pub use source::{CsvSource, TableSource};
pub use tables::{MovieTable, RatingTable};
