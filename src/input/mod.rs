//! CSV input.

pub mod csv;

pub use self::csv::{read_csv_from, read_csv_rows};
