//! Data source implementations.
//!
//! Each source adapts one file format to [`placard_core::CellSource`], the
//! 1-based (row, column) interface the fill driver reads cells through.

pub mod csv;
pub mod excel;

pub use self::csv::{CsvOptions, CsvSource};
pub use self::excel::ExcelSource;
