//! # placard-data
//!
//! Data source integration for placard - read sticker rows from Excel
//! workbooks and CSV exports and serve them to the fill driver as cells.
//!
//! ## Features
//!
//! - **Excel Support**: Read `.xlsx`/`.xlsm` worksheets using `calamine`
//! - **CSV Support**: Read delimited exports with the same cell addressing
//! - **Locked-file Retry**: Re-attempt workbook opens that hit transient
//!   sharing rejections before giving up
//!
//! ## Example
//!
//! ```rust,ignore
//! use placard_core::CellSource;
//! use placard_data::ExcelSource;
//!
//! // Open a workbook on its first sheet
//! let mut source = ExcelSource::open("stickers.xlsx", None)?;
//!
//! // Read the point number of sticker 1
//! let value = source.cell(3, 9)?;
//! ```

use std::path::Path;

use placard_core::CellSource;

pub mod error;
pub mod sources;

// Re-exports
pub use error::{DataError, Result};
pub use sources::{CsvOptions, CsvSource, ExcelSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Open a data source picked by file extension.
///
/// `.csv` and `.tsv` open a [`CsvSource`]; everything else is treated as an
/// Excel workbook. `sheet` only applies to workbooks.
pub fn open_source(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<Box<dyn CellSource>> {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::open(path)?)),
        Some("tsv") => Ok(Box::new(CsvSource::with_options(path, CsvOptions::tsv())?)),
        _ => Ok(Box::new(ExcelSource::open(path, sheet)?)),
    }
}
