//! CSV/TSV source.
//!
//! Delimited exports keep the row and column layout of the workbook they
//! came from, so the same 1-based cell addressing applies. Fields are typed
//! on read: numeric-looking text becomes a number and formats the way a
//! numeric worksheet cell would.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use placard_core::{CellSource, CellValue, SourceError};

use crate::error::{DataError, Result};

/// Options for CSV parsing
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Whether to trim whitespace from fields
    pub trim: bool,
    /// Whether to allow rows with differing field counts
    pub flexible: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim: true,
            flexible: true,
        }
    }
}

impl CsvOptions {
    /// Create options for tab-separated values (TSV)
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Create options for semicolon-separated values (common in European locales)
    pub fn semicolon() -> Self {
        Self {
            delimiter: b';',
            ..Default::default()
        }
    }
}

/// CSV file cell source
#[derive(Debug)]
pub struct CsvSource {
    /// Path to the CSV file
    path: String,
    /// All records, loaded at open time
    rows: Vec<Vec<String>>,
}

impl CsvSource {
    /// Open a CSV file with default options
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(path, CsvOptions::default())
    }

    /// Open a CSV file with custom options
    pub fn with_options(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();

        if !path.as_ref().exists() {
            return Err(DataError::FileNotFound(path_str));
        }

        let file = File::open(path.as_ref())?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .flexible(options.flexible)
            .from_reader(BufReader::new(file));

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }

        Ok(Self {
            path: path_str,
            rows,
        })
    }

    /// Path the file was opened from
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of records in the file
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl CellSource for CsvSource {
    fn cell(&mut self, row: u32, col: u32) -> std::result::Result<CellValue, SourceError> {
        if row == 0 || col == 0 {
            return Ok(CellValue::Empty);
        }
        let field = self
            .rows
            .get(row as usize - 1)
            .and_then(|r| r.get(col as usize - 1));
        Ok(match field {
            Some(field) => CellValue::from_field(field),
            None => CellValue::Empty,
        })
    }
}
