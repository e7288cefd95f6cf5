//! Excel workbook source using calamine.
//!
//! The worksheet is loaded into memory once at open time; cell reads after
//! that never touch the file again. Opens that hit a transient sharing
//! rejection (workbook held open in Excel, OneDrive mid-sync) are retried
//! on a short fixed schedule before the file is reported as locked.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::thread;
use std::time::Duration;

use calamine::{open_workbook, Data, Range, Reader, Xlsx, XlsxError};
use placard_core::{CellSource, CellValue, SourceError};

use crate::error::{DataError, Result};

/// Open attempts before declaring the workbook locked
const OPEN_ATTEMPTS: u32 = 5;
/// Pause after each rejected open attempt
const OPEN_DELAY: Duration = Duration::from_millis(200);

/// Windows sharing violation (file open in another process)
const ERROR_SHARING_VIOLATION: i32 = 32;
/// Windows lock violation (byte range locked)
const ERROR_LOCK_VIOLATION: i32 = 33;

/// Excel workbook cell source
#[derive(Debug)]
pub struct ExcelSource {
    /// Path the workbook was opened from
    path: String,
    /// Worksheet being served
    sheet: String,
    /// All sheet names in the workbook
    sheet_names: Vec<String>,
    /// The sheet's populated cells
    range: Range<Data>,
}

impl ExcelSource {
    /// Open a workbook and load one worksheet.
    ///
    /// `sheet` picks a worksheet by name; `None` takes the first sheet in
    /// the workbook. Handles `.xlsx` and macro-enabled `.xlsm` files.
    pub fn open(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();

        if !path.as_ref().exists() {
            return Err(DataError::FileNotFound(path_str));
        }

        let mut workbook = open_with_retry(path.as_ref())?;
        let sheet_names = workbook.sheet_names().to_vec();

        let sheet = match sheet {
            Some(name) => {
                if !sheet_names.iter().any(|s| s == name) {
                    return Err(DataError::SheetNotFound(format!(
                        "'{}' (workbook has: {})",
                        name,
                        sheet_names.join(", ")
                    )));
                }
                name.to_string()
            }
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| DataError::SheetNotFound("workbook has no sheets".to_string()))?,
        };

        let range = workbook.worksheet_range(&sheet)?;

        Ok(Self {
            path: path_str,
            sheet,
            sheet_names,
            range,
        })
    }

    /// Path the workbook was opened from
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name of the worksheet being served
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// All sheet names in the workbook
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }
}

impl CellSource for ExcelSource {
    fn cell(&mut self, row: u32, col: u32) -> std::result::Result<CellValue, SourceError> {
        if row == 0 || col == 0 {
            return Ok(CellValue::Empty);
        }
        // get_value addresses the worksheet absolutely; a populated area
        // starting below row 1 does not shift the mapping.
        Ok(match self.range.get_value((row - 1, col - 1)) {
            Some(data) => to_cell_value(data),
            None => CellValue::Empty,
        })
    }
}

/// Open the workbook, retrying transient IO rejections.
fn open_with_retry(path: &Path) -> Result<Xlsx<BufReader<File>>> {
    for _ in 0..OPEN_ATTEMPTS {
        match open_workbook(path) {
            Ok(workbook) => return Ok(workbook),
            Err(XlsxError::Io(e)) if is_transient_io(&e) => thread::sleep(OPEN_DELAY),
            Err(e) => {
                return Err(DataError::WorkbookOpen(format!("{}: {}", path.display(), e)))
            }
        }
    }
    Err(DataError::WorkbookLocked(path.display().to_string()))
}

/// Sharing rejections that a short wait can clear
fn is_transient_io(err: &io::Error) -> bool {
    if matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
    ) {
        return true;
    }
    cfg!(windows)
        && matches!(
            err.raw_os_error(),
            Some(ERROR_SHARING_VIOLATION) | Some(ERROR_LOCK_VIOLATION)
        )
}

/// Convert a calamine cell to a [`CellValue`]
fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::Error(e) => CellValue::Text(format!("#ERROR: {:?}", e)),
        Data::DateTime(dt) => CellValue::Text(dt.to_string()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cell_value() {
        assert_eq!(to_cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(
            to_cell_value(&Data::String("V-12".to_string())),
            CellValue::Text("V-12".to_string())
        );
        assert_eq!(to_cell_value(&Data::Int(42)), CellValue::Number(42.0));
        assert_eq!(to_cell_value(&Data::Float(4.5)), CellValue::Number(4.5));
        assert_eq!(
            to_cell_value(&Data::Bool(true)),
            CellValue::Text("true".to_string())
        );
    }

    #[test]
    fn test_error_cells_keep_a_visible_marker() {
        let value = to_cell_value(&Data::Error(calamine::CellErrorType::Div0));
        match value {
            CellValue::Text(s) => assert!(s.starts_with("#ERROR:")),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_transient_io_kinds() {
        assert!(is_transient_io(&io::Error::from(io::ErrorKind::WouldBlock)));
        assert!(is_transient_io(&io::Error::from(io::ErrorKind::Interrupted)));
        assert!(is_transient_io(&io::Error::from(io::ErrorKind::TimedOut)));
        assert!(!is_transient_io(&io::Error::from(io::ErrorKind::NotFound)));
        assert!(!is_transient_io(&io::Error::from(
            io::ErrorKind::PermissionDenied
        )));
    }

    #[cfg(windows)]
    #[test]
    fn test_sharing_violations_are_transient() {
        assert!(is_transient_io(&io::Error::from_raw_os_error(
            ERROR_SHARING_VIOLATION
        )));
        assert!(is_transient_io(&io::Error::from_raw_os_error(
            ERROR_LOCK_VIOLATION
        )));
    }

    #[test]
    fn test_missing_file() {
        let err = ExcelSource::open("/nonexistent/stickers.xlsx", None).unwrap_err();
        assert!(matches!(err, DataError::FileNotFound(_)));
    }
}
