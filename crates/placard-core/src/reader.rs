//! Cell access with bounded retry.
//!
//! Spreadsheet hosts under sync or automation load occasionally reject a
//! read that would succeed a moment later. Sources report such rejections
//! as [`SourceError::Transient`] and [`fetch_cell`] retries them on a fixed
//! schedule before giving up; anything else aborts the run immediately.

use std::fmt;
use std::time::Duration;

use crate::error::{FillError, Result};
use crate::value::CellValue;

/// Failure modes of a single cell read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The host rejected the call; worth retrying shortly
    Transient(String),
    /// The read cannot succeed; abort the run
    Fatal(String),
}

impl SourceError {
    pub fn transient(reason: impl Into<String>) -> Self {
        Self::Transient(reason.into())
    }

    pub fn fatal(reason: impl Into<String>) -> Self {
        Self::Fatal(reason.into())
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Transient(reason) => write!(f, "transient: {}", reason),
            SourceError::Fatal(reason) => write!(f, "{}", reason),
        }
    }
}

/// Trait for sources that yield worksheet cells by 1-based (row, column)
pub trait CellSource: fmt::Debug {
    /// Read one cell. Cells outside the populated area are `Empty`, not an
    /// error.
    fn cell(&mut self, row: u32, col: u32) -> std::result::Result<CellValue, SourceError>;
}

impl<T: CellSource + ?Sized> CellSource for Box<T> {
    fn cell(&mut self, row: u32, col: u32) -> std::result::Result<CellValue, SourceError> {
        (**self).cell(row, col)
    }
}

/// Bounded retry schedule for transient cell-read rejections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts before giving up
    pub attempts: u32,
    /// Pause after each rejected attempt
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_millis(200),
        }
    }
}

/// Read one cell, retrying transient rejections per the policy.
///
/// Exhausting the budget yields [`FillError::CellUnavailable`] naming the
/// exact cell; a fatal source error propagates on the first attempt.
pub fn fetch_cell<S: CellSource>(
    source: &mut S,
    row: u32,
    col: u32,
    policy: RetryPolicy,
) -> Result<CellValue> {
    fetch_cell_with(source, row, col, policy, std::thread::sleep)
}

fn fetch_cell_with<S, F>(
    source: &mut S,
    row: u32,
    col: u32,
    policy: RetryPolicy,
    mut sleep: F,
) -> Result<CellValue>
where
    S: CellSource,
    F: FnMut(Duration),
{
    let mut last_reason = String::new();

    for _ in 0..policy.attempts {
        match source.cell(row, col) {
            Ok(value) => return Ok(value),
            Err(SourceError::Transient(reason)) => {
                last_reason = reason;
                sleep(policy.delay);
            }
            Err(SourceError::Fatal(reason)) => {
                return Err(FillError::SourceFailed { row, col, reason });
            }
        }
    }

    Err(FillError::CellUnavailable {
        row,
        col,
        attempts: policy.attempts,
        reason: last_reason,
    })
}
