//! Error types for the fill engine.

use thiserror::Error;

/// Result type for fill operations
pub type Result<T> = std::result::Result<T, FillError>;

/// Errors that abort a fill run
#[derive(Error, Debug)]
pub enum FillError {
    /// Cell still rejected after the retry budget was spent
    #[error("cell (row {row}, col {col}) unavailable after {attempts} attempts: {reason}")]
    CellUnavailable {
        row: u32,
        col: u32,
        attempts: u32,
        reason: String,
    },

    /// Non-transient data source failure
    #[error("data source failed at (row {row}, col {col}): {reason}")]
    SourceFailed { row: u32, col: u32, reason: String },

    /// Sticker position does not exist on the coordinate grid
    #[error("position {position} is outside the {columns}x{rows} slide grid")]
    PositionOutOfRange {
        position: u32,
        columns: usize,
        rows: usize,
    },

    /// Configuration rejected by validation
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// TOML parsing error (for the fill configuration)
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FillError {
    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
