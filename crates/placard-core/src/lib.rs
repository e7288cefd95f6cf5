//! # placard-core
//!
//! Core sticker-fill logic for placard: map numbered LOTO stickers onto a
//! slide grid, format worksheet cells for display, and drive the fill run.
//!
//! The crate is deliberately free of file formats. Spreadsheets come in
//! through the [`CellSource`] trait and presentations go out through the
//! [`SlideDeck`] trait; `placard-data` and `placard-pptx` provide the
//! concrete ends.
//!
//! ## Features
//!
//! - **Grid Mapping**: Sticker index to slide number, slide position, and
//!   point-based rectangle
//! - **Cell Formatting**: The display rules for numbers, placeholders, and
//!   padded text
//! - **Retrying Reads**: Transient source rejections retried on a fixed
//!   policy before the run aborts
//! - **Fill Reports**: Every write recorded with its outcome, serializable
//!   for machine consumption
//!
//! ## Example
//!
//! ```rust,ignore
//! use placard_core::{run_fill, FillConfig, RetryPolicy};
//!
//! let config = FillConfig::load("placard.toml")?;
//! let report = run_fill(&config, &mut source, &mut deck, RetryPolicy::default())?;
//! println!("{}", report);
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod fill;
pub mod grid;
pub mod reader;
pub mod report;
pub mod value;

// Re-exports
pub use config::{ApplyConfig, FieldsConfig, FillConfig, GridConfig, SheetConfig};
pub use error::{FillError, Result};
pub use fields::StickerField;
pub use fill::{run_fill, SlideDeck, TextWrite};
pub use grid::{position_for, slide_for, RectPt, SizePt, SlideGrid};
pub use reader::{fetch_cell, CellSource, RetryPolicy, SourceError};
pub use report::{FieldOutcome, FillReport, MissingSlide, WriteStatus};
pub use value::CellValue;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
