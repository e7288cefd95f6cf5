//! placard CLI - Command-line interface library
//!
//! This library provides the CLI functionality for placard, including:
//! - Fill: Write worksheet values into a deck's sticker shapes
//! - Inspect: Report which sticker shapes a deck carries or lacks
//! - Init: Write a starter configuration file
//!
//! # Library Usage
//!
//! ```ignore
//! use placard_cli::{fill_command, run_cli, FillOptions};
//!
//! // Run the full CLI
//! run_cli();
//!
//! // Or use individual commands programmatically
//! let report = fill_command(&FillOptions::default())?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Fill a deck from a workbook
//! placard fill loto-index.xlsm sticker-sheets.pptx
//!
//! # Check the deck for missing sticker shapes
//! placard inspect sticker-sheets.pptx
//!
//! # Write a starter placard.toml
//! placard init
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{fill_command, init_command, inspect_command};
pub use app::{run_cli, FillOptions, OutputFormat};
