//! Fill configuration.
//!
//! Everything the fill driver needs travels in one [`FillConfig`] value:
//! file paths, worksheet layout, the sticker grid, the per-field column and
//! style table, and the two apply switches. The TOML form accepts partial
//! files; every field has a default matching the standard 2x3 A4 sticker
//! sheet.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FillError, Result};
use crate::fields::StickerField;
use crate::grid::{SizePt, SlideGrid};

/// Complete configuration for one fill run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FillConfig {
    /// Workbook to read sticker data from
    #[serde(default)]
    pub workbook: Option<PathBuf>,

    /// Presentation whose sticker shapes get filled
    #[serde(default)]
    pub deck: Option<PathBuf>,

    /// Worksheet layout
    #[serde(default)]
    pub sheet: SheetConfig,

    /// Sticker grid dimensions
    #[serde(default)]
    pub grid: GridConfig,

    /// Per-field worksheet columns and shape styling
    #[serde(default)]
    pub fields: FieldsConfig,

    /// Optional shape adjustments applied alongside the text
    #[serde(default)]
    pub apply: ApplyConfig,
}

/// Worksheet layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Worksheet name; empty selects the first sheet in the workbook
    #[serde(default)]
    pub name: String,

    /// Worksheet row holding sticker 1 (rows above are headers)
    #[serde(default = "default_first_data_row")]
    pub first_data_row: u32,
}

fn default_first_data_row() -> u32 {
    3
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            first_data_row: default_first_data_row(),
        }
    }
}

/// Sticker grid dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Stickers laid out on each slide
    #[serde(default = "default_stickers_per_slide")]
    pub stickers_per_slide: u32,

    /// Stickers (and worksheet rows) processed per run
    #[serde(default = "default_total_stickers")]
    pub total_stickers: u32,

    /// Left edge of each grid column, in points
    #[serde(default = "default_column_lefts")]
    pub column_lefts: Vec<f32>,

    /// Top edge of each grid row, in points
    #[serde(default = "default_row_tops")]
    pub row_tops: Vec<f32>,
}

fn default_stickers_per_slide() -> u32 {
    6
}

fn default_total_stickers() -> u32 {
    120
}

fn default_column_lefts() -> Vec<f32> {
    vec![2.0, 507.0]
}

fn default_row_tops() -> Vec<f32> {
    vec![63.0, 245.0, 420.0]
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            stickers_per_slide: default_stickers_per_slide(),
            total_stickers: default_total_stickers(),
            column_lefts: default_column_lefts(),
            row_tops: default_row_tops(),
        }
    }
}

impl GridConfig {
    /// Positions available on one slide
    pub fn capacity(&self) -> usize {
        self.column_lefts.len() * self.row_tops.len()
    }

    /// Coordinate grid for position lookups
    pub fn slide_grid(&self) -> SlideGrid {
        SlideGrid {
            column_lefts: self.column_lefts.clone(),
            row_tops: self.row_tops.clone(),
        }
    }
}

/// Per-field worksheet columns and shape styling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldsConfig {
    #[serde(default)]
    pub point: PointField,

    #[serde(default)]
    pub amount: AmountField,

    #[serde(default)]
    pub cabinet: CabinetField,
}

/// Isolation point placeholders (four per sticker)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointField {
    /// Worksheet columns for points 1..=4, 1-based
    #[serde(default = "default_point_columns")]
    pub columns: [u32; 4],

    /// Shape width in points
    #[serde(default = "default_point_width")]
    pub width: f32,

    /// Shape height in points
    #[serde(default = "default_point_height")]
    pub height: f32,

    /// Font size in points
    #[serde(default = "default_point_font_size")]
    pub font_size: f32,
}

fn default_point_columns() -> [u32; 4] {
    [9, 10, 11, 12]
}

fn default_point_width() -> f32 {
    450.43
}

fn default_point_height() -> f32 {
    34.02
}

fn default_point_font_size() -> f32 {
    20.0
}

impl Default for PointField {
    fn default() -> Self {
        Self {
            columns: default_point_columns(),
            width: default_point_width(),
            height: default_point_height(),
            font_size: default_point_font_size(),
        }
    }
}

/// Lock/tag amount placeholder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountField {
    /// Worksheet column, 1-based
    #[serde(default = "default_amount_column")]
    pub column: u32,

    #[serde(default = "default_amount_width")]
    pub width: f32,

    #[serde(default = "default_amount_height")]
    pub height: f32,

    #[serde(default = "default_amount_font_size")]
    pub font_size: f32,
}

fn default_amount_column() -> u32 {
    13
}

fn default_amount_width() -> f32 {
    32.03
}

fn default_amount_height() -> f32 {
    41.10
}

fn default_amount_font_size() -> f32 {
    22.0
}

impl Default for AmountField {
    fn default() -> Self {
        Self {
            column: default_amount_column(),
            width: default_amount_width(),
            height: default_amount_height(),
            font_size: default_amount_font_size(),
        }
    }
}

/// Cabinet designation placeholder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CabinetField {
    /// Worksheet column, 1-based
    #[serde(default = "default_cabinet_column")]
    pub column: u32,

    #[serde(default = "default_cabinet_width")]
    pub width: f32,

    #[serde(default = "default_cabinet_height")]
    pub height: f32,

    #[serde(default = "default_cabinet_font_size")]
    pub font_size: f32,
}

fn default_cabinet_column() -> u32 {
    14
}

fn default_cabinet_width() -> f32 {
    134.12
}

fn default_cabinet_height() -> f32 {
    21.83
}

fn default_cabinet_font_size() -> f32 {
    10.0
}

impl Default for CabinetField {
    fn default() -> Self {
        Self {
            column: default_cabinet_column(),
            width: default_cabinet_width(),
            height: default_cabinet_height(),
            font_size: default_cabinet_font_size(),
        }
    }
}

impl FieldsConfig {
    /// Worksheet column for a field.
    ///
    /// Point numbers are 1..=4; other values are a caller bug.
    pub fn column_for(&self, field: StickerField) -> u32 {
        match field {
            StickerField::Point(n) => self.point.columns[usize::from(n - 1)],
            StickerField::Amount => self.amount.column,
            StickerField::Cabinet => self.cabinet.column,
        }
    }

    /// Target shape size for a field
    pub fn size_for(&self, field: StickerField) -> SizePt {
        match field {
            StickerField::Point(_) => SizePt::new(self.point.width, self.point.height),
            StickerField::Amount => SizePt::new(self.amount.width, self.amount.height),
            StickerField::Cabinet => SizePt::new(self.cabinet.width, self.cabinet.height),
        }
    }

    /// Target font size for a field, in points
    pub fn font_size_for(&self, field: StickerField) -> f32 {
        match field {
            StickerField::Point(_) => self.point.font_size,
            StickerField::Amount => self.amount.font_size,
            StickerField::Cabinet => self.cabinet.font_size,
        }
    }
}

/// Optional shape adjustments, applied independently of each other
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ApplyConfig {
    /// Re-place and re-size each written shape from the grid and field table
    #[serde(default)]
    pub geometry: bool,

    /// Set each written shape's font size from the field table
    #[serde(default)]
    pub font_sizes: bool,
}

impl FillConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Worksheet row holding the given sticker's data
    pub fn worksheet_row(&self, sticker: u32) -> u32 {
        self.sheet.first_data_row + sticker - 1
    }

    /// Reject configurations the driver cannot run.
    ///
    /// In particular `stickers_per_slide` must fit the coordinate grid, so
    /// position lookups can never go out of range mid-run.
    pub fn validate(&self) -> Result<()> {
        if self.grid.stickers_per_slide == 0 {
            return Err(FillError::invalid_config(
                "grid.stickers_per_slide must be at least 1",
            ));
        }
        if self.grid.total_stickers == 0 {
            return Err(FillError::invalid_config(
                "grid.total_stickers must be at least 1",
            ));
        }
        if self.grid.column_lefts.is_empty() || self.grid.row_tops.is_empty() {
            return Err(FillError::invalid_config(
                "grid.column_lefts and grid.row_tops must not be empty",
            ));
        }
        let capacity = self.grid.capacity();
        if self.grid.stickers_per_slide as usize > capacity {
            return Err(FillError::invalid_config(format!(
                "grid.stickers_per_slide is {} but the {}x{} grid holds only {}",
                self.grid.stickers_per_slide,
                self.grid.column_lefts.len(),
                self.grid.row_tops.len(),
                capacity
            )));
        }
        if self.sheet.first_data_row == 0 {
            return Err(FillError::invalid_config(
                "sheet.first_data_row must be at least 1",
            ));
        }

        let mut columns: Vec<u32> = self.fields.point.columns.to_vec();
        columns.push(self.fields.amount.column);
        columns.push(self.fields.cabinet.column);
        if columns.iter().any(|&c| c == 0) {
            return Err(FillError::invalid_config(
                "field columns are 1-based and must be at least 1",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_describe_the_standard_sheet() {
        let config = FillConfig::default();

        assert_eq!(config.grid.stickers_per_slide, 6);
        assert_eq!(config.grid.total_stickers, 120);
        assert_eq!(config.grid.capacity(), 6);
        assert_eq!(config.sheet.first_data_row, 3);
        assert_eq!(config.fields.point.columns, [9, 10, 11, 12]);
        assert_eq!(config.fields.amount.column, 13);
        assert_eq!(config.fields.cabinet.column, 14);
        assert!(!config.apply.geometry);
        assert!(!config.apply.font_sizes);

        config.validate().unwrap();
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = FillConfig::from_toml_str("").unwrap();
        assert_eq!(config.grid.total_stickers, 120);
        assert!(config.workbook.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let toml = r#"
            workbook = "loto.xlsm"

            [grid]
            total_stickers = 12

            [fields.cabinet]
            column = 20
        "#;
        let config = FillConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.workbook, Some(PathBuf::from("loto.xlsm")));
        assert_eq!(config.grid.total_stickers, 12);
        assert_eq!(config.grid.stickers_per_slide, 6);
        assert_eq!(config.fields.cabinet.column, 20);
        assert_eq!(config.fields.cabinet.font_size, 10.0);
        assert_eq!(config.fields.amount.column, 13);
    }

    #[test]
    fn test_apply_flags_parse_independently() {
        let config = FillConfig::from_toml_str("[apply]\ngeometry = true\n").unwrap();
        assert!(config.apply.geometry);
        assert!(!config.apply.font_sizes);

        let config = FillConfig::from_toml_str("[apply]\nfont_sizes = true\n").unwrap();
        assert!(!config.apply.geometry);
        assert!(config.apply.font_sizes);
    }

    #[test]
    fn test_validate_rejects_overfull_slides() {
        let mut config = FillConfig::default();
        config.grid.stickers_per_slide = 7;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("holds only 6"));
    }

    #[test]
    fn test_validate_rejects_degenerate_grids() {
        let mut config = FillConfig::default();
        config.grid.stickers_per_slide = 0;
        assert!(config.validate().is_err());

        let mut config = FillConfig::default();
        config.grid.total_stickers = 0;
        assert!(config.validate().is_err());

        let mut config = FillConfig::default();
        config.grid.column_lefts.clear();
        assert!(config.validate().is_err());

        let mut config = FillConfig::default();
        config.fields.amount.column = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_worksheet_row_offsets_past_headers() {
        let config = FillConfig::default();
        assert_eq!(config.worksheet_row(1), 3);
        assert_eq!(config.worksheet_row(13), 15);
        assert_eq!(config.worksheet_row(120), 122);
    }

    #[test]
    fn test_column_and_style_lookup_per_field() {
        let fields = FieldsConfig::default();

        assert_eq!(fields.column_for(StickerField::Point(1)), 9);
        assert_eq!(fields.column_for(StickerField::Point(4)), 12);
        assert_eq!(fields.column_for(StickerField::Amount), 13);
        assert_eq!(fields.column_for(StickerField::Cabinet), 14);

        assert_eq!(fields.size_for(StickerField::Amount).width, 32.03);
        assert_eq!(fields.size_for(StickerField::Point(2)).height, 34.02);
        assert_eq!(fields.font_size_for(StickerField::Cabinet), 10.0);
        assert_eq!(fields.font_size_for(StickerField::Point(3)), 20.0);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(FillConfig::from_toml_str("grid = 3").is_err());
        assert!(FillConfig::from_toml_str("[fields.point]\ncolumns = [9]").is_err());
    }
}
