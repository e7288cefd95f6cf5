//! Sticker index to slide/position/coordinate mapping.
//!
//! Stickers are numbered from 1 and laid out in reading order across a grid
//! of identical slides: sticker 1 is the top-left cell of slide 1, sticker
//! `per_slide + 1` is the top-left cell of slide 2, and so on. All
//! coordinates are in points.

use crate::error::{FillError, Result};

/// Slide number (1-based) holding the given sticker
pub fn slide_for(index: u32, per_slide: u32) -> u32 {
    (index + per_slide - 1) / per_slide
}

/// Position (1-based, `1..=per_slide`) of the sticker on its slide
pub fn position_for(index: u32, per_slide: u32) -> u32 {
    ((index - 1) % per_slide) + 1
}

/// A size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizePt {
    pub width: f32,
    pub height: f32,
}

impl SizePt {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A placed rectangle in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPt {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Base coordinates of the sticker cells on a slide.
///
/// Positions run left to right, then top to bottom: position 1 is
/// `(column_lefts[0], row_tops[0])`, position 2 is the next column over.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideGrid {
    /// Left edge of each grid column, in points
    pub column_lefts: Vec<f32>,
    /// Top edge of each grid row, in points
    pub row_tops: Vec<f32>,
}

impl Default for SlideGrid {
    fn default() -> Self {
        // 2x3 sticker sheet on an A4 landscape slide
        Self {
            column_lefts: vec![2.0, 507.0],
            row_tops: vec![63.0, 245.0, 420.0],
        }
    }
}

impl SlideGrid {
    pub fn columns(&self) -> usize {
        self.column_lefts.len()
    }

    pub fn rows(&self) -> usize {
        self.row_tops.len()
    }

    /// Number of sticker positions the grid can hold
    pub fn capacity(&self) -> usize {
        self.columns() * self.rows()
    }

    /// Resolve a slide position to a placed rectangle of the given size.
    ///
    /// Positions beyond the grid capacity are an error, not a panic; the
    /// fill configuration is validated against the capacity up front so the
    /// driver never sees one.
    pub fn rect_for(&self, position: u32, size: SizePt) -> Result<RectPt> {
        let columns = self.columns();
        let rows = self.rows();
        if position == 0 || position as usize > columns * rows {
            return Err(FillError::PositionOutOfRange {
                position,
                columns,
                rows,
            });
        }

        let idx = (position - 1) as usize;
        Ok(RectPt {
            left: self.column_lefts[idx % columns],
            top: self.row_tops[idx / columns],
            width: size.width,
            height: size.height,
        })
    }
}
