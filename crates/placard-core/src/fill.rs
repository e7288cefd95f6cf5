//! The fill driver.
//!
//! Walks sticker indices in order, maps each to a slide and worksheet row,
//! reads the six field cells and writes them into the named shapes. A
//! missing slide or shape is recorded and skipped; a shape-level write
//! failure is recorded and the run continues; only source failures (after
//! retries) and configuration errors abort.

use crate::config::FillConfig;
use crate::error::Result;
use crate::fields::StickerField;
use crate::grid::{position_for, slide_for, RectPt};
use crate::reader::{fetch_cell, CellSource, RetryPolicy};
use crate::report::{FieldOutcome, FillReport, WriteStatus};

/// What a text write did to the shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextWrite {
    /// Text replaced the shape's content
    Applied,
    /// Shape holds vertical text and was left untouched
    SkippedVertical,
}

/// Mutable view of a presentation the driver can fill.
///
/// `write_text` reports vertical-text shapes instead of writing them;
/// geometry and font application are separate so the two apply switches
/// stay independent.
pub trait SlideDeck {
    type Error: std::fmt::Display;

    /// Number of slides in the deck
    fn slide_count(&self) -> u32;

    /// Whether the slide carries a shape with this name
    fn has_shape(&self, slide: u32, name: &str) -> bool;

    /// Replace the shape's text
    fn write_text(
        &mut self,
        slide: u32,
        name: &str,
        text: &str,
    ) -> std::result::Result<TextWrite, Self::Error>;

    /// Move and resize the shape
    fn apply_geometry(
        &mut self,
        slide: u32,
        name: &str,
        rect: RectPt,
    ) -> std::result::Result<(), Self::Error>;

    /// Set the font size of the shape's text, in points
    fn apply_font_size(
        &mut self,
        slide: u32,
        name: &str,
        size_pt: f32,
    ) -> std::result::Result<(), Self::Error>;
}

/// Fill every sticker the configuration names and report what happened.
pub fn run_fill<S, D>(
    config: &FillConfig,
    source: &mut S,
    deck: &mut D,
    policy: RetryPolicy,
) -> Result<FillReport>
where
    S: CellSource,
    D: SlideDeck,
{
    config.validate()?;

    let grid = config.grid.slide_grid();
    let per_slide = config.grid.stickers_per_slide;
    let mut report = FillReport::new();

    for sticker in 1..=config.grid.total_stickers {
        let slide = slide_for(sticker, per_slide);
        let position = position_for(sticker, per_slide);

        if slide > deck.slide_count() {
            report.record_missing_slide(sticker, slide);
            continue;
        }

        let row = config.worksheet_row(sticker);

        for field in StickerField::all() {
            let shape = field.shape_name(sticker);
            let col = config.fields.column_for(field);

            if !deck.has_shape(slide, &shape) {
                // No shape, no read: the cell stays untouched too
                report.record(FieldOutcome {
                    sticker,
                    slide,
                    field,
                    shape,
                    row,
                    col,
                    status: WriteStatus::SkippedMissingShape,
                    layout_error: None,
                });
                continue;
            }

            let value = fetch_cell(source, row, col, policy)?;
            let text = value.display_text();

            let status = match deck.write_text(slide, &shape, &text) {
                Ok(TextWrite::Applied) => WriteStatus::Written { text },
                Ok(TextWrite::SkippedVertical) => WriteStatus::SkippedVerticalText,
                Err(e) => WriteStatus::Failed {
                    reason: e.to_string(),
                },
            };

            // Geometry and font sizing follow their own switches and run
            // even for vertical-text shapes, which only opt out of text.
            let mut layout_error = None;
            if config.apply.geometry {
                let rect = grid.rect_for(position, config.fields.size_for(field))?;
                if let Err(e) = deck.apply_geometry(slide, &shape, rect) {
                    layout_error = Some(format!("geometry: {}", e));
                }
            }
            if config.apply.font_sizes {
                let size = config.fields.font_size_for(field);
                if let Err(e) = deck.apply_font_size(slide, &shape, size) {
                    let msg = format!("font size: {}", e);
                    layout_error = Some(match layout_error {
                        Some(prev) => format!("{}; {}", prev, msg),
                        None => msg,
                    });
                }
            }

            report.record(FieldOutcome {
                sticker,
                slide,
                field,
                shape,
                row,
                col,
                status,
                layout_error,
            });
        }
    }

    Ok(report)
}
