//! Per-run fill report.
//!
//! Shape writes are best effort: one unwritable shape must never abort the
//! run. Instead of swallowing those outcomes, the driver records every
//! field write (and every sticker whose slide is absent) here, so the
//! caller can render warnings, a summary, or the whole report as JSON.

use std::fmt;

use serde::Serialize;

use crate::fields::StickerField;

/// Outcome of one field write
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum WriteStatus {
    /// Text landed in the shape
    Written { text: String },
    /// Shape holds vertical text; its content was left untouched
    SkippedVerticalText,
    /// The slide has no shape with the expected name
    SkippedMissingShape,
    /// The write itself failed
    Failed { reason: String },
}

impl WriteStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, WriteStatus::Written { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, WriteStatus::Failed { .. })
    }
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteStatus::Written { .. } => write!(f, "ok"),
            WriteStatus::SkippedVerticalText => write!(f, "skipped: vertical text"),
            WriteStatus::SkippedMissingShape => write!(f, "skipped: shape not found"),
            WriteStatus::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

/// One field write, with everything needed to locate it again
#[derive(Debug, Clone, Serialize)]
pub struct FieldOutcome {
    /// Sticker number (1-based)
    pub sticker: u32,
    /// Destination slide
    pub slide: u32,
    /// Which of the six fields
    pub field: StickerField,
    /// Shape name looked up on the slide
    pub shape: String,
    /// Source worksheet row
    pub row: u32,
    /// Source worksheet column
    pub col: u32,
    /// What happened to the text write
    #[serde(flatten)]
    pub status: WriteStatus,
    /// Geometry/font application failure, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_error: Option<String>,
}

/// A sticker whose destination slide does not exist in the deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingSlide {
    pub sticker: u32,
    pub slide: u32,
}

/// Everything one fill run did
#[derive(Debug, Clone, Default, Serialize)]
pub struct FillReport {
    pub outcomes: Vec<FieldOutcome>,
    pub missing_slides: Vec<MissingSlide>,
}

impl FillReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: FieldOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn record_missing_slide(&mut self, sticker: u32, slide: u32) {
        self.missing_slides.push(MissingSlide { sticker, slide });
    }

    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_written()).count()
    }

    pub fn skipped_vertical(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == WriteStatus::SkippedVerticalText)
            .count()
    }

    pub fn skipped_missing_shapes(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == WriteStatus::SkippedMissingShape)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_failed()).count()
    }

    pub fn layout_failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.layout_error.is_some()).count()
    }

    /// True when nothing unexpected happened: no failures, no missing
    /// slides, no missing shapes. Vertical-text skips are expected (those
    /// shapes opt out by design of the template) and do not dirty a run.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
            && self.layout_failures() == 0
            && self.missing_slides.is_empty()
            && self.skipped_missing_shapes() == 0
    }
}

impl fmt::Display for FillReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} written, {} skipped ({} missing shapes, {} vertical), {} failed",
            self.written(),
            self.skipped_missing_shapes() + self.skipped_vertical(),
            self.skipped_missing_shapes(),
            self.skipped_vertical(),
            self.failed()
        )?;
        if !self.missing_slides.is_empty() {
            write!(f, ", {} stickers without a slide", self.missing_slides.len())?;
        }
        Ok(())
    }
}
