//! Error types for PPTX deck editing.

use thiserror::Error;

/// Result type for PPTX operations
pub type Result<T> = std::result::Result<T, PptxError>;

/// Errors that can occur while opening or editing a deck
#[derive(Error, Debug)]
pub enum PptxError {
    /// Deck file not found or inaccessible
    #[error("Deck not found: {path}")]
    DeckNotFound { path: String },

    /// Deck is not a usable PPTX package
    #[error("Invalid deck: {reason}")]
    InvalidDeck { reason: String },

    /// A required package part is missing
    #[error("Missing package part: {path}")]
    MissingPart { path: String },

    /// Slide number outside the deck
    #[error("Slide {slide} not found in deck")]
    SlideNotFound { slide: u32 },

    /// Named shape absent from the slide
    #[error("Shape '{name}' not found on slide {slide}")]
    ShapeNotFound { slide: u32, name: String },

    /// XML parsing or generation error
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// ZIP archive error
    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PptxError {
    /// Create a deck not found error
    pub fn deck_not_found(path: impl Into<String>) -> Self {
        Self::DeckNotFound { path: path.into() }
    }

    /// Create an invalid deck error
    pub fn invalid_deck(reason: impl Into<String>) -> Self {
        Self::InvalidDeck {
            reason: reason.into(),
        }
    }

    /// Create a missing part error
    pub fn missing_part(path: impl Into<String>) -> Self {
        Self::MissingPart { path: path.into() }
    }

    /// Create a shape not found error
    pub fn shape_not_found(slide: u32, name: impl Into<String>) -> Self {
        Self::ShapeNotFound {
            slide,
            name: name.into(),
        }
    }
}
