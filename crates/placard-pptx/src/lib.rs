//! # placard-pptx
//!
//! PPTX deck editing for placard: open a sticker deck, find shapes by
//! name, and rewrite their text, position, and font size in place.
//!
//! Edits are streaming XML rewrites rather than full regeneration, so
//! template markup the fill does not touch survives byte-for-byte and
//! running the same fill twice produces an identical file.
//!
//! ## Features
//!
//! - **Shape Index**: Every slide scanned once for shape names and
//!   vertical-text settings
//! - **Text Replacement**: Single-run rewrite keeping run and paragraph
//!   formatting
//! - **Geometry**: Offset and extent rewritten in EMU, transforms
//!   inserted for shapes that inherit layout placement
//! - **Deterministic Output**: Package parts written in sorted order
//!
//! ## Example
//!
//! ```rust,ignore
//! use placard_pptx::StickerDeck;
//!
//! let mut deck = StickerDeck::open("stickers.pptx")?;
//! deck.write_text(3, "Point 13.01", "4.5")?;
//! deck.save()?;
//! ```

pub mod archive;
pub mod deck;
pub mod error;
pub mod slide;
pub mod test_utils;

// Re-exports
pub use archive::PptxArchive;
pub use deck::StickerDeck;
pub use error::{PptxError, Result};
pub use slide::{pt_to_emu, pt_to_sz, ShapeInfo, SlidePart};

/// PPTX-related constants
pub mod constants {
    /// EMU per typographic point
    pub const EMU_PER_POINT: i64 = 12_700;

    /// EMU per inch
    pub const EMU_PER_INCH: i64 = 914_400;

    /// Font size attribute units per point (`sz` is in centipoints)
    pub const SZ_PER_POINT: u32 = 100;

    /// PresentationML namespace
    pub const NS_PRESENTATION: &str =
        "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML namespace
    pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// Relationships namespace
    pub const NS_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
