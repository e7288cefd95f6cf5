//! Deck-level editing: a PPTX package with its slides parsed and indexed.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use placard_core::{RectPt, SlideDeck, TextWrite};

use crate::archive::PptxArchive;
use crate::error::{PptxError, Result};
use crate::slide::SlidePart;

/// A sticker deck opened for editing.
///
/// Slide N always maps to the package part `ppt/slides/slideN.xml`;
/// a deck whose slide parts are numbered with gaps is rejected.
#[derive(Debug)]
pub struct StickerDeck {
    archive: PptxArchive,
    path: Option<PathBuf>,
    slides: Vec<SlidePart>,
}

impl StickerDeck {
    /// Open a deck from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PptxError::deck_not_found(path.display().to_string()));
        }
        let archive = PptxArchive::open(path)?;
        let mut deck = Self::load(archive)?;
        deck.path = Some(path.to_path_buf());
        Ok(deck)
    }

    /// Open a deck from in-memory bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let archive = PptxArchive::from_reader(Cursor::new(bytes))?;
        Self::load(archive)
    }

    fn load(archive: PptxArchive) -> Result<Self> {
        // a package without a presentation part is not a deck
        archive.presentation_xml()?;

        let count = archive.slide_count();
        let mut slides = Vec::with_capacity(count as usize);
        for number in 1..=count {
            let part = PptxArchive::slide_path(number);
            let xml = archive
                .get_string(&part)?
                .ok_or_else(|| PptxError::missing_part(part))?;
            slides.push(SlidePart::parse(number, xml)?);
        }

        Ok(Self {
            archive,
            path: None,
            slides,
        })
    }

    /// Path the deck was opened from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Borrow a slide by number (1-based)
    pub fn slide(&self, number: u32) -> Option<&SlidePart> {
        number
            .checked_sub(1)
            .and_then(|i| self.slides.get(i as usize))
    }

    fn slide_mut(&mut self, number: u32) -> Result<&mut SlidePart> {
        number
            .checked_sub(1)
            .and_then(|i| self.slides.get_mut(i as usize))
            .ok_or(PptxError::SlideNotFound { slide: number })
    }

    fn sync(&mut self) {
        for slide in &self.slides {
            self.archive
                .set_string(PptxArchive::slide_path(slide.number()), slide.xml());
        }
    }

    /// Write the deck back to the file it was opened from
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Err(PptxError::invalid_deck(
                "deck has no backing file; use save_as",
            ));
        };
        self.save_as(path)
    }

    /// Write the deck to the given path
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.sync();
        self.archive.write_to_file(path)
    }

    /// Serialize the deck to PPTX bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.sync();
        self.archive.to_bytes()
    }
}

impl SlideDeck for StickerDeck {
    type Error = PptxError;

    fn slide_count(&self) -> u32 {
        self.slides.len() as u32
    }

    fn has_shape(&self, slide: u32, name: &str) -> bool {
        self.slide(slide).is_some_and(|s| s.has_shape(name))
    }

    fn write_text(
        &mut self,
        slide: u32,
        name: &str,
        text: &str,
    ) -> std::result::Result<TextWrite, PptxError> {
        self.slide_mut(slide)?.set_text(name, text)
    }

    fn apply_geometry(
        &mut self,
        slide: u32,
        name: &str,
        rect: RectPt,
    ) -> std::result::Result<(), PptxError> {
        self.slide_mut(slide)?.set_geometry(name, rect)
    }

    fn apply_font_size(
        &mut self,
        slide: u32,
        name: &str,
        size_pt: f32,
    ) -> std::result::Result<(), PptxError> {
        self.slide_mut(slide)?.set_font_size(name, size_pt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{deck_bytes, shape_xml, slide_xml, sticker_deck_bytes};

    #[test]
    fn test_open_indexes_slides_and_shapes() {
        let bytes = sticker_deck_bytes(2, 6);
        let deck = StickerDeck::from_bytes(&bytes).unwrap();

        assert_eq!(deck.slide_count(), 2);
        assert!(deck.has_shape(1, "Point 01.01"));
        assert!(deck.has_shape(1, "LOTO Amount 06"));
        assert!(deck.has_shape(2, "Cabinet 12"));
        assert!(!deck.has_shape(1, "Cabinet 12"));
        assert!(!deck.has_shape(3, "Cabinet 12"));
    }

    #[test]
    fn test_write_text_lands_on_the_right_slide() {
        let bytes = sticker_deck_bytes(2, 6);
        let mut deck = StickerDeck::from_bytes(&bytes).unwrap();

        let write = deck.write_text(2, "Cabinet 07", "K7").unwrap();
        assert_eq!(write, TextWrite::Applied);
        assert_eq!(
            deck.slide(2).unwrap().shape_text("Cabinet 07").as_deref(),
            Some("K7")
        );
        // slide 1 keeps its placeholder
        assert_eq!(
            deck.slide(1).unwrap().shape_text("Cabinet 01").as_deref(),
            Some("XX")
        );
    }

    #[test]
    fn test_write_text_unknown_slide_errors() {
        let bytes = sticker_deck_bytes(1, 6);
        let mut deck = StickerDeck::from_bytes(&bytes).unwrap();

        let err = deck.write_text(9, "Cabinet 01", "x").unwrap_err();
        assert!(matches!(err, PptxError::SlideNotFound { slide: 9 }));
        let err = deck.write_text(0, "Cabinet 01", "x").unwrap_err();
        assert!(matches!(err, PptxError::SlideNotFound { slide: 0 }));
    }

    #[test]
    fn test_edits_survive_serialization() {
        let bytes = sticker_deck_bytes(1, 6);
        let mut deck = StickerDeck::from_bytes(&bytes).unwrap();

        deck.write_text(1, "Point 01.01", "4.5").unwrap();
        deck.apply_font_size(1, "Point 01.01", 20.0).unwrap();
        let saved = deck.to_bytes().unwrap();

        let reopened = StickerDeck::from_bytes(&saved).unwrap();
        assert_eq!(
            reopened.slide(1).unwrap().shape_text("Point 01.01").as_deref(),
            Some("4.5")
        );
        assert!(reopened.slide(1).unwrap().xml().contains(r#"sz="2000""#));
    }

    #[test]
    fn test_save_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stickers.pptx");
        std::fs::write(&path, sticker_deck_bytes(1, 6)).unwrap();

        let mut deck = StickerDeck::open(&path).unwrap();
        assert_eq!(deck.path(), Some(path.as_path()));
        deck.write_text(1, "Cabinet 01", "K7").unwrap();
        deck.save().unwrap();

        let reopened = StickerDeck::open(&path).unwrap();
        assert_eq!(
            reopened.slide(1).unwrap().shape_text("Cabinet 01").as_deref(),
            Some("K7")
        );
    }

    #[test]
    fn test_open_missing_file_errors() {
        let err = StickerDeck::open("no-such-deck.pptx").unwrap_err();
        assert!(matches!(err, PptxError::DeckNotFound { .. }));
    }

    #[test]
    fn test_from_bytes_requires_presentation_part() {
        use std::io::Write as _;

        let mut buffer = std::io::Cursor::new(Vec::new());
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("mimetype", options).unwrap();
        zip.write_all(b"not a deck").unwrap();
        zip.finish().unwrap();

        let err = StickerDeck::from_bytes(&buffer.into_inner()).unwrap_err();
        assert!(matches!(err, PptxError::MissingPart { .. }));
    }

    #[test]
    fn test_gapped_slide_numbering_is_rejected() {
        let slide = slide_xml(&shape_xml(2, "Cabinet 01", "XX"));
        // hand-build a package whose only slide part is number 3
        let bytes = {
            let from = deck_bytes(&[slide]);
            let mut archive = PptxArchive::from_reader(Cursor::new(from)).unwrap();
            let xml = archive.get_string("ppt/slides/slide1.xml").unwrap().unwrap();
            archive.set_string("ppt/slides/slide3.xml", xml);
            archive.to_bytes().unwrap()
        };

        let err = StickerDeck::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, PptxError::MissingPart { .. }));
    }
}
