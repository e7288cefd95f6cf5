//! The six placeholder fields of one sticker.

use std::fmt;

use serde::Serialize;

/// One of the six text placeholders a sticker carries.
///
/// The shape names on the slides follow a fixed convention built from the
/// zero-padded sticker number: `Point NN.MM` for the four isolation points,
/// `LOTO Amount NN` and `Cabinet NN` for the other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StickerField {
    /// Isolation point 1..=4
    Point(u8),
    /// Lock/tag amount
    Amount,
    /// Cabinet designation
    Cabinet,
}

impl StickerField {
    /// All fields of one sticker, in write order
    pub fn all() -> [StickerField; 6] {
        [
            StickerField::Point(1),
            StickerField::Point(2),
            StickerField::Point(3),
            StickerField::Point(4),
            StickerField::Amount,
            StickerField::Cabinet,
        ]
    }

    /// Name of the slide shape holding this field for the given sticker
    pub fn shape_name(&self, sticker: u32) -> String {
        match self {
            StickerField::Point(n) => format!("Point {:02}.{:02}", sticker, n),
            StickerField::Amount => format!("LOTO Amount {:02}", sticker),
            StickerField::Cabinet => format!("Cabinet {:02}", sticker),
        }
    }
}

impl fmt::Display for StickerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StickerField::Point(n) => write!(f, "point {}", n),
            StickerField::Amount => write!(f, "amount"),
            StickerField::Cabinet => write!(f, "cabinet"),
        }
    }
}
