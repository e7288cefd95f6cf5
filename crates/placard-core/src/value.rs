//! Cell values and their sticker text form.

/// A value read from one worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell (or a cell outside the used range)
    Empty,
    /// Numeric cell
    Number(f64),
    /// Text cell
    Text(String),
}

impl CellValue {
    /// Render the value as sticker text.
    ///
    /// Blank cells, NaN numbers and the spreadsheet sentinel strings
    /// `"nan"`/`"None"` all come out as the empty string, so a hole in the
    /// data clears the placeholder instead of printing a sentinel. Numbers
    /// are rounded to two decimals and drop a trailing `.0` (`4.0` becomes
    /// `"4"`, `4.567` becomes `"4.57"`). Text is trimmed.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                if n.is_nan() {
                    return String::new();
                }
                let rounded = (n * 100.0).round() / 100.0;
                format!("{}", rounded)
            }
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed == "nan" || trimmed == "None" {
                    String::new()
                } else {
                    trimmed.to_string()
                }
            }
        }
    }

    /// Parse a raw text field, folding numeric-looking content into a number.
    ///
    /// Used by sources without typed cells (CSV) so `"4.50"` formats the
    /// same way it would coming out of a numeric worksheet cell.
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::Text(trimmed.to_string()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_forms_render_blank() {
        assert_eq!(CellValue::Empty.display_text(), "");
        assert_eq!(CellValue::Number(f64::NAN).display_text(), "");
        assert_eq!(CellValue::Text("".to_string()).display_text(), "");
        assert_eq!(CellValue::Text("   ".to_string()).display_text(), "");
        assert_eq!(CellValue::Text("nan".to_string()).display_text(), "");
        assert_eq!(CellValue::Text("None".to_string()).display_text(), "");
        assert_eq!(CellValue::Text(" nan ".to_string()).display_text(), "");
    }

    #[test]
    fn test_integral_numbers_drop_the_point() {
        assert_eq!(CellValue::Number(4.0).display_text(), "4");
        assert_eq!(CellValue::Number(0.0).display_text(), "0");
        assert_eq!(CellValue::Number(120.0).display_text(), "120");
        assert_eq!(CellValue::Number(-3.0).display_text(), "-3");
    }

    #[test]
    fn test_fractional_numbers_round_to_two_decimals() {
        assert_eq!(CellValue::Number(4.5).display_text(), "4.5");
        assert_eq!(CellValue::Number(4.567).display_text(), "4.57");
        assert_eq!(CellValue::Number(2.50).display_text(), "2.5");
        assert_eq!(CellValue::Number(0.125).display_text(), "0.13");
        assert_eq!(CellValue::Number(-1.005).display_text(), "-1");
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(CellValue::Text(" abc ".to_string()).display_text(), "abc");
        assert_eq!(CellValue::Text("C-01".to_string()).display_text(), "C-01");
    }

    #[test]
    fn test_from_field_parses_numbers() {
        assert_eq!(CellValue::from_field("4.50"), CellValue::Number(4.5));
        assert_eq!(CellValue::from_field(" 12 "), CellValue::Number(12.0));
        assert_eq!(
            CellValue::from_field("C-01"),
            CellValue::Text("C-01".to_string())
        );
        assert_eq!(CellValue::from_field("  "), CellValue::Empty);
    }

    #[test]
    fn test_from_field_matches_numeric_formatting() {
        // "4.50" through a CSV field renders like a numeric cell would
        assert_eq!(CellValue::from_field("4.50").display_text(), "4.5");
    }
}
