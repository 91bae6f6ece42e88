//! Text measurement.
//!
//! The layout engine cannot rasterize fonts, so it delegates to a
//! [`TextMeasurer`]. The default implementation estimates extents from a
//! proportional per-glyph width table, which keeps layout fully
//! deterministic and dependency-free.

use crate::types::{Font, Size};

/// External capability the layout engine depends on for label extents.
pub trait TextMeasurer {
    /// Rendered extent of `text` in `font`.
    ///
    /// Must be deterministic for a given (text, font) pair, or layout is not
    /// reproducible.
    fn measure(&self, text: &str, font: &Font) -> Size;
}

/// Proportional glyph widths for ASCII 0x20..=0x7E, in 1/100ths of an
/// average glyph.
#[rustfmt::skip]
const GLYPH_WIDTHS: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Width of an average glyph relative to the font size.
const AVERAGE_GLYPH_EM: f64 = 0.6;

/// Line height relative to the font size. A single fixed factor means every
/// label measures to the same height for a given font, so sibling boxes line
/// up regardless of their text.
const LINE_HEIGHT_EM: f64 = 1.2;

/// Deterministic measurer backed by the proportional width table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalMeasurer;

impl TextMeasurer for ProportionalMeasurer {
    fn measure(&self, text: &str, font: &Font) -> Size {
        let mut units: u32 = 0;
        for c in text.chars() {
            units += match c {
                ' '..='~' => GLYPH_WIDTHS[c as usize - 0x20] as u32,
                _ => 100,
            };
        }
        Size::new(
            units as f64 * 0.01 * AVERAGE_GLYPH_EM * font.size,
            LINE_HEIGHT_EM * font.size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_is_independent_of_content() {
        let font = Font::default();
        let m = ProportionalMeasurer;
        let a = m.measure("a", &font);
        let b = m.measure("a considerably longer label", &font);
        assert_eq!(a.height, b.height);
        assert!(b.width > a.width);
    }

    #[test]
    fn width_scales_with_font_size() {
        let m = ProportionalMeasurer;
        let small = m.measure("label", &Font::new("sans-serif", 12.0));
        let large = m.measure("label", &Font::new("sans-serif", 24.0));
        assert!((large.width - 2.0 * small.width).abs() < 1e-9);
    }

    #[test]
    fn non_ascii_falls_back_to_average_width() {
        let font = Font::new("sans-serif", 10.0);
        let m = ProportionalMeasurer;
        let measured = m.measure("\u{00e9}", &font);
        assert!((measured.width - AVERAGE_GLYPH_EM * 10.0).abs() < 1e-9);
    }
}
