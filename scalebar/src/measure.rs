// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label extents for indicator layout.
//!
//! The distance label has to be reserved next to (or above) the ruler before the indicator is
//! anchored, otherwise a corner-anchored label could spill out of the padded view. Glyph
//! shaping belongs to the host's text stack, so layout only asks for a width and height.

/// Reports the extent of a distance label such as `"200 m"` or `"0.5 mi"`.
///
/// Hosts with a text engine should answer from real font metrics; the indicator then reserves
/// exactly the space its label takes. [`HeuristicTextMeasurer`] works without one.
pub trait TextMeasurer {
    /// Returns `(width, height)` in view pixels of `text` set at `font_size`.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// Estimates label extents from character classes.
///
/// Labels are mostly tabular digits, a space and a short unit, so digits count 0.55em, spaces
/// and decimal points 0.3em and everything else 0.6em. Height is 1em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let ems: f64 = text
            .chars()
            .map(|c| match c {
                '0'..='9' => 0.55,
                ' ' | '.' => 0.3,
                _ => 0.6,
            })
            .sum();
        (ems * font_size, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_width_follows_character_classes() {
        let (w, h) = HeuristicTextMeasurer.measure("200 m", 10.0);
        // Three digits, a space and one letter.
        assert!((w - (3.0 * 5.5 + 3.0 + 6.0)).abs() < 1e-9);
        assert_eq!(h, 10.0);
    }

    #[test]
    fn fractional_labels_are_narrower_than_padded_ones() {
        let m = HeuristicTextMeasurer;
        assert!(m.measure("0.5 mi", 12.0).0 < m.measure("500 mi", 12.0).0);
        assert_eq!(m.measure("", 12.0).0, 0.0);
    }
}
