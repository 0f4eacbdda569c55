// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual styles and theme parameters.

use peniko::Color;
use peniko::color::palette::css;

/// How the indicator is drawn. The style never affects the computed distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleStyle {
    /// A single filled bar with a contrasting outline.
    #[default]
    Bar,
    /// A bar divided into an even number of segments of alternating fill.
    AlternatingBar,
    /// A line with perpendicular ticks at both ends and the midpoint.
    TapeMeasure,
}

impl ScaleStyle {
    /// All styles, in declaration order.
    pub const ALL: [Self; 3] = [Self::Bar, Self::AlternatingBar, Self::TapeMeasure];
}

/// Upper bound on the segments of an [`ScaleStyle::AlternatingBar`].
const MAX_SEGMENTS: usize = 64;

/// Paint and metrics shared by all styles.
///
/// Fields can be set directly; the renderer treats negative and non-finite metrics as zero.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBarTheme {
    /// Primary paint: bar fill, tape line, label glyphs.
    pub dark: Color,
    /// Contrasting paint: outlines, halos, alternate segments.
    pub light: Color,
    /// Bar thickness.
    pub bar_height: f64,
    /// Width of outlines around filled shapes, and of tape lines.
    pub outline_width: f64,
    /// Width of the contrasting halo under tape lines and label glyphs.
    pub halo_width: f64,
    /// Full height of the end ticks of the tape measure. The midpoint tick is half as tall.
    pub tick_height: f64,
    /// Label font size.
    pub font_size: f64,
    /// Gap between the ruler and its label.
    pub label_gap: f64,
    /// Requested number of alternating segments; see [`ScaleBarTheme::segment_count`].
    pub segments: usize,
}

impl Default for ScaleBarTheme {
    fn default() -> Self {
        Self {
            dark: css::BLACK,
            light: css::WHITE,
            bar_height: 6.0,
            outline_width: 1.0,
            halo_width: 3.0,
            tick_height: 10.0,
            font_size: 12.0,
            label_gap: 3.0,
            segments: 4,
        }
    }
}

impl ScaleBarTheme {
    /// Sets the primary and contrasting paints.
    pub fn with_colors(mut self, dark: Color, light: Color) -> Self {
        self.dark = dark;
        self.light = light;
        self
    }

    /// Sets the bar thickness.
    pub fn with_bar_height(mut self, bar_height: f64) -> Self {
        self.bar_height = bar_height.max(0.0);
        self
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size.max(0.0);
        self
    }

    /// Sets the requested segment count for [`ScaleStyle::AlternatingBar`].
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    /// The segment count actually drawn: `segments` rounded up to an even number in `2..=64`.
    pub fn segment_count(&self) -> usize {
        let n = self.segments.clamp(2, MAX_SEGMENTS);
        n + n % 2
    }

    /// A copy with every metric made finite and non-negative.
    pub(crate) fn sanitized(&self) -> Self {
        Self {
            bar_height: clamp_metric(self.bar_height),
            outline_width: clamp_metric(self.outline_width),
            halo_width: clamp_metric(self.halo_width),
            tick_height: clamp_metric(self.tick_height),
            font_size: clamp_metric(self.font_size),
            label_gap: clamp_metric(self.label_gap),
            ..self.clone()
        }
    }
}

fn clamp_metric(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_count_is_even_and_at_least_two() {
        let theme = ScaleBarTheme::default();
        assert_eq!(theme.segment_count(), 4);
        assert_eq!(theme.clone().with_segments(0).segment_count(), 2);
        assert_eq!(theme.clone().with_segments(1).segment_count(), 2);
        assert_eq!(theme.clone().with_segments(5).segment_count(), 6);
        assert_eq!(theme.with_segments(8).segment_count(), 8);
    }

    #[test]
    fn huge_segment_request_is_capped() {
        let theme = ScaleBarTheme::default().with_segments(usize::MAX);
        assert_eq!(theme.segment_count(), 64);
        assert_eq!(theme.with_segments(63).segment_count(), 64);
    }

    #[test]
    fn sanitized_clears_bad_metrics() {
        let theme = ScaleBarTheme {
            bar_height: -4.0,
            halo_width: f64::NAN,
            font_size: f64::INFINITY,
            ..ScaleBarTheme::default()
        }
        .sanitized();
        assert_eq!(theme.bar_height, 0.0);
        assert_eq!(theme.halo_width, 0.0);
        assert_eq!(theme.font_size, 0.0);
        assert_eq!(theme.tick_height, 10.0);
        assert_eq!(theme.dark, css::BLACK);
    }
}
