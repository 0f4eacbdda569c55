// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale indicator mark generation.
//!
//! [`ScaleBarSpec`] follows a measure/arrange shape:
//! - **Measure**: the ruler length plus the label extent (via a [`TextMeasurer`]).
//! - **Arrange**: anchor that box at the configured [`ScalePosition`] inside the padded bounds.
//!
//! The style then selects one drawing routine. Every filled shape or line is paired with a
//! contrasting outline or halo.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use smallvec::SmallVec;

use crate::calculator::ScaleResult;
use crate::layout::{Padding, ScalePosition, Size};
use crate::mark::{Mark, MarkId, StrokeStyle, TextAnchor, TextBaseline, TextPayload};
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::style::{ScaleBarTheme, ScaleStyle};
use crate::surface::DrawingSurface;
use crate::z_order;

const ID_HALO: u64 = 0;
const ID_OUTLINE: u64 = 1;
const ID_LABEL: u64 = 2;
const ID_BAR: u64 = 3;
const ID_SEGMENTS: u64 = 100;

/// Arranged geometry of one indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBarLayout {
    /// The whole indicator: ruler, outline and label.
    pub frame: Rect,
    /// The ruler. For the tape measure this is the band spanned by the end ticks.
    pub ruler: Rect,
    /// The label box.
    pub label_rect: Rect,
    /// The label text.
    pub label: String,
}

/// An indicator specification: style, placement and theme.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBarSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// Drawing routine.
    pub style: ScaleStyle,
    /// Anchor corner or edge.
    pub position: ScalePosition,
    /// Inset from the bounds.
    pub padding: Padding,
    /// Paint and metrics.
    pub theme: ScaleBarTheme,
}

impl Default for ScaleBarSpec {
    fn default() -> Self {
        Self::new(ScaleStyle::default())
    }
}

impl ScaleBarSpec {
    /// Creates a spec with the default placement and theme.
    pub fn new(style: ScaleStyle) -> Self {
        Self {
            id_base: 0,
            style,
            position: ScalePosition::default(),
            padding: Padding::default(),
            theme: ScaleBarTheme::default(),
        }
    }

    /// Sets the stable-id base.
    pub fn with_id_base(mut self, id_base: u64) -> Self {
        self.id_base = id_base;
        self
    }

    /// Sets the anchor position.
    pub fn with_position(mut self, position: ScalePosition) -> Self {
        self.position = position;
        self
    }

    /// Sets the padding.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the theme.
    pub fn with_theme(mut self, theme: ScaleBarTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Measures the indicator for `result`.
    ///
    /// Returns `None` when there is nothing to draw (non-positive or non-finite pixel length).
    pub fn measure(&self, result: &ScaleResult, measurer: &impl TextMeasurer) -> Option<Size> {
        self.measure_with_label(result, measurer)
            .map(|(size, _, _)| size)
    }

    fn measure_with_label(
        &self,
        result: &ScaleResult,
        measurer: &impl TextMeasurer,
    ) -> Option<(Size, String, Size)> {
        let length = result.pixel_length;
        if !length.is_finite() || length <= 0.0 {
            return None;
        }
        let t = &self.theme.sanitized();
        let label = result.label();
        let (lw, lh) = measurer.measure(&label, t.font_size);
        let label_size = Size::new(lw, lh);
        let edge = self.edge_width();
        let size = match self.style {
            ScaleStyle::Bar | ScaleStyle::AlternatingBar => Size::new(
                (length + edge).max(lw),
                lh + t.label_gap + t.bar_height + edge,
            ),
            ScaleStyle::TapeMeasure => Size::new(
                length + edge + t.label_gap + lw,
                (t.tick_height + edge).max(lh),
            ),
        };
        Some((size, label, label_size))
    }

    /// Arranges the indicator inside `bounds`.
    pub fn layout(
        &self,
        bounds: Rect,
        result: &ScaleResult,
        measurer: &impl TextMeasurer,
    ) -> Option<ScaleBarLayout> {
        let (size, label, label_size) = self.measure_with_label(result, measurer)?;
        let frame = self.position.anchor(self.padding.inset(bounds), size);
        let length = result.pixel_length;
        let t = &self.theme.sanitized();
        let half_edge = self.edge_width() * 0.5;

        let (ruler, label_rect) = match self.style {
            ScaleStyle::Bar | ScaleStyle::AlternatingBar => {
                let x0 = match self.position {
                    ScalePosition::TopLeft | ScalePosition::BottomLeft => frame.x0 + half_edge,
                    ScalePosition::Top | ScalePosition::Bottom => frame.center().x - length * 0.5,
                    ScalePosition::TopRight | ScalePosition::BottomRight => {
                        frame.x1 - half_edge - length
                    }
                };
                let (ruler_y0, label_y0) = if self.position.is_top() {
                    let ruler_y0 = frame.y0 + half_edge;
                    (
                        ruler_y0,
                        ruler_y0 + t.bar_height + half_edge + t.label_gap,
                    )
                } else {
                    (
                        frame.y0 + label_size.height + t.label_gap + half_edge,
                        frame.y0,
                    )
                };
                let ruler = Rect::new(x0, ruler_y0, x0 + length, ruler_y0 + t.bar_height);
                // Center the label over the ruler without leaving the frame.
                let half_label = label_size.width * 0.5;
                let cx = ruler
                    .center()
                    .x
                    .max(frame.x0 + half_label)
                    .min(frame.x1 - half_label);
                let label_rect = Rect::new(
                    cx - half_label,
                    label_y0,
                    cx + half_label,
                    label_y0 + label_size.height,
                );
                (ruler, label_rect)
            }
            ScaleStyle::TapeMeasure => {
                let cy = frame.center().y;
                let x0 = frame.x0 + half_edge;
                let half_tick = t.tick_height * 0.5;
                let ruler = Rect::new(x0, cy - half_tick, x0 + length, cy + half_tick);
                let lx = ruler.x1 + half_edge + t.label_gap;
                let label_rect = Rect::new(
                    lx,
                    cy - label_size.height * 0.5,
                    lx + label_size.width,
                    cy + label_size.height * 0.5,
                );
                (ruler, label_rect)
            }
        };

        Some(ScaleBarLayout {
            frame,
            ruler,
            label_rect,
            label,
        })
    }

    /// Generates the indicator marks. Empty when `result` has nothing to draw.
    pub fn marks(
        &self,
        bounds: Rect,
        result: &ScaleResult,
        measurer: &impl TextMeasurer,
    ) -> Vec<Mark> {
        let Some(layout) = self.layout(bounds, result, measurer) else {
            return Vec::new();
        };
        let mut out = match self.style {
            ScaleStyle::Bar => self.bar_marks(&layout),
            ScaleStyle::AlternatingBar => self.alternating_bar_marks(&layout),
            ScaleStyle::TapeMeasure => self.tape_measure_marks(&layout),
        };
        out.push(self.label_mark(&layout));
        out
    }

    /// Draws the indicator into `surface`.
    pub fn render(
        &self,
        surface: &mut impl DrawingSurface,
        bounds: Rect,
        result: &ScaleResult,
        measurer: &impl TextMeasurer,
    ) {
        for mark in self.marks(bounds, result, measurer) {
            surface.draw(mark);
        }
    }

    /// Width of the outermost stroke centered on the ruler outline.
    fn edge_width(&self) -> f64 {
        let t = &self.theme.sanitized();
        match self.style {
            ScaleStyle::Bar => t.outline_width,
            ScaleStyle::AlternatingBar => t.outline_width.max(t.halo_width),
            ScaleStyle::TapeMeasure => t.outline_width + t.halo_width,
        }
    }

    fn id(&self, offset: u64) -> MarkId {
        MarkId::from_raw(self.id_base.wrapping_add(offset))
    }

    fn bar_marks(&self, layout: &ScaleBarLayout) -> Vec<Mark> {
        let t = &self.theme.sanitized();
        alloc::vec![Mark::rect(
            self.id(ID_BAR),
            z_order::FILL,
            layout.ruler,
            t.dark,
            Some(StrokeStyle::solid(t.light, t.outline_width)),
        )]
    }

    fn alternating_bar_marks(&self, layout: &ScaleBarLayout) -> Vec<Mark> {
        let t = &self.theme.sanitized();
        let ruler = layout.ruler;
        let n = t.segment_count();
        let step = ruler.width() / n as f64;

        let mut out = Vec::with_capacity(n + 2);
        out.push(Mark::path(
            self.id(ID_HALO),
            z_order::HALO,
            rect_path(ruler),
            StrokeStyle::solid(t.light, t.halo_width),
        ));
        for i in 0..n {
            let x0 = ruler.x0 + step * i as f64;
            let x1 = if i + 1 == n { ruler.x1 } else { x0 + step };
            let fill = if i % 2 == 0 { t.dark } else { t.light };
            out.push(Mark::rect(
                self.id(ID_SEGMENTS + i as u64),
                z_order::FILL,
                Rect::new(x0, ruler.y0, x1, ruler.y1),
                fill,
                None,
            ));
        }
        out.push(Mark::path(
            self.id(ID_OUTLINE),
            z_order::OUTLINE,
            rect_path(ruler),
            StrokeStyle::solid(t.dark, t.outline_width),
        ));
        out
    }

    fn tape_measure_marks(&self, layout: &ScaleBarLayout) -> Vec<Mark> {
        let t = &self.theme.sanitized();
        let ruler = layout.ruler;
        let cy = ruler.center().y;
        let half_tick = ruler.height() * 0.5;

        let ticks: SmallVec<[(f64, f64); 3]> = smallvec::smallvec![
            (ruler.x0, half_tick),
            (ruler.center().x, half_tick * 0.5),
            (ruler.x1, half_tick),
        ];
        let mut p = BezPath::new();
        p.move_to((ruler.x0, cy));
        p.line_to((ruler.x1, cy));
        for (x, half) in ticks {
            p.move_to((x, cy - half));
            p.line_to((x, cy + half));
        }

        alloc::vec![
            Mark::path(
                self.id(ID_HALO),
                z_order::HALO,
                p.clone(),
                StrokeStyle::solid(t.light, t.outline_width + t.halo_width),
            ),
            Mark::path(
                self.id(ID_OUTLINE),
                z_order::OUTLINE,
                p,
                StrokeStyle::solid(t.dark, t.outline_width),
            ),
        ]
    }

    fn label_mark(&self, layout: &ScaleBarLayout) -> Mark {
        let t = &self.theme.sanitized();
        let r = layout.label_rect;
        // Labels hang below a top bar and sit on top of a bottom bar.
        let (pos, anchor, baseline) = match self.style {
            ScaleStyle::TapeMeasure => (
                Point::new(r.x0, r.center().y),
                TextAnchor::Start,
                TextBaseline::Middle,
            ),
            ScaleStyle::Bar | ScaleStyle::AlternatingBar if self.position.is_top() => (
                Point::new(r.center().x, r.y0),
                TextAnchor::Middle,
                TextBaseline::Hanging,
            ),
            ScaleStyle::Bar | ScaleStyle::AlternatingBar => (
                Point::new(r.center().x, r.y1),
                TextAnchor::Middle,
                TextBaseline::Alphabetic,
            ),
        };
        Mark::text(
            self.id(ID_LABEL),
            z_order::LABEL,
            TextPayload {
                pos,
                text: layout.label.clone(),
                font_size: t.font_size,
                anchor,
                baseline,
                fill: t.dark.into(),
                halo: Some(StrokeStyle::solid(t.light, t.halo_width)),
            },
        )
    }
}

fn rect_path(r: Rect) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((r.x0, r.y0));
    p.line_to((r.x1, r.y0));
    p.line_to((r.x1, r.y1));
    p.line_to((r.x0, r.y1));
    p.close_path();
    p
}

/// Draws a scale indicator for `result` into `surface`.
///
/// Uses the default theme and the [`HeuristicTextMeasurer`]. Draws nothing when
/// `result.pixel_length` is not positive.
pub fn render(
    surface: &mut impl DrawingSurface,
    bounds: Rect,
    result: &ScaleResult,
    style: ScaleStyle,
    position: ScalePosition,
    padding: Padding,
) {
    ScaleBarSpec::new(style)
        .with_position(position)
        .with_padding(padding)
        .render(surface, bounds, result, &HeuristicTextMeasurer);
}
