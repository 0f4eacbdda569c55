// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing commands emitted by the renderer.
//!
//! A scale indicator compiles into a short list of [`Mark`]s. Each mark carries a stable
//! [`MarkId`] and a `z_index`; renderers should paint in `(z_index, MarkId)` order.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

/// Stable identity of a generated mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Horizontal text anchor relative to the text position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The position is the start (left edge) of the text.
    #[default]
    Start,
    /// The position is the horizontal center of the text.
    Middle,
    /// The position is the end (right edge) of the text.
    End,
}

/// Vertical text baseline relative to the text position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The position is the vertical middle of the text.
    #[default]
    Middle,
    /// The position is the top of the text.
    Hanging,
    /// The position is the bottom of the text.
    Alphabetic,
}

/// A paint + width pair for stroked outlines.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// A filled (and optionally outlined) axis-aligned rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Rectangle geometry in view coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Optional outline.
    pub stroke: Option<StrokeStyle>,
}

/// A stroked path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Path geometry in view coordinates.
    pub path: BezPath,
    /// Stroke paint and width.
    pub stroke: StrokeStyle,
}

/// An unshaped text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in view coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Glyph fill.
    pub fill: Brush,
    /// Optional halo stroked behind the glyphs.
    pub halo: Option<StrokeStyle>,
}

/// The geometry and paint of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A rectangle.
    Rect(RectPayload),
    /// A stroked path.
    Path(PathPayload),
    /// A text run.
    Text(TextPayload),
}

/// A single drawing command.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Paint order; lower values are painted first.
    pub z_index: i32,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a filled rectangle mark.
    pub fn rect(
        id: MarkId,
        z_index: i32,
        rect: Rect,
        fill: impl Into<Brush>,
        stroke: Option<StrokeStyle>,
    ) -> Self {
        Self {
            id,
            z_index,
            payload: MarkPayload::Rect(RectPayload {
                rect,
                fill: fill.into(),
                stroke,
            }),
        }
    }

    /// Creates a stroked path mark.
    pub fn path(id: MarkId, z_index: i32, path: BezPath, stroke: StrokeStyle) -> Self {
        Self {
            id,
            z_index,
            payload: MarkPayload::Path(PathPayload { path, stroke }),
        }
    }

    /// Creates a text mark.
    pub fn text(id: MarkId, z_index: i32, text: TextPayload) -> Self {
        Self {
            id,
            z_index,
            payload: MarkPayload::Text(text),
        }
    }

    /// Sort key for deterministic paint order.
    pub fn paint_order(&self) -> (i32, MarkId) {
        (self.z_index, self.id)
    }
}
