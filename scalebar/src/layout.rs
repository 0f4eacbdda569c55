// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchoring the indicator inside the host view.
//!
//! The indicator is measured first (ruler plus label space), then placed at a corner or edge of
//! the view bounds after insetting them by [`Padding`].

use kurbo::Rect;

/// A width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The rectangle of this size with its origin at `(0, 0)`.
    pub fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width.max(0.0), self.height.max(0.0))
    }
}

/// Where the indicator sits relative to the host view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScalePosition {
    /// Top left corner.
    TopLeft,
    /// Centered on top.
    Top,
    /// Top right corner.
    TopRight,
    /// Bottom left corner.
    #[default]
    BottomLeft,
    /// Centered at the bottom.
    Bottom,
    /// Bottom right corner.
    BottomRight,
}

impl ScalePosition {
    /// All positions, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::BottomLeft,
        Self::Bottom,
        Self::BottomRight,
    ];

    /// Returns `true` for the three top positions.
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    /// Places a box of `size` inside `area`.
    ///
    /// Corner positions align flush to their corner; `Top`/`Bottom` center horizontally.
    pub fn anchor(self, area: Rect, size: Size) -> Rect {
        let x0 = match self {
            Self::TopLeft | Self::BottomLeft => area.x0,
            Self::Top | Self::Bottom => area.center().x - size.width * 0.5,
            Self::TopRight | Self::BottomRight => area.x1 - size.width,
        };
        let y0 = if self.is_top() {
            area.y0
        } else {
            area.y1 - size.height
        };
        Rect::new(x0, y0, x0 + size.width, y0 + size.height)
    }
}

/// Inset between the indicator and the edges of the host view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padding {
    /// Top inset.
    pub top: f64,
    /// Left inset.
    pub left: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Right inset.
    pub right: f64,
}

impl Default for Padding {
    /// `(30, 10, 10, 10)`: the larger top inset keeps clear of a status bar.
    fn default() -> Self {
        Self::new(30.0, 10.0, 10.0, 10.0)
    }
}

impl Padding {
    /// Creates a padding from top, left, bottom and right insets.
    ///
    /// Negative and non-finite insets are clamped to zero.
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top: clamp_inset(top),
            left: clamp_inset(left),
            bottom: clamp_inset(bottom),
            right: clamp_inset(right),
        }
    }

    /// The same inset on every side.
    pub fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// Sum of the left and right insets.
    pub fn horizontal(&self) -> f64 {
        clamp_inset(self.left) + clamp_inset(self.right)
    }

    /// Shrinks `bounds` by this padding. Collapses to a zero-size rect rather than inverting.
    ///
    /// Insets set directly on the fields are clamped the same way as in [`Padding::new`].
    pub fn inset(&self, bounds: Rect) -> Rect {
        let x0 = bounds.x0 + clamp_inset(self.left);
        let y0 = bounds.y0 + clamp_inset(self.top);
        let x1 = (bounds.x1 - clamp_inset(self.right)).max(x0);
        let y1 = (bounds.y1 - clamp_inset(self.bottom)).max(y0);
        Rect::new(x0, y0, x1, y1)
    }
}

fn clamp_inset(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
