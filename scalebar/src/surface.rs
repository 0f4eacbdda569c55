// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface the renderer paints into.

extern crate alloc;

use alloc::vec::Vec;

use crate::mark::Mark;

/// A sink for drawing commands.
///
/// Backends (a GPU scene, an SVG writer, a canvas context) implement this to receive the marks
/// of one indicator. Marks arrive in generation order; use [`Mark::paint_order`] to sort.
pub trait DrawingSurface {
    /// Receives one mark.
    fn draw(&mut self, mark: Mark);
}

impl DrawingSurface for Vec<Mark> {
    fn draw(&mut self, mark: Mark) {
        self.push(mark);
    }
}
