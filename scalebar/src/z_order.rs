// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint order for indicator marks.
//!
//! Each shape is paired with a contrasting outline so the indicator reads over any imagery.
//! Halos go first, fills next, outlines and ticks over the fills, labels last.

/// Wide contrasting strokes under thin tape lines.
pub const HALO: i32 = 0;
/// Filled bar segments.
pub const FILL: i32 = 10;
/// Outlines and tick strokes.
pub const OUTLINE: i32 = 20;
/// Distance labels.
pub const LABEL: i32 = 30;
