// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A map scale indicator engine.
//!
//! The crate turns the current projection scale of a map view into a ruler-like overlay:
//! - **Calculator**: from meters-per-pixel and a pixel budget to a round 1-2-5 distance in
//!   metric or imperial units, and the exact pixel length representing it.
//! - **Renderer**: the indicator as a handful of [`Mark`]s (bar, alternating bar or tape
//!   measure), anchored at a corner or edge of the view.
//! - **Overlay**: one overlay per map host, kept in an [`OverlayRegistry`] that only holds
//!   hosts weakly.
//!
//! The host map widget stays external: it implements [`MapHost`], calls
//! [`OverlayHandle::update`] whenever its visible region changes, and paints the marks it gets
//! from [`OverlayHandle::draw`]. Text shaping is out of scope; text marks store unshaped
//! strings.
//!
//! ```
//! use scalebar::{MeasurementSystem, compute_scale};
//!
//! let scale = compute_scale(50.0, 300.0, MeasurementSystem::Metric);
//! assert_eq!(scale.label(), "10 km");
//! assert_eq!(scale.pixel_length, 200.0);
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod calculator;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod host;
mod layout;
mod mark;
mod measure;
mod overlay;
mod registry;
mod render;
mod style;
mod surface;
mod units;
pub mod z_order;

pub use calculator::{
    MIN_PIXEL_LENGTH, MIN_STEP, ScaleResult, compute_scale, is_nice_step, nice_step_floor,
};
pub use format::format_distance;
pub use host::{
    DEFAULT_TILE_SIZE, EARTH_CIRCUMFERENCE, MAX_MERCATOR_LATITUDE, MapHost, MercatorViewport,
    web_mercator_meters_per_pixel,
};
pub use layout::{Padding, ScalePosition, Size};
pub use mark::{
    Mark, MarkId, MarkPayload, PathPayload, RectPayload, StrokeStyle, TextAnchor, TextBaseline,
    TextPayload,
};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use overlay::{DEFAULT_MAX_WIDTH, OverlayHandle, ScaleBarConfig};
pub use registry::OverlayRegistry;
pub use render::{ScaleBarLayout, ScaleBarSpec, render};
pub use style::{ScaleBarTheme, ScaleStyle};
pub use surface::DrawingSurface;
pub use units::{
    DistanceUnit, FEET_PER_MILE, METERS_PER_FOOT, METERS_PER_KILOMETER, METERS_PER_MILE,
    MeasurementSystem,
};
