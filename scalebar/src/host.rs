// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary with the map widget hosting the overlay.
//!
//! The host owns projection and view geometry. The overlay only asks for the ground scale at a
//! latitude and the current view size; it never drives the map.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::layout::Size;
use crate::overlay::OverlayHandle;

/// Equatorial circumference of the WGS 84 ellipsoid, in meters.
pub const EARTH_CIRCUMFERENCE: f64 = 40_075_016.686;

/// Tile edge length used by most slippy-map tile servers.
pub const DEFAULT_TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator projection, in degrees.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// A map view that can host a scale overlay.
///
/// All calls happen on the UI thread. The overlay holds the host weakly, so the host decides
/// when both go away.
pub trait MapHost {
    /// Ground distance covered by one pixel at `latitude` (degrees), in meters.
    fn meters_per_pixel(&self, latitude: f64) -> f64;

    /// Latitude of the view center, in degrees.
    fn center_latitude(&self) -> f64;

    /// Current view size in pixels.
    fn view_size(&self) -> Size;

    /// Installs `overlay` as the top-most visual child of the view.
    ///
    /// The overlay is not interactive: the host must not route input to it. The host should
    /// keep the handle for as long as it wants the indicator drawn, calling
    /// [`OverlayHandle::draw`] from its paint pass.
    fn attach_overlay(&self, overlay: OverlayHandle<Self>)
    where
        Self: Sized;

    /// The overlay previously given to [`attach_overlay`](Self::attach_overlay), if the host
    /// still holds it.
    fn overlay(&self) -> Option<OverlayHandle<Self>>
    where
        Self: Sized;

    /// Schedules a repaint of the overlay. Called after every successful update.
    fn request_redraw(&self) {}
}

/// Meters per pixel of a Web Mercator tile pyramid.
///
/// See <https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames#Resolution_and_Scale>.
/// `zoom` may be fractional. `latitude` is in degrees and is clamped to the projection limit.
pub fn web_mercator_meters_per_pixel(zoom: f64, latitude: f64, tile_size: f64) -> f64 {
    let latitude = latitude.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
    EARTH_CIRCUMFERENCE * latitude.to_radians().cos() / (tile_size * 2_f64.powf(zoom))
}

/// Zoom, center and size of a Web Mercator view.
///
/// A convenience for hosts that render a slippy-map tile pyramid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MercatorViewport {
    /// Zoom level (0 shows the whole world in one tile).
    pub zoom: f64,
    /// Latitude of the view center, in degrees.
    pub center_latitude: f64,
    /// View size in pixels.
    pub size: Size,
    /// Tile edge length in pixels.
    pub tile_size: f64,
}

impl MercatorViewport {
    /// Creates a viewport with [`DEFAULT_TILE_SIZE`] tiles.
    pub fn new(zoom: f64, center_latitude: f64, size: Size) -> Self {
        Self {
            zoom,
            center_latitude,
            size,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }

    /// Ground distance covered by one pixel at `latitude`, in meters.
    pub fn meters_per_pixel(&self, latitude: f64) -> f64 {
        web_mercator_meters_per_pixel(self.zoom, latitude, self.tile_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_zero_equator_covers_the_world_in_one_tile() {
        let mpp = web_mercator_meters_per_pixel(0.0, 0.0, 256.0);
        assert!((mpp * 256.0 - EARTH_CIRCUMFERENCE).abs() < 1e-6);
    }

    #[test]
    fn each_zoom_level_halves_the_scale() {
        let a = web_mercator_meters_per_pixel(10.0, 45.0, 256.0);
        let b = web_mercator_meters_per_pixel(11.0, 45.0, 256.0);
        assert!((a / b - 2.0).abs() < 1e-9);
    }

    #[test]
    fn scale_shrinks_with_latitude() {
        let equator = web_mercator_meters_per_pixel(12.0, 0.0, 256.0);
        let sixty = web_mercator_meters_per_pixel(12.0, 60.0, 256.0);
        assert!((sixty / equator - 0.5).abs() < 1e-9);
    }

    #[test]
    fn polar_latitude_stays_positive() {
        let mpp = web_mercator_meters_per_pixel(5.0, 90.0, 256.0);
        assert!(mpp > 0.0);
    }
}
