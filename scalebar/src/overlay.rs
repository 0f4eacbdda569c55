// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scale overlay attached to one map host.
//!
//! An overlay keeps its configuration and the last computed [`ScaleResult`]. The caller must
//! invoke [`OverlayHandle::update`] whenever the visible region changes; without that the
//! indicator keeps showing the previous scale.

extern crate alloc;

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use kurbo::Rect;
use log::debug;

use crate::calculator::{ScaleResult, compute_scale};
use crate::host::MapHost;
use crate::layout::{Padding, ScalePosition, Size};
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::render::ScaleBarSpec;
use crate::style::{ScaleBarTheme, ScaleStyle};
use crate::surface::DrawingSurface;
use crate::units::MeasurementSystem;

/// Default pixel budget for the indicator.
pub const DEFAULT_MAX_WIDTH: f64 = 300.0;

/// Overlay configuration.
///
/// | Option     | Default                               |
/// |------------|---------------------------------------|
/// | `style`    | [`ScaleStyle::Bar`]                   |
/// | `system`   | injected locale default (metric here) |
/// | `position` | [`ScalePosition::BottomLeft`]         |
/// | `padding`  | `(30, 10, 10, 10)` t/l/b/r            |
/// | `max_width`| [`DEFAULT_MAX_WIDTH`]                 |
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBarConfig {
    /// Drawing routine.
    pub style: ScaleStyle,
    /// Unit system for the label.
    pub system: MeasurementSystem,
    /// Anchor corner or edge.
    pub position: ScalePosition,
    /// Inset from the host edges.
    pub padding: Padding,
    /// Pixel budget ceiling.
    pub max_width: f64,
    /// Paint and metrics.
    pub theme: ScaleBarTheme,
}

impl Default for ScaleBarConfig {
    fn default() -> Self {
        Self::new(MeasurementSystem::default())
    }
}

impl ScaleBarConfig {
    /// Creates the default configuration with a resolved locale system.
    pub fn new(system: MeasurementSystem) -> Self {
        Self {
            style: ScaleStyle::default(),
            system,
            position: ScalePosition::default(),
            padding: Padding::default(),
            max_width: DEFAULT_MAX_WIDTH,
            theme: ScaleBarTheme::default(),
        }
    }

    /// Sets the style.
    pub fn with_style(mut self, style: ScaleStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the unit system.
    pub fn with_system(mut self, system: MeasurementSystem) -> Self {
        self.system = system;
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

    /// Sets the pixel budget ceiling. Negative and non-finite values become zero.
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = clamp_width(max_width);
        self
    }

    /// Sets the theme.
    pub fn with_theme(mut self, theme: ScaleBarTheme) -> Self {
        self.theme = theme;
        self
    }

    /// The pixel budget for a host view `view_width` pixels wide.
    pub fn max_pixel_width(&self, view_width: f64) -> f64 {
        self.max_width
            .min(view_width - self.padding.horizontal())
            .max(0.0)
    }

    /// The render spec for this configuration.
    pub fn spec(&self) -> ScaleBarSpec {
        ScaleBarSpec::new(self.style)
            .with_position(self.position)
            .with_padding(self.padding)
            .with_theme(self.theme.clone())
    }
}

fn clamp_width(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

struct ScaleOverlay<H> {
    host: Weak<H>,
    config: ScaleBarConfig,
    view: Size,
    result: Option<ScaleResult>,
}

/// A shared handle to the overlay of one host.
///
/// Cloning the handle does not create a new overlay. The overlay lives as long as the host or
/// the registry keeps a handle; it never keeps the host alive.
pub struct OverlayHandle<H> {
    inner: Rc<RefCell<ScaleOverlay<H>>>,
}

impl<H> Clone for OverlayHandle<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H> fmt::Debug for OverlayHandle<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(overlay) = self.inner.try_borrow() else {
            return f.debug_struct("OverlayHandle").finish_non_exhaustive();
        };
        f.debug_struct("OverlayHandle")
            .field("config", &overlay.config)
            .field("view", &overlay.view)
            .field("result", &overlay.result)
            .field("host_alive", &(overlay.host.strong_count() > 0))
            .finish()
    }
}

impl<H> OverlayHandle<H> {
    pub(crate) fn new(host: Weak<H>, config: ScaleBarConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ScaleOverlay {
                host,
                config,
                view: Size::default(),
                result: None,
            })),
        }
    }

    /// Returns `true` if both handles refer to the same overlay.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The host, if it is still alive.
    pub fn host(&self) -> Option<Rc<H>> {
        self.inner.borrow().host.upgrade()
    }

    /// The last computed scale, or `None` before the first update.
    pub fn result(&self) -> Option<ScaleResult> {
        self.inner.borrow().result
    }

    /// A snapshot of the configuration.
    pub fn config(&self) -> ScaleBarConfig {
        self.inner.borrow().config.clone()
    }

    /// Draws the indicator into `surface`, estimating label extents heuristically.
    pub fn draw(&self, surface: &mut impl DrawingSurface) {
        self.draw_with(surface, &HeuristicTextMeasurer);
    }

    /// Draws the indicator into `surface`, using `measurer` for label extents.
    ///
    /// Draws nothing before the first update.
    pub fn draw_with(&self, surface: &mut impl DrawingSurface, measurer: &impl TextMeasurer) {
        let overlay = self.inner.borrow();
        let Some(result) = overlay.result else {
            return;
        };
        overlay
            .config
            .spec()
            .render(surface, overlay.view.to_rect(), &result, measurer);
    }

    /// Arranged indicator bounds for the last update, if there is anything to draw.
    pub fn frame(&self, measurer: &impl TextMeasurer) -> Option<Rect> {
        let overlay = self.inner.borrow();
        let result = overlay.result?;
        overlay
            .config
            .spec()
            .layout(overlay.view.to_rect(), &result, measurer)
            .map(|layout| layout.frame)
    }
}

impl<H: MapHost> OverlayHandle<H> {
    /// Recomputes the scale from the host's current projection and view size.
    ///
    /// Queries the meters-per-pixel at the host's center latitude, computes the scale with a
    /// budget of `min(max_width, view_width - horizontal padding)`, stores it, and asks the
    /// host to redraw. Does nothing if the host has been dropped.
    pub fn update(&self) {
        let Some(host) = self.host() else {
            debug!("scale overlay update skipped: host dropped");
            return;
        };
        let latitude = host.center_latitude();
        let meters_per_pixel = host.meters_per_pixel(latitude);
        let view = host.view_size();
        {
            let mut overlay = self.inner.borrow_mut();
            let max_pixel_width = overlay.config.max_pixel_width(view.width);
            overlay.view = view;
            overlay.result = Some(compute_scale(
                meters_per_pixel,
                max_pixel_width,
                overlay.config.system,
            ));
        }
        host.request_redraw();
    }

    /// Sets the drawing style. Takes effect on the next redraw.
    pub fn set_style(&self, style: ScaleStyle) {
        self.inner.borrow_mut().config.style = style;
        self.redraw();
    }

    /// Forces the metric (`true`) or imperial (`false`) system and recomputes.
    pub fn set_metric(&self, metric: bool) {
        self.set_system(MeasurementSystem::from_metric_flag(metric));
    }

    /// Sets the unit system and recomputes.
    pub fn set_system(&self, system: MeasurementSystem) {
        self.inner.borrow_mut().config.system = system;
        self.refresh();
    }

    /// Sets the anchor position. Takes effect on the next redraw.
    pub fn set_position(&self, position: ScalePosition) {
        self.inner.borrow_mut().config.position = position;
        self.redraw();
    }

    /// Sets the padding and recomputes, since the padding narrows the pixel budget.
    pub fn set_padding(&self, padding: Padding) {
        self.inner.borrow_mut().config.padding = padding;
        self.refresh();
    }

    /// Sets the pixel budget ceiling and recomputes.
    pub fn set_max_width(&self, max_width: f64) {
        self.inner.borrow_mut().config.max_width = clamp_width(max_width);
        self.refresh();
    }

    /// Sets the theme. Takes effect on the next redraw.
    pub fn set_theme(&self, theme: ScaleBarTheme) {
        self.inner.borrow_mut().config.theme = theme;
        self.redraw();
    }

    /// Recomputes only if a scale was already shown; configuration alone never triggers the
    /// first host query.
    fn refresh(&self) {
        if self.result().is_some() {
            self.update();
        }
    }

    fn redraw(&self) {
        if let Some(host) = self.host() {
            host.request_redraw();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    extern crate std;

    use alloc::vec::Vec;
    use core::cell::Cell;

    use super::*;
    use crate::host::MercatorViewport;
    use crate::mark::Mark;
    use crate::units::DistanceUnit;

    /// A map host backed by a Web Mercator viewport, recording overlay traffic.
    #[derive(Debug)]
    pub(crate) struct TestMap {
        pub(crate) viewport: Cell<MercatorViewport>,
        pub(crate) attached: RefCell<Vec<OverlayHandle<Self>>>,
        pub(crate) redraws: Cell<usize>,
        pub(crate) queried_latitude: Cell<Option<f64>>,
    }

    impl TestMap {
        pub(crate) fn new(viewport: MercatorViewport) -> Rc<Self> {
            Rc::new(Self {
                viewport: Cell::new(viewport),
                attached: RefCell::new(Vec::new()),
                redraws: Cell::new(0),
                queried_latitude: Cell::new(None),
            })
        }

        pub(crate) fn set_zoom(&self, zoom: f64) {
            let mut v = self.viewport.get();
            v.zoom = zoom;
            self.viewport.set(v);
        }
    }

    impl MapHost for TestMap {
        fn meters_per_pixel(&self, latitude: f64) -> f64 {
            self.queried_latitude.set(Some(latitude));
            self.viewport.get().meters_per_pixel(latitude)
        }

        fn center_latitude(&self) -> f64 {
            self.viewport.get().center_latitude
        }

        fn view_size(&self) -> Size {
            self.viewport.get().size
        }

        fn attach_overlay(&self, overlay: OverlayHandle<Self>) {
            self.attached.borrow_mut().push(overlay);
        }

        fn overlay(&self) -> Option<OverlayHandle<Self>> {
            self.attached.borrow().last().cloned()
        }

        fn request_redraw(&self) {
            self.redraws.set(self.redraws.get() + 1);
        }
    }

    fn overlay_for(map: &Rc<TestMap>, config: ScaleBarConfig) -> OverlayHandle<TestMap> {
        OverlayHandle::new(Rc::downgrade(map), config)
    }

    #[test]
    fn nothing_drawn_before_first_update() {
        let map = TestMap::new(MercatorViewport::new(12.0, 0.0, Size::new(800.0, 600.0)));
        let overlay = overlay_for(&map, ScaleBarConfig::default());
        let mut marks: Vec<Mark> = Vec::new();
        overlay.draw(&mut marks);
        assert!(marks.is_empty());
        assert!(overlay.result().is_none());
    }

    #[test]
    fn update_queries_center_latitude_and_requests_redraw() {
        let map = TestMap::new(MercatorViewport::new(12.0, 48.5, Size::new(800.0, 600.0)));
        let overlay = overlay_for(&map, ScaleBarConfig::default());
        overlay.update();

        assert_eq!(map.queried_latitude.get(), Some(48.5));
        assert_eq!(map.redraws.get(), 1);
        let result = overlay.result().unwrap();
        assert!(result.pixel_length > 0.0);
        assert!(result.pixel_length <= DEFAULT_MAX_WIDTH);

        let mut marks: Vec<Mark> = Vec::new();
        overlay.draw(&mut marks);
        assert!(!marks.is_empty());
    }

    #[test]
    fn narrow_view_limits_the_budget() {
        // 120 px wide view minus 20 px horizontal padding leaves 100 px.
        let map = TestMap::new(MercatorViewport::new(15.0, 0.0, Size::new(120.0, 400.0)));
        let overlay = overlay_for(&map, ScaleBarConfig::default());
        overlay.update();
        let result = overlay.result().unwrap();
        assert!(result.pixel_length <= 100.0 + 1e-9);
    }

    #[test]
    fn max_width_caps_the_budget() {
        let map = TestMap::new(MercatorViewport::new(15.0, 0.0, Size::new(1200.0, 400.0)));
        let overlay = overlay_for(&map, ScaleBarConfig::default().with_max_width(80.0));
        overlay.update();
        assert!(overlay.result().unwrap().pixel_length <= 80.0 + 1e-9);
    }

    #[test]
    fn switching_system_recomputes() {
        let map = TestMap::new(MercatorViewport::new(10.0, 0.0, Size::new(800.0, 600.0)));
        let overlay = overlay_for(&map, ScaleBarConfig::default());
        overlay.update();
        assert_eq!(overlay.result().unwrap().unit, DistanceUnit::Kilometers);

        overlay.set_metric(false);
        assert_eq!(overlay.result().unwrap().unit, DistanceUnit::Miles);
        assert_eq!(overlay.config().system, MeasurementSystem::Imperial);
    }

    #[test]
    fn zooming_in_changes_the_stored_result() {
        let map = TestMap::new(MercatorViewport::new(8.0, 0.0, Size::new(800.0, 600.0)));
        let overlay = overlay_for(&map, ScaleBarConfig::default());
        overlay.update();
        let far = overlay.result().unwrap();

        map.set_zoom(17.0);
        // Stale until the caller updates.
        assert_eq!(overlay.result(), Some(far));
        overlay.update();
        let near = overlay.result().unwrap();
        assert_eq!(far.unit, DistanceUnit::Kilometers);
        assert_eq!(near.unit, DistanceUnit::Meters);
    }

    #[test]
    fn draw_only_settings_request_redraw_without_recompute() {
        let map = TestMap::new(MercatorViewport::new(12.0, 0.0, Size::new(800.0, 600.0)));
        let overlay = overlay_for(&map, ScaleBarConfig::default());
        overlay.set_style(ScaleStyle::TapeMeasure);
        overlay.set_position(ScalePosition::TopRight);
        assert_eq!(map.redraws.get(), 2);
        assert!(overlay.result().is_none());
        assert_eq!(overlay.config().style, ScaleStyle::TapeMeasure);
    }

    #[test]
    fn frame_follows_position() {
        let map = TestMap::new(MercatorViewport::new(12.0, 0.0, Size::new(800.0, 600.0)));
        let overlay = overlay_for(&map, ScaleBarConfig::default());
        overlay.update();
        let frame = overlay.frame(&HeuristicTextMeasurer).unwrap();
        assert_eq!(frame.x0, 10.0);
        assert_eq!(frame.y1, 590.0);

        overlay.set_position(ScalePosition::TopRight);
        let frame = overlay.frame(&HeuristicTextMeasurer).unwrap();
        assert!((frame.x1 - 790.0).abs() < 1e-9);
        assert_eq!(frame.y0, 30.0);
    }

    #[test]
    fn update_after_host_dropped_keeps_last_result() {
        let map = TestMap::new(MercatorViewport::new(12.0, 0.0, Size::new(800.0, 600.0)));
        let overlay = overlay_for(&map, ScaleBarConfig::default());
        overlay.update();
        let before = overlay.result();
        drop(map);

        overlay.update();
        assert!(overlay.host().is_none());
        assert_eq!(overlay.result(), before);
    }
}
