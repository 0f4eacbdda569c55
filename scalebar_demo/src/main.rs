// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale overlay demos over a simulated Web Mercator map.
mod html;
mod svg;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use env_logger::Env;
use log::{debug, info};
use peniko::color::palette::css;
use scalebar::{
    MapHost, MeasurementSystem, MercatorViewport, OverlayHandle, OverlayRegistry, Padding,
    ScaleBarConfig, ScaleBarTheme, ScalePosition, ScaleStyle, Size,
};

use crate::html::{HtmlFigure, HtmlSection};

const VIEW: Size = Size::new(360.0, 220.0);

/// A stand-in for a map widget: a Web Mercator viewport that paints fake imagery.
#[derive(Debug)]
struct DemoMap {
    viewport: Cell<MercatorViewport>,
    overlay: RefCell<Option<OverlayHandle<Self>>>,
    needs_paint: Cell<bool>,
}

impl DemoMap {
    fn new(zoom: f64, latitude: f64) -> Rc<Self> {
        Rc::new(Self {
            viewport: Cell::new(MercatorViewport::new(zoom, latitude, VIEW)),
            overlay: RefCell::new(None),
            needs_paint: Cell::new(true),
        })
    }

    /// Moves the map and notifies the overlay, as a region-changed callback would.
    fn set_region(&self, zoom: f64, latitude: f64) {
        let mut v = self.viewport.get();
        v.zoom = zoom;
        v.center_latitude = latitude;
        self.viewport.set(v);
        self.region_did_change();
    }

    fn region_did_change(&self) {
        let overlay = self.overlay.borrow().clone();
        if let Some(overlay) = overlay {
            overlay.update();
        }
    }

    /// Paints imagery plus the overlay. Returns the SVG document.
    fn paint(&self) -> String {
        if !self.needs_paint.replace(false) {
            debug!("painting without a pending redraw request");
        }
        let mut scene = svg::SvgScene::default();
        scene.set_view_box(VIEW.to_rect());
        scene.set_background(imagery(VIEW));
        if let Some(overlay) = self.overlay.borrow().as_ref() {
            overlay.draw(&mut scene);
        }
        scene.to_svg_string()
    }
}

impl MapHost for DemoMap {
    fn meters_per_pixel(&self, latitude: f64) -> f64 {
        self.viewport.get().meters_per_pixel(latitude)
    }

    fn center_latitude(&self) -> f64 {
        self.viewport.get().center_latitude
    }

    fn view_size(&self) -> Size {
        self.viewport.get().size
    }

    fn attach_overlay(&self, overlay: OverlayHandle<Self>) {
        *self.overlay.borrow_mut() = Some(overlay);
    }

    fn overlay(&self) -> Option<OverlayHandle<Self>> {
        self.overlay.borrow().clone()
    }

    fn request_redraw(&self) {
        self.needs_paint.set(true);
    }
}

/// Busy, two-tone imagery so outline contrast is visible.
fn imagery(size: Size) -> String {
    let (w, h) = (size.width, size.height);
    let mut out = String::new();
    out.push_str(&format!(
        r##"<rect x="0" y="0" width="{w}" height="{h}" fill="#cfe3b4"/>"##
    ));
    out.push_str(&format!(
        r##"<path d="M0 {} C {} {} {} {} {w} {} L {w} {h} L 0 {h} Z" fill="#1d3557"/>"##,
        h * 0.55,
        w * 0.3,
        h * 0.35,
        w * 0.6,
        h * 0.9,
        h * 0.7,
    ));
    for i in 0..6 {
        let x = w * f64::from(i) / 6.0;
        out.push_str(&format!(
            r##"<line x1="{x}" y1="0" x2="{}" y2="{h}" stroke="#f1f1f1" stroke-width="3"/>"##,
            x + w * 0.2
        ));
    }
    out.push('\n');
    out
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let locale = std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_default();
    let system = MeasurementSystem::from_locale(&locale);
    info!("locale {locale:?} resolves to {system:?}");

    let mut registry = OverlayRegistry::new(ScaleBarConfig::new(system));

    zoom_sweep(&mut registry);
    let sections = vec![
        styles_demo(&mut registry),
        positions_demo(&mut registry),
        latitude_demo(&mut registry),
        systems_demo(&mut registry),
    ];

    let pruned = registry.prune();
    info!("registry pruned {pruned} overlay(s) of closed maps");

    let html = html::render_report("Map scale overlay demo", &sections);
    std::fs::write("scalebar_demo.html", html).expect("write scalebar_demo.html");
    info!("wrote scalebar_demo.html");
}

/// Logs the scale chosen across the zoom range at a mid latitude.
fn zoom_sweep(registry: &mut OverlayRegistry<DemoMap>) {
    let map = DemoMap::new(0.0, 45.0);
    let overlay = registry.get_or_create(&map);
    // A second request is a no-op returning the same overlay.
    assert!(
        registry.get_or_create(&map).ptr_eq(&overlay),
        "one overlay per map"
    );

    for zoom in 0..=20 {
        map.set_region(f64::from(zoom), 45.0);
        if let Some(r) = overlay.result() {
            info!(
                "zoom {zoom:>2}: {:>8} over {:>6.1}px",
                r.label(),
                r.pixel_length
            );
        }
    }
}

fn styles_demo(registry: &mut OverlayRegistry<DemoMap>) -> HtmlSection {
    let mut figures = Vec::new();
    for style in ScaleStyle::ALL {
        for zoom in [6.0, 11.5, 16.0] {
            let map = DemoMap::new(zoom, 37.8);
            let overlay = registry.get_or_create(&map);
            overlay.set_style(style);
            map.region_did_change();
            figures.push(HtmlFigure {
                caption: format!("{style:?} at zoom {zoom}"),
                svg: map.paint(),
            });
        }
    }

    let map = DemoMap::new(11.5, 37.8);
    let overlay = registry.get_or_create(&map);
    overlay.set_theme(ScaleBarTheme::default().with_colors(css::WHITE, css::BLACK));
    map.region_did_change();
    figures.push(HtmlFigure {
        caption: "Bar, inverted colors".into(),
        svg: map.paint(),
    });

    HtmlSection {
        title: "Styles".into(),
        notes: "Each style across three zoom levels at 37.8° N.".into(),
        figures,
    }
}

fn positions_demo(registry: &mut OverlayRegistry<DemoMap>) -> HtmlSection {
    let map = DemoMap::new(13.0, 51.5);
    let overlay = registry.get_or_create(&map);
    overlay.set_style(ScaleStyle::AlternatingBar);
    overlay.set_theme(
        ScaleBarTheme::default()
            .with_segments(6)
            .with_bar_height(8.0)
            .with_font_size(13.0),
    );
    map.region_did_change();

    let mut figures = Vec::new();
    for position in ScalePosition::ALL {
        overlay.set_position(position);
        figures.push(HtmlFigure {
            caption: format!("{position:?}"),
            svg: map.paint(),
        });
    }

    overlay.set_padding(Padding::uniform(40.0));
    overlay.set_position(ScalePosition::Bottom);
    figures.push(HtmlFigure {
        caption: "Bottom, 40px padding".into(),
        svg: map.paint(),
    });

    HtmlSection {
        title: "Positions".into(),
        notes: "One map, the overlay moved through every anchor.".into(),
        figures,
    }
}

fn latitude_demo(registry: &mut OverlayRegistry<DemoMap>) -> HtmlSection {
    let map = DemoMap::new(10.0, 0.0);
    let overlay = registry.get_or_create(&map);
    overlay.set_style(ScaleStyle::TapeMeasure);

    let mut figures = Vec::new();
    for latitude in [0.0, 30.0, 60.0, 75.0] {
        map.set_region(10.0, latitude);
        figures.push(HtmlFigure {
            caption: format!("zoom 10, latitude {latitude}°"),
            svg: map.paint(),
        });
    }
    HtmlSection {
        title: "Latitude".into(),
        notes: "Same zoom level; the Mercator scale shrinks towards the poles.".into(),
        figures,
    }
}

fn systems_demo(registry: &mut OverlayRegistry<DemoMap>) -> HtmlSection {
    let map = DemoMap::new(14.0, 40.7);
    let overlay = registry.get_or_create(&map);
    map.region_did_change();

    let mut figures = Vec::new();
    for metric in [true, false] {
        overlay.set_metric(metric);
        figures.push(HtmlFigure {
            caption: if metric { "metric" } else { "imperial" }.into(),
            svg: map.paint(),
        });
    }
    overlay.set_max_width(120.0);
    figures.push(HtmlFigure {
        caption: "imperial, 120px budget".into(),
        svg: map.paint(),
    });

    HtmlSection {
        title: "Measurement systems".into(),
        notes: "The locale default can be overridden per overlay.".into(),
        figures,
    }
}
