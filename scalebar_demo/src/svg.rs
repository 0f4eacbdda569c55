// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump utilities for `scalebar_demo`.

use kurbo::Rect;
use peniko::Brush;
use scalebar::{DrawingSurface, Mark, MarkPayload, StrokeStyle, TextAnchor, TextBaseline};

#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    marks: Vec<Mark>,
    view_box: Option<Rect>,
    background: Option<String>,
}

impl DrawingSurface for SvgScene {
    fn draw(&mut self, mark: Mark) {
        self.marks.push(mark);
    }
}

impl SvgScene {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    /// Raw SVG elements painted before the marks (the fake map imagery).
    pub(crate) fn set_background(&mut self, svg: String) {
        self.background = Some(svg);
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self
            .view_box
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');
        if let Some(bg) = &self.background {
            out.push_str(bg);
        }

        let mut marks: Vec<&Mark> = self.marks.iter().collect();
        marks.sort_by_key(|m| m.paint_order());

        for mark in marks {
            match &mark.payload {
                MarkPayload::Rect(r) => {
                    out.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        r.rect.x0,
                        r.rect.y0,
                        r.rect.width(),
                        r.rect.height(),
                    ));
                    write_paint_attr(&mut out, "fill", &r.fill);
                    if let Some(stroke) = &r.stroke {
                        write_stroke(&mut out, stroke);
                    }
                    out.push_str("/>\n");
                }
                MarkPayload::Path(p) => {
                    let d = p.path.to_svg();
                    out.push_str(&format!(r#"<path d="{d}" fill="none""#));
                    write_stroke(&mut out, &p.stroke);
                    out.push_str(r#" stroke-linecap="square"/>"#);
                    out.push('\n');
                }
                MarkPayload::Text(t) => {
                    let baseline = match t.baseline {
                        TextBaseline::Middle => "middle",
                        TextBaseline::Alphabetic => "alphabetic",
                        TextBaseline::Hanging => "hanging",
                    };
                    out.push_str(&format!(
                        r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif" dominant-baseline="{}""#,
                        t.pos.x, t.pos.y, t.font_size, baseline
                    ));
                    out.push_str(match t.anchor {
                        TextAnchor::Start => r#" text-anchor="start""#,
                        TextAnchor::Middle => r#" text-anchor="middle""#,
                        TextAnchor::End => r#" text-anchor="end""#,
                    });
                    write_paint_attr(&mut out, "fill", &t.fill);
                    if let Some(halo) = &t.halo {
                        write_stroke(&mut out, halo);
                        out.push_str(r#" paint-order="stroke""#);
                    }
                    out.push('>');
                    out.push_str(&escape_xml(&t.text));
                    out.push_str("</text>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn write_stroke(out: &mut String, stroke: &StrokeStyle) {
    if stroke.stroke_width > 0.0 {
        write_paint_attr(out, "stroke", &stroke.brush);
        out.push_str(&format!(r#" stroke-width="{}""#, stroke.stroke_width));
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalebar::{MeasurementSystem, Padding, ScalePosition, ScaleStyle, compute_scale, render};

    #[test]
    fn scene_writes_label_and_ruler() {
        let mut scene = SvgScene::default();
        let bounds = Rect::new(0.0, 0.0, 400.0, 300.0);
        scene.set_view_box(bounds);
        let result = compute_scale(1.0, 300.0, MeasurementSystem::Metric);
        render(
            &mut scene,
            bounds,
            &result,
            ScaleStyle::Bar,
            ScalePosition::BottomLeft,
            Padding::default(),
        );
        let svg = scene.to_svg_string();
        assert!(svg.contains(">200 m</text>"));
        assert!(svg.contains(r#"width="200""#));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn xml_is_escaped() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }
}
