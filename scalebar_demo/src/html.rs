// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-file HTML report for the demo SVGs.

use crate::svg::escape_xml;

#[derive(Debug)]
pub(crate) struct HtmlFigure {
    pub(crate) caption: String,
    pub(crate) svg: String,
}

#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) notes: String,
    pub(crate) figures: Vec<HtmlFigure>,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\">");
    out.push_str(&format!("<title>{}</title>", escape_xml(title)));
    out.push_str(
        "<style>body{font-family:sans-serif;margin:24px;background:#fafafa}\
         figure{display:inline-block;margin:8px;vertical-align:top}\
         figcaption{font-size:12px;color:#444}</style>",
    );
    out.push_str("</head><body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_xml(title)));
    for section in sections {
        out.push_str(&format!("<h2>{}</h2>\n", escape_xml(&section.title)));
        if !section.notes.is_empty() {
            out.push_str(&format!("<p>{}</p>\n", escape_xml(&section.notes)));
        }
        for figure in &section.figures {
            out.push_str("<figure>");
            out.push_str(&figure.svg);
            out.push_str(&format!(
                "<figcaption>{}</figcaption></figure>\n",
                escape_xml(&figure.caption)
            ));
        }
    }
    out.push_str("</body></html>\n");
    out
}
