// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Surface`] that writes SVG documents for `narviz_demo`.

use std::fmt::Write as _;

use hashbrown::HashMap;
use kurbo::{BezPath, Point, Rect, Shape as _};
use narviz_charts::{
    AxisSpec, MarkId, StrokeStyle, Surface, TextAnchor, TextBaseline, TextStyle,
};
use peniko::Brush;

#[derive(Debug)]
struct Element {
    id: MarkId,
    tag: &'static str,
    attrs: String,
    body: String,
    bounds: Option<Rect>,
}

/// Collects marks and renders them as one SVG document.
#[derive(Debug, Default)]
pub(crate) struct SvgSurface {
    description: String,
    elements: Vec<Element>,
    tooltips: HashMap<MarkId, String>,
    visible: Vec<(String, bool)>,
    next_id: u64,
}

impl SvgSurface {
    fn push(
        &mut self,
        tag: &'static str,
        attrs: String,
        body: String,
        bounds: Option<Rect>,
    ) -> MarkId {
        let id = MarkId(self.next_id);
        self.next_id += 1;
        self.elements.push(Element {
            id,
            tag,
            attrs,
            body,
            bounds,
        });
        id
    }

    /// Renders the current marks; the view box grows past `view` to fit stray labels.
    pub(crate) fn to_svg_string(&self, view: Rect) -> String {
        let view_box = match self.content_bounds() {
            Some(content) => view.union(content),
            None => view,
        };
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}" font-family="sans-serif">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );
        let _ = writeln!(out, "<desc>{}</desc>", escape_xml(&self.description));
        for (container, visible) in &self.visible {
            let _ = writeln!(
                out,
                r#"<g id="{}" display="{}"/>"#,
                escape_xml(container),
                if *visible { "inline" } else { "none" }
            );
        }
        for e in &self.elements {
            let tooltip = self.tooltips.get(&e.id);
            if tooltip.is_none() && e.body.is_empty() {
                let _ = writeln!(out, "<{}{}/>", e.tag, e.attrs);
                continue;
            }
            let _ = write!(out, "<{}{}>", e.tag, e.attrs);
            if let Some(t) = tooltip {
                let _ = write!(out, "<title>{}</title>", escape_xml(t));
            }
            let _ = writeln!(out, "{}</{}>", e.body, e.tag);
        }
        out.push_str("</svg>\n");
        out
    }

    fn content_bounds(&self) -> Option<Rect> {
        let r = self
            .elements
            .iter()
            .filter_map(|e| e.bounds)
            .reduce(|a, b| a.union(b))?;
        let pad = 10.0;
        Some(Rect::new(r.x0 - pad, r.y0 - pad, r.x1 + pad, r.y1 + pad))
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.elements.clear();
        self.tooltips.clear();
    }

    fn set_description(&mut self, text: &str) {
        self.description = text.to_string();
    }

    fn draw_axis(&mut self, axis: &AxisSpec) -> MarkId {
        let layout = axis.layout();
        let rule = &axis.style.rule;
        let mut body = String::new();
        let mut bounds = Rect::from_points(layout.domain.0, layout.domain.1);
        body.push_str(&line(layout.domain, rule));
        for tick in &layout.ticks {
            body.push_str(&line(tick.rule, rule));
            body.push_str(&text_element(tick.label_pos, &tick.label, &layout.label_style));
            bounds = bounds.union(text_bounds(tick.label_pos, &tick.label, &layout.label_style));
        }
        if let Some((pos, title, style)) = &layout.title {
            body.push_str(&text_element(*pos, title, style));
            bounds = bounds.union(text_bounds(*pos, title, style));
        }
        self.push("g", String::from(r#" class="axis""#), body, Some(bounds))
    }

    fn draw_path(&mut self, path: &BezPath, stroke: &StrokeStyle) -> MarkId {
        let mut attrs = format!(r#" d="{}" fill="none""#, path.to_svg());
        write_paint_attr(&mut attrs, "stroke", &stroke.brush);
        let _ = write!(attrs, r#" stroke-width="{}""#, stroke.stroke_width);
        let bounds = (!path.elements().is_empty()).then(|| path.bounding_box());
        self.push("path", attrs, String::new(), bounds)
    }

    fn draw_rect(&mut self, rect: Rect, fill: &Brush) -> MarkId {
        let rect = rect.abs();
        let mut attrs = format!(
            r#" x="{}" y="{}" width="{}" height="{}""#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height()
        );
        write_paint_attr(&mut attrs, "fill", fill);
        self.push("rect", attrs, String::new(), Some(rect))
    }

    fn draw_circle(&mut self, center: Point, radius: f64, fill: &Brush) -> MarkId {
        let mut attrs = format!(r#" cx="{}" cy="{}" r="{}""#, center.x, center.y, radius);
        write_paint_attr(&mut attrs, "fill", fill);
        let bounds = Rect::from_center_size(center, (2.0 * radius, 2.0 * radius));
        self.push("circle", attrs, String::new(), Some(bounds))
    }

    fn draw_text(&mut self, pos: Point, text: &str, style: &TextStyle) -> MarkId {
        let attrs = text_attrs(pos, style);
        let bounds = text_bounds(pos, text, style);
        self.push("text", attrs, escape_xml(text), Some(bounds))
    }

    fn attach_tooltip(&mut self, mark: MarkId, text: &str) {
        self.tooltips.insert(mark, text.to_string());
    }

    fn set_visible(&mut self, container: &str, visible: bool) {
        match self.visible.iter_mut().find(|(c, _)| c == container) {
            Some(entry) => entry.1 = visible,
            None => self.visible.push((container.to_string(), visible)),
        }
    }
}

fn line((a, b): (Point, Point), stroke: &StrokeStyle) -> String {
    let mut out = format!(r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#, a.x, a.y, b.x, b.y);
    write_paint_attr(&mut out, "stroke", &stroke.brush);
    let _ = write!(out, r#" stroke-width="{}"/>"#, stroke.stroke_width);
    out
}

fn text_attrs(pos: Point, style: &TextStyle) -> String {
    let baseline = match style.baseline {
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Hanging => "hanging",
    };
    let mut out = format!(
        r#" x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
        pos.x, pos.y, style.font_size, baseline
    );
    if style.angle != 0.0 {
        let _ = write!(
            out,
            r#" transform="rotate({} {} {})""#,
            style.angle, pos.x, pos.y
        );
    }
    out.push_str(match style.anchor {
        TextAnchor::Start => r#" text-anchor="start""#,
        TextAnchor::Middle => r#" text-anchor="middle""#,
        TextAnchor::End => r#" text-anchor="end""#,
    });
    write_paint_attr(&mut out, "fill", &style.fill);
    out
}

fn text_element(pos: Point, text: &str, style: &TextStyle) -> String {
    format!("<text{}>{}</text>", text_attrs(pos, style), escape_xml(text))
}

/// Rough unrotated bounds, assuming glyphs average 0.6em wide.
fn text_bounds(pos: Point, text: &str, style: &TextStyle) -> Rect {
    let size = style.font_size;
    let width = 0.6 * size * text.chars().count() as f64;
    let half_height = 0.5 * size;
    let mid_y = match style.baseline {
        TextBaseline::Middle => pos.y,
        TextBaseline::Alphabetic => pos.y - 0.3 * size,
        TextBaseline::Hanging => pos.y + 0.3 * size,
    };
    let (x0, x1) = match style.anchor {
        TextAnchor::Start => (pos.x, pos.x + width),
        TextAnchor::Middle => (pos.x - width / 2.0, pos.x + width / 2.0),
        TextAnchor::End => (pos.x - width, pos.x),
    };
    Rect::new(x0, mid_y - half_height, x1, mid_y + half_height)
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let _ = write!(out, r##" {name}="#{:02x}{:02x}{:02x}""##, rgba.r, rgba.g, rgba.b);
            if rgba.a != 255 {
                let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
            }
        }
        _ => {
            let _ = write!(out, r#" {name}="none""#);
        }
    }
}

fn escape_xml(s: &str) -> String {
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
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn tooltips_become_title_children() {
        let mut s = SvgSurface::default();
        let id = s.draw_rect(Rect::new(10.0, 50.0, 20.0, 20.0), &Brush::Solid(css::TEAL));
        s.attach_tooltip(id, "Sosa & McGwire");
        let svg = s.to_svg_string(Rect::new(0.0, 0.0, 700.0, 400.0));
        assert!(
            svg.contains(r##"<rect x="10" y="20" width="10" height="30" fill="#008080"><title>Sosa &amp; McGwire</title></rect>"##),
            "{svg}"
        );
    }

    #[test]
    fn clear_keeps_container_visibility() {
        let mut s = SvgSurface::default();
        s.set_visible("search", true);
        s.draw_text(Point::new(0.0, 0.0), "row", &TextStyle::default());
        s.clear();
        s.set_description("Search <leaders>");
        let svg = s.to_svg_string(Rect::new(0.0, 0.0, 700.0, 400.0));
        assert!(svg.contains(r#"<g id="search" display="inline"/>"#), "{svg}");
        assert!(svg.contains("<desc>Search &lt;leaders&gt;</desc>"), "{svg}");
        assert!(!svg.contains(">row<"), "{svg}");
    }
}
