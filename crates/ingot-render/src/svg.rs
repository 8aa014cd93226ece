//! SVG surface: renders a frame to a standalone SVG document.
//!
//! Every element carries the transform active when it was drawn, so the
//! output matches the on-screen frame pixel for pixel (minus font metrics).

use crate::surface::{RadialGradient, Surface, TransformStack};
use ingot_core::Color;
use kurbo::{Affine, Point, Rect};
use std::fmt::Write as _;

fn svg_color(c: Color) -> String {
    let [r, g, b, a] = c.to_rgba8();
    if a == 255 {
        format!("#{r:02X}{g:02X}{b:02X}")
    } else {
        format!("rgba({r}, {g}, {b}, {:.3})", f32::from(a) / 255.0)
    }
}

fn svg_matrix(t: Affine) -> String {
    let [a, b, c, d, e, f] = t.as_coeffs();
    format!("matrix({a} {b} {c} {d} {e} {f})")
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    transforms: TransformStack,
    defs: String,
    body: String,
    gradients: usize,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            transforms: TransformStack::new(),
            defs: String::new(),
            body: String::new(),
            gradients: 0,
        }
    }

    /// Close the document and return the SVG text.
    pub fn finish(self) -> String {
        let (w, h) = (self.width, self.height);
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
        );
        if !self.defs.is_empty() {
            svg.push_str("<defs>\n");
            svg.push_str(&self.defs);
            svg.push_str("</defs>\n");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }

    fn element(&mut self, tag: &str, attrs: &str) {
        let transform = svg_matrix(self.transforms.current());
        let _ = writeln!(self.body, "<{tag} {attrs} transform=\"{transform}\"/>");
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transforms.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transforms.scale(sx, sy);
    }

    fn reset_transform(&mut self) {
        self.transforms.reset();
    }

    fn fill_rect(&mut self, r: Rect, color: Color) {
        let attrs = format!(
            "x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"",
            r.x0,
            r.y0,
            r.width(),
            r.height(),
            svg_color(color)
        );
        self.element("rect", &attrs);
    }

    fn stroke_rect(&mut self, r: Rect, color: Color, width: f64) {
        let attrs = format!(
            "x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{width}\"",
            r.x0,
            r.y0,
            r.width(),
            r.height(),
            svg_color(color)
        );
        self.element("rect", &attrs);
    }

    fn fill_ellipse(&mut self, b: Rect, color: Color) {
        let c = b.center();
        let attrs = format!(
            "cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"{}\"",
            c.x,
            c.y,
            b.width() / 2.0,
            b.height() / 2.0,
            svg_color(color)
        );
        self.element("ellipse", &attrs);
    }

    fn stroke_ellipse(&mut self, b: Rect, color: Color, width: f64) {
        let c = b.center();
        let attrs = format!(
            "cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{width}\"",
            c.x,
            c.y,
            b.width() / 2.0,
            b.height() / 2.0,
            svg_color(color)
        );
        self.element("ellipse", &attrs);
    }

    fn fill_text(&mut self, origin: Point, text: &str, font_size: f64, color: Color) {
        let transform = svg_matrix(self.transforms.current());
        let _ = writeln!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-size=\"{font_size}\" fill=\"{}\" transform=\"{transform}\">{}</text>",
            origin.x,
            origin.y,
            svg_color(color),
            escape_text(text)
        );
    }

    fn line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        let attrs = format!(
            "x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{width}\"",
            from.x,
            from.y,
            to.x,
            to.y,
            svg_color(color)
        );
        self.element("line", &attrs);
    }

    fn point(&mut self, at: Point, color: Color) {
        // One device pixel regardless of the current scale.
        let p = self.transforms.current() * at;
        let _ = writeln!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"1\" height=\"1\" fill=\"{}\"/>",
            p.x - 0.5,
            p.y - 0.5,
            svg_color(color)
        );
    }

    fn fill_radial_gradient(&mut self, r: Rect, g: RadialGradient) {
        let id = format!("bg{}", self.gradients);
        self.gradients += 1;
        let _ = writeln!(
            self.defs,
            "<radialGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" cx=\"{}\" cy=\"{}\" r=\"{}\">\
             <stop offset=\"0\" stop-color=\"{}\"/><stop offset=\"1\" stop-color=\"{}\"/></radialGradient>",
            g.center.x,
            g.center.y,
            g.radius,
            svg_color(g.inner),
            svg_color(g.outer)
        );
        let attrs = format!(
            "x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"url(#{id})\"",
            r.x0,
            r.y0,
            r.width(),
            r.height()
        );
        self.element("rect", &attrs);
    }
}
