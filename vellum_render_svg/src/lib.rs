// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vellum_render_svg --heading-base-level=0

//! SVG markup renderer for Vellum scenes.
//!
//! [`SvgRenderer`] is a [`Renderer`] that emits one SVG document per render:
//!
//! - an XML declaration and an `<svg>` root sized from [`SvgOptions`], or from
//!   the [`Canvas`] when the root is a canvas;
//! - the canvas title, description and background rectangle;
//! - one `<g>` per group (`id` from the group name) and per layer
//!   (`id="layer_<name>"`, with `mix-blend-mode` when the layer does not blend
//!   normally);
//! - one `<circle>`, `<rect>`, `<ellipse>` or `<line>` per visible primitive.
//!
//! Leaves keep their local geometry and carry the full
//! `current ∘ local` transform as a `matrix(...)` attribute, plus the
//! effective opacity of their ancestors. Grouping elements carry neither, so
//! no transform or opacity is applied twice. Hidden layers emit nothing.
//!
//! ```rust
//! use vellum_render::Renderer;
//! use vellum_render_svg::SvgRenderer;
//! use vellum_scene::{Canvas, Circle, Color, Layer, Node, Styled};
//!
//! let scene = Node::from(Canvas::new(64.0, 64.0)?.with_child(
//!     Layer::new("dots").with_child(
//!         Circle::new((32.0, 32.0), 8.0)?.with_fill(Color::from_rgba8(255, 0, 0, 255)),
//!     ),
//! ));
//! let svg = SvgRenderer::default().render(&scene)?;
//! assert!(svg.contains(r##"<circle cx="32" cy="32" r="8" fill="#ff0000" stroke="none"/>"##));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! This is a structural export; nothing is rasterized.

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use core::fmt::Write as _;

use peniko::{Color, Mix};
use tracing::{debug, trace};
use vellum_geometry::Transform;
use vellum_render::{RenderContext, RenderError, Renderer, walk_canvas, walk_group, walk_layer};
use vellum_scene::{Canvas, Circle, Ellipse, Group, Layer, Line, Rectangle, Style};

/// Output settings for [`SvgRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub struct SvgOptions {
    /// Document width when the root is not a canvas.
    pub width: f64,
    /// Document height when the root is not a canvas.
    pub height: f64,
    /// Maximum number of fractional digits for numbers.
    pub precision: usize,
    /// Whether to start the document with an XML declaration.
    pub xml_declaration: bool,
    /// Whether to end every element line with a newline.
    pub newlines: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            precision: 3,
            xml_declaration: true,
            newlines: true,
        }
    }
}

/// A renderer producing SVG markup.
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    options: SvgOptions,
    context: RenderContext,
    out: String,
    width: f64,
    height: f64,
    open_groups: usize,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(SvgOptions::default())
    }
}

impl SvgRenderer {
    /// Creates a renderer with the given options.
    pub fn new(options: SvgOptions) -> Self {
        Self {
            width: options.width,
            height: options.height,
            options,
            context: RenderContext::new(),
            out: String::new(),
            open_groups: 0,
        }
    }

    /// The options this renderer was created with.
    pub fn options(&self) -> &SvgOptions {
        &self.options
    }

    /// Markup emitted so far.
    pub fn svg(&self) -> &str {
        &self.out
    }

    fn end_line(&mut self) {
        if self.options.newlines {
            self.out.push('\n');
        }
    }

    fn write_header(&mut self) -> Result<(), RenderError> {
        if self.options.xml_declaration {
            self.out
                .push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            self.end_line();
        }
        let p = self.options.precision;
        let (w, h) = (fmt_num(self.width, p), fmt_num(self.height, p));
        write!(
            self.out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        self.end_line();
        Ok(())
    }

    fn write_paint(&mut self, attr: &str, color: Color) -> Result<(), RenderError> {
        let (hex, alpha) = color_to_svg(color);
        write!(self.out, r#" {attr}="{hex}""#)?;
        if alpha < 1.0 {
            let alpha = fmt_num(alpha, self.options.precision);
            write!(self.out, r#" {attr}-opacity="{alpha}""#)?;
        }
        Ok(())
    }

    /// Node paint wins over inherited paint; missing paint is written as `none`.
    fn write_style(&mut self, style: &Style) -> Result<(), RenderError> {
        let p = self.options.precision;
        let state = *self.context.current_state();

        match style.fill.or(state.fill) {
            Some(color) => self.write_paint("fill", color)?,
            None => self.out.push_str(r#" fill="none""#),
        }

        let stroke = match (style.stroke, state.stroke) {
            (Some(color), _) => Some((color, style.stroke_width)),
            (None, Some(color)) => Some((color, state.stroke_width)),
            (None, None) => None,
        };
        match stroke {
            Some((color, width)) => {
                self.write_paint("stroke", color)?;
                write!(self.out, r#" stroke-width="{}""#, fmt_num(width, p))?;
            }
            None => self.out.push_str(r#" stroke="none""#),
        }

        let opacity = (self.context.effective_opacity() * style.opacity).clamp(0.0, 1.0);
        if opacity < 1.0 {
            write!(self.out, r#" opacity="{}""#, fmt_num(opacity, p))?;
        }
        Ok(())
    }

    /// Writes the transform and style attributes and closes a leaf element.
    fn finish_leaf(&mut self, local: Transform, style: &Style) -> Result<(), RenderError> {
        let world = self.context.transform_for(local);
        if !world.is_identity() {
            let matrix = transform_to_svg_matrix(world, self.options.precision);
            write!(self.out, r#" transform="{matrix}""#)?;
        }
        self.write_style(style)?;
        self.out.push_str("/>");
        self.end_line();
        Ok(())
    }

    fn open_group(&mut self) {
        self.out.push('>');
        self.end_line();
        self.open_groups += 1;
    }

    fn close_group(&mut self) {
        self.out.push_str("</g>");
        self.end_line();
        self.open_groups = self.open_groups.saturating_sub(1);
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn context(&self) -> &RenderContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    fn clear_output(&mut self) {
        self.out.clear();
        self.width = self.options.width;
        self.height = self.options.height;
        self.open_groups = 0;
    }

    fn begin_render(&mut self) -> Result<(), RenderError> {
        self.write_header()
    }

    fn end_render(&mut self) -> Result<(), RenderError> {
        self.out.push_str("</svg>");
        self.end_line();
        Ok(())
    }

    fn output(&self) -> String {
        self.out.clone()
    }

    fn visit_circle(&mut self, circle: &Circle) -> Result<(), RenderError> {
        let p = self.options.precision;
        write!(
            self.out,
            r#"<circle cx="{}" cy="{}" r="{}""#,
            fmt_num(circle.center().x, p),
            fmt_num(circle.center().y, p),
            fmt_num(circle.radius(), p),
        )?;
        self.finish_leaf(circle.transform, &circle.style)
    }

    fn visit_rectangle(&mut self, rectangle: &Rectangle) -> Result<(), RenderError> {
        let p = self.options.precision;
        write!(
            self.out,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            fmt_num(rectangle.x(), p),
            fmt_num(rectangle.y(), p),
            fmt_num(rectangle.width(), p),
            fmt_num(rectangle.height(), p),
        )?;
        self.finish_leaf(rectangle.transform, &rectangle.style)
    }

    fn visit_ellipse(&mut self, ellipse: &Ellipse) -> Result<(), RenderError> {
        let p = self.options.precision;
        write!(
            self.out,
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
            fmt_num(ellipse.center().x, p),
            fmt_num(ellipse.center().y, p),
            fmt_num(ellipse.rx(), p),
            fmt_num(ellipse.ry(), p),
        )?;
        self.finish_leaf(ellipse.transform, &ellipse.style)
    }

    fn visit_line(&mut self, line: &Line) -> Result<(), RenderError> {
        let p = self.options.precision;
        write!(
            self.out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
            fmt_num(line.start().x, p),
            fmt_num(line.start().y, p),
            fmt_num(line.end().x, p),
            fmt_num(line.end().y, p),
        )?;
        self.finish_leaf(line.transform, &line.style)
    }

    fn visit_group(&mut self, group: &Group) -> Result<(), RenderError> {
        self.out.push_str("<g");
        if let Some(name) = &group.name {
            write!(self.out, r#" id="{}""#, escape(name))?;
        }
        self.open_group();
        walk_group(self, group)?;
        self.close_group();
        Ok(())
    }

    fn visit_layer(&mut self, layer: &Layer) -> Result<(), RenderError> {
        if !layer.visible || !self.context.is_visible() {
            trace!(name = %layer.name, "hidden layer, nothing emitted");
            return Ok(());
        }
        write!(self.out, r#"<g id="layer_{}""#, escape(&layer.name))?;
        if let Some(mode) = blend_mode_css(layer.blend) {
            write!(self.out, r#" style="mix-blend-mode:{mode}""#)?;
        }
        self.open_group();
        walk_layer(self, layer)?;
        self.close_group();
        Ok(())
    }

    /// Restarts the document at the canvas size.
    ///
    /// A canvas nested inside a group or layer cannot restart the document; it
    /// is written as a plain `<g>` around its children instead.
    fn visit_canvas(&mut self, canvas: &Canvas) -> Result<(), RenderError> {
        if self.open_groups > 0 {
            trace!(depth = self.open_groups, "nested canvas, emitted as a group");
            self.out.push_str("<g");
            if let Some(title) = &canvas.title {
                write!(self.out, r#" id="{}""#, escape(title))?;
            }
            self.open_group();
            walk_canvas(self, canvas)?;
            self.close_group();
            return Ok(());
        }
        debug!(
            width = canvas.width(),
            height = canvas.height(),
            "restarting document at canvas size"
        );
        self.out.clear();
        self.width = canvas.width();
        self.height = canvas.height();
        self.write_header()?;
        if let Some(title) = &canvas.title {
            write!(self.out, "<title>{}</title>", escape(title))?;
            self.end_line();
        }
        if let Some(description) = &canvas.description {
            write!(self.out, "<desc>{}</desc>", escape(description))?;
            self.end_line();
        }
        if let Some(background) = canvas.background {
            self.out.push_str(r#"<rect width="100%" height="100%""#);
            self.write_paint("fill", background)?;
            self.out.push_str("/>");
            self.end_line();
        }
        walk_canvas(self, canvas)
    }
}

fn blend_mode_css(mix: Mix) -> Option<&'static str> {
    match mix {
        Mix::Normal => None,
        Mix::Multiply => Some("multiply"),
        Mix::Screen => Some("screen"),
        Mix::Overlay => Some("overlay"),
        Mix::Darken => Some("darken"),
        Mix::Lighten => Some("lighten"),
        Mix::ColorDodge => Some("color-dodge"),
        Mix::ColorBurn => Some("color-burn"),
        Mix::HardLight => Some("hard-light"),
        Mix::SoftLight => Some("soft-light"),
        Mix::Difference => Some("difference"),
        Mix::Exclusion => Some("exclusion"),
        Mix::Hue => Some("hue"),
        Mix::Saturation => Some("saturation"),
        Mix::Color => Some("color"),
        Mix::Luminosity => Some("luminosity"),
        _ => None,
    }
}

fn color_to_svg(color: Color) -> (String, f64) {
    let rgba = color.to_rgba8();
    let a = f64::from(rgba.a) / 255.0;
    (format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b), a)
}

fn transform_to_svg_matrix(xf: Transform, precision: usize) -> String {
    // [a, b, c, d, e, f] maps to:
    // [ a c e ]
    // [ b d f ]
    // [ 0 0 1 ]
    let c = xf.coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        fmt_num(c[0], precision),
        fmt_num(c[1], precision),
        fmt_num(c[2], precision),
        fmt_num(c[3], precision),
        fmt_num(c[4], precision),
        fmt_num(c[5], precision),
    )
}

fn fmt_num(v: f64, precision: usize) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let mut s = format!("{v:.precision$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    // Rounding can leave a negative zero behind.
    if s == "-0" {
        s.remove(0);
    }
    s
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_render::StatePatch;
    use vellum_scene::{Node, Styled};

    fn red() -> Color {
        Color::from_rgba8(255, 0, 0, 255)
    }

    #[test]
    fn formats_numbers_compactly() {
        assert_eq!(fmt_num(50.0, 3), "50");
        assert_eq!(fmt_num(0.5, 3), "0.5");
        assert_eq!(fmt_num(1.23456, 2), "1.23");
        assert_eq!(fmt_num(-0.0001, 3), "0");
        assert_eq!(fmt_num(12.4, 0), "12");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"A & <B> "c" 'd'"#),
            "A &amp; &lt;B&gt; &quot;c&quot; &apos;d&apos;"
        );
    }

    #[test]
    fn exports_minimal_document() {
        let root = Node::from(Circle::new((10.0, 10.0), 5.0).unwrap());
        let svg = SvgRenderer::default().render(&root).unwrap();
        assert_eq!(
            svg,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                "\n",
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600" viewBox="0 0 800 600">"#,
                "\n",
                r#"<circle cx="10" cy="10" r="5" fill="none" stroke="none"/>"#,
                "\n",
                "</svg>\n",
            )
        );
    }

    #[test]
    fn options_control_framing() {
        let mut renderer = SvgRenderer::new(SvgOptions {
            xml_declaration: false,
            newlines: false,
            ..SvgOptions::default()
        });
        let svg = renderer
            .render(&Node::from(Rectangle::new(0.0, 0.0, 1.0, 1.0).unwrap()))
            .unwrap();
        assert!(svg.starts_with("<svg "));
        assert!(!svg.contains('\n'));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(renderer.svg(), svg);
    }

    #[test]
    fn canvas_restarts_document_at_its_size() {
        let root = Node::from(
            Canvas::new(200.0, 100.0)
                .unwrap()
                .with_title("A & B")
                .with_description("demo")
                .with_child(Circle::new((1.0, 1.0), 1.0).unwrap()),
        );
        let svg = SvgRenderer::default().render(&root).unwrap();
        assert_eq!(svg.matches("<svg").count(), 1);
        assert_eq!(svg.matches("<?xml").count(), 1);
        assert!(svg.contains(r#"width="200" height="100" viewBox="0 0 200 100""#));
        assert!(svg.contains("<title>A &amp; B</title>"));
        assert!(svg.contains("<desc>demo</desc>"));
        assert!(svg.contains(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##));
    }

    #[test]
    fn leaves_carry_full_transform() {
        let root = Node::from(
            Group::new()
                .with_name("g")
                .with_transform(Transform::translate(20.0, 0.0).unwrap())
                .with_child(
                    Circle::new((0.0, 0.0), 1.0)
                        .unwrap()
                        .with_transform(Transform::scale(2.0).unwrap()),
                ),
        );
        let svg = SvgRenderer::default().render(&root).unwrap();
        assert!(svg.contains(r#"<g id="g">"#));
        assert!(svg.contains(r#"transform="matrix(2 0 0 2 20 0)""#));
        assert_eq!(svg.matches("transform=").count(), 1);
    }

    #[test]
    fn hidden_layer_emits_nothing() {
        let root = Node::from(
            Canvas::new(10.0, 10.0)
                .unwrap()
                .with_background(None)
                .with_child(
                    Layer::new("ghost")
                        .with_visibility(false)
                        .with_child(Circle::new((5.0, 5.0), 2.0).unwrap()),
                ),
        );
        let svg = SvgRenderer::default().render(&root).unwrap();
        assert!(!svg.contains("<circle"));
        assert!(!svg.contains("<g"));
    }

    #[test]
    fn layer_opacity_multiplies_into_leaves() {
        let root = Node::from(
            Layer::new("faded")
                .with_opacity(0.5)
                .with_blend(Mix::Multiply)
                .with_child(Circle::new((0.0, 0.0), 1.0).unwrap().with_opacity(0.5)),
        );
        let svg = SvgRenderer::default().render(&root).unwrap();
        assert!(svg.contains(r#"<g id="layer_faded" style="mix-blend-mode:multiply">"#));
        assert!(svg.contains(r#"opacity="0.25""#));
    }

    #[test]
    fn inherited_paint_fills_gaps() {
        let mut renderer = SvgRenderer::default();
        let blue = Color::from_rgba8(0, 0, 255, 128);
        renderer
            .context_mut()
            .push(None, StatePatch::new().fill(blue).stroke(red()).stroke_width(3.0));
        let circle = Circle::new((0.0, 0.0), 1.0).unwrap();
        let rect = Rectangle::new(0.0, 0.0, 1.0, 1.0)
            .unwrap()
            .with_stroke(red(), 0.5);
        renderer.visit_circle(&circle).unwrap();
        renderer.visit_rectangle(&rect).unwrap();
        let svg = renderer.svg();
        assert!(svg.contains(
            r##"<circle cx="0" cy="0" r="1" fill="#0000ff" fill-opacity="0.502" stroke="#ff0000" stroke-width="3"/>"##
        ));
        assert!(svg.contains(r#"stroke-width="0.5""#));
    }

    #[test]
    fn cleared_inherited_fill_is_written_as_none() {
        let mut renderer = SvgRenderer::default();
        renderer.context_mut().push(None, StatePatch::new().fill(red()));
        renderer.context_mut().push(None, StatePatch::new().fill(None));
        let circle = Circle::new((0.0, 0.0), 1.0).unwrap();
        renderer.visit_circle(&circle).unwrap();
        assert!(renderer.svg().contains(r#"fill="none""#));
        assert!(!renderer.svg().contains("#ff0000"));
    }

    #[test]
    fn nested_canvas_keeps_markup_balanced() {
        let inner = Canvas::new(10.0, 10.0)
            .unwrap()
            .with_title("inset")
            .with_child(Circle::new((1.0, 1.0), 1.0).unwrap());
        let root = Node::from(
            Canvas::new(100.0, 100.0)
                .unwrap()
                .with_child(Group::new().with_name("frame").with_child(inner)),
        );
        let svg = SvgRenderer::default().render(&root).unwrap();
        assert_eq!(svg.matches("<svg").count(), 1);
        assert!(svg.contains(r#"width="100" height="100""#));
        assert!(svg.contains(r#"<g id="inset">"#));
        assert!(svg.contains("<circle"));
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
        let frame = svg.find(r#"<g id="frame">"#).unwrap();
        let inset = svg.find(r#"<g id="inset">"#).unwrap();
        assert!(frame < inset);
    }
}
