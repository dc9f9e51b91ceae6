//! SVG backend.
//!
//! Writes a standalone SVG document for a [`Scene`]. Content-space
//! primitives go inside a single translated group, and every arrow shares
//! one marker definition.

use std::fmt::Write as _;

use base64::Engine as _;

use crate::error::Result;
use crate::layout::Point;
use crate::render::backend::RenderBackend;
use crate::render::scene::{Primitive, Scene, Stroke, TextAnchor, TextRun};

/// Id of the shared arrowhead marker
const ARROW_MARKER_ID: &str = "arrow-primary";

/// SVG document writer implementing [`RenderBackend`].
#[derive(Debug, Default)]
pub struct SvgRenderer {
    /// Display width; 0 uses the scene width
    width: u32,
    /// Display height; 0 uses the scene height
    height: u32,
    output: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered document.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }

    fn write_document(&self, out: &mut String, scene: &Scene) -> Result<()> {
        let display_w = if self.width > 0 {
            fmt_num(f64::from(self.width))
        } else {
            fmt_num(scene.width)
        };
        let display_h = if self.height > 0 {
            fmt_num(f64::from(self.height))
        } else {
            fmt_num(scene.height)
        };

        out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        out.push('\n');
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            display_w,
            display_h,
            fmt_num(scene.width),
            fmt_num(scene.height)
        )?;

        if scene
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Line { arrow: true, .. } | Primitive::Curve { arrow: true, .. }))
        {
            writeln!(
                out,
                r#"<defs><marker id="{}" markerWidth="10" markerHeight="7" refX="9" refY="3.5" orient="auto"><polygon points="0 0, 10 3.5, 0 7" fill="{}"/></marker></defs>"#,
                ARROW_MARKER_ID,
                xml_escape(&scene.accent)
            )?;
        }

        writeln!(
            out,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            xml_escape(&scene.background)
        )?;
        writeln!(
            out,
            r#"<g transform="translate({} {})">"#,
            fmt_num(scene.origin.x),
            fmt_num(scene.origin.y)
        )?;

        for primitive in &scene.primitives {
            write_primitive(out, primitive)?;
        }

        out.push_str("</g>\n</svg>\n");
        Ok(())
    }
}

impl RenderBackend for SvgRenderer {
    fn init(&mut self) -> Result<()> {
        self.output.clear();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32, _dpr: f32) {
        // Vector output: the pixel ratio does not change the document.
        self.width = width;
        self.height = height;
    }

    fn render(&mut self, scene: &Scene) -> Result<()> {
        let mut out = String::with_capacity(16 * 1024);
        self.write_document(&mut out, scene)?;
        self.output = out;
        Ok(())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Render `scene` to an SVG document at its natural size.
pub fn render_svg(scene: &Scene) -> Result<String> {
    let mut renderer = SvgRenderer::new();
    renderer.render(scene)?;
    Ok(renderer.into_string())
}

/// Wrap an SVG document in a base64 `data:` URI.
pub fn to_data_uri(svg: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(svg.as_bytes())
    )
}

fn write_primitive(out: &mut String, primitive: &Primitive) -> Result<()> {
    match primitive {
        Primitive::Rect {
            rect,
            fill,
            stroke,
            opacity,
        } => {
            write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                fmt_num(rect.x),
                fmt_num(rect.y),
                fmt_num(rect.width),
                fmt_num(rect.height),
                fill.as_deref().map_or_else(|| "none".to_string(), xml_escape)
            )?;
            if let Some(stroke) = stroke {
                write_stroke(out, stroke)?;
            }
            write_opacity(out, *opacity)?;
            out.push_str("/>\n");
        }
        Primitive::Polyline { points, stroke } => {
            write!(out, r#"<path d="{}" fill="none""#, polyline_path(points))?;
            write_stroke(out, stroke)?;
            out.push_str("/>\n");
        }
        Primitive::Line {
            segment,
            stroke,
            opacity,
            arrow,
        } => {
            write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                fmt_num(segment.from.x),
                fmt_num(segment.from.y),
                fmt_num(segment.to.x),
                fmt_num(segment.to.y)
            )?;
            write_stroke(out, stroke)?;
            write_opacity(out, *opacity)?;
            write_marker(out, *arrow)?;
            out.push_str("/>\n");
        }
        Primitive::Curve {
            curve,
            stroke,
            arrow,
        } => {
            write!(
                out,
                r#"<path d="M {} {} C {} {}, {} {}, {} {}" fill="none""#,
                fmt_num(curve.start.x),
                fmt_num(curve.start.y),
                fmt_num(curve.c1.x),
                fmt_num(curve.c1.y),
                fmt_num(curve.c2.x),
                fmt_num(curve.c2.y),
                fmt_num(curve.end.x),
                fmt_num(curve.end.y)
            )?;
            write_stroke(out, stroke)?;
            write_marker(out, *arrow)?;
            out.push_str("/>\n");
        }
        Primitive::Text(run) => write_text(out, run)?,
        Primitive::Circle {
            center,
            radius,
            fill,
        } => {
            writeln!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(*radius),
                xml_escape(fill)
            )?;
        }
    }
    Ok(())
}

fn write_stroke(out: &mut String, stroke: &Stroke) -> Result<()> {
    write!(
        out,
        r#" stroke="{}" stroke-width="{}""#,
        xml_escape(&stroke.color),
        fmt_num(stroke.width)
    )?;
    if let Some([dash, gap]) = stroke.dash {
        write!(
            out,
            r#" stroke-dasharray="{},{}""#,
            fmt_num(dash),
            fmt_num(gap)
        )?;
    }
    Ok(())
}

fn write_opacity(out: &mut String, opacity: f64) -> Result<()> {
    if opacity < 1.0 {
        write!(out, r#" opacity="{}""#, fmt_num(opacity))?;
    }
    Ok(())
}

fn write_marker(out: &mut String, arrow: bool) -> Result<()> {
    if arrow {
        write!(out, r#" marker-end="url(#{})""#, ARROW_MARKER_ID)?;
    }
    Ok(())
}

fn write_text(out: &mut String, run: &TextRun) -> Result<()> {
    let anchor = match run.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    write!(
        out,
        r#"<text x="{}" y="{}" fill="{}" font-family="{}" font-size="{}""#,
        fmt_num(run.position.x),
        fmt_num(run.position.y),
        xml_escape(&run.fill),
        xml_escape(run.font.family()),
        fmt_num(run.font.size)
    )?;
    if run.font.bold {
        out.push_str(r#" font-weight="bold""#);
    }
    if run.font.italic {
        out.push_str(r#" font-style="italic""#);
    }
    write!(
        out,
        r#" text-anchor="{}" dominant-baseline="middle">"#,
        anchor
    )?;
    for span in &run.spans {
        if !span.subscript && !span.bold {
            out.push_str(&xml_escape(&span.text));
            continue;
        }
        out.push_str("<tspan");
        if span.subscript {
            out.push_str(r#" baseline-shift="sub" font-size="75%""#);
        }
        if span.bold {
            out.push_str(r#" font-weight="bold""#);
        }
        write!(out, ">{}</tspan>", xml_escape(&span.text))?;
    }
    out.push_str("</text>\n");
    Ok(())
}

fn polyline_path(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        d.push_str(if i == 0 { "M " } else { "L " });
        d.push_str(&fmt_num(p.x));
        d.push(' ');
        d.push_str(&fmt_num(p.y));
    }
    d
}

/// Format a coordinate with at most two decimals and no trailing zeros.
fn fmt_num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn xml_escape(s: &str) -> String {
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
