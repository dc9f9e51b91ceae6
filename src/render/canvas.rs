//! Canvas 2D rendering backend.
//!
//! Implements the RenderBackend trait using HTML Canvas 2D API via web-sys.
//! Arrowheads are filled triangles since Canvas has no markers.

use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::Result;
use crate::layout::{arrowhead, Point};
use crate::render::backend::RenderBackend;
use crate::render::scene::{Font, Primitive, Scene, Stroke, TextAnchor, TextRun};

/// Arrowhead length and base width, matching the SVG marker
const ARROW_LENGTH: f64 = 10.0;
const ARROW_WIDTH: f64 = 7.0;
/// Subscript size and drop relative to the font size
const SUBSCRIPT_SCALE: f64 = 0.75;
const SUBSCRIPT_DROP: f64 = 0.3;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
    dpr: f32,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let width = canvas.width();
        let height = canvas.height();

        Ok(Self {
            canvas,
            ctx,
            width,
            height,
            dpr: 1.0,
        })
    }

    /// Set the CSS size of the canvas element (logical pixels).
    pub fn set_canvas_css_size(&self, css_w: f64, css_h: f64) {
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{css_w}px"));
        let _ = style.set_property("height", &format!("{css_h}px"));
    }

    fn apply_stroke(&self, stroke: &Stroke) -> Result<()> {
        self.ctx.set_stroke_style_str(&stroke.color);
        self.ctx.set_line_width(stroke.width);
        let dash = match stroke.dash {
            Some([dash, gap]) => Array::of2(&JsValue::from_f64(dash), &JsValue::from_f64(gap)),
            None => Array::new(),
        };
        self.ctx
            .set_line_dash(&dash)
            .map_err(|_| "Failed to set line dash")?;
        Ok(())
    }

    fn fill_arrowhead(&self, tip: Point, direction: Point, color: &str, line_width: f64) {
        // Scales with the stroke width.
        let [a, b, c] = arrowhead(
            tip,
            direction,
            ARROW_LENGTH * line_width / 2.0,
            ARROW_WIDTH * line_width / 2.0,
        );
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.move_to(a.x, a.y);
        self.ctx.line_to(b.x, b.y);
        self.ctx.line_to(c.x, c.y);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn draw_primitive(&self, primitive: &Primitive, accent: &str) -> Result<()> {
        match primitive {
            Primitive::Rect {
                rect,
                fill,
                stroke,
                opacity,
            } => {
                self.ctx.set_global_alpha(*opacity);
                if let Some(fill) = fill {
                    self.ctx.set_fill_style_str(fill);
                    self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
                }
                if let Some(stroke) = stroke {
                    self.apply_stroke(stroke)?;
                    self.ctx
                        .stroke_rect(rect.x, rect.y, rect.width, rect.height);
                }
                self.ctx.set_global_alpha(1.0);
            }
            Primitive::Polyline { points, stroke } => {
                self.apply_stroke(stroke)?;
                self.ctx.begin_path();
                for (i, p) in points.iter().enumerate() {
                    if i == 0 {
                        self.ctx.move_to(p.x, p.y);
                    } else {
                        self.ctx.line_to(p.x, p.y);
                    }
                }
                self.ctx.stroke();
            }
            Primitive::Line {
                segment,
                stroke,
                opacity,
                arrow,
            } => {
                self.ctx.set_global_alpha(*opacity);
                self.apply_stroke(stroke)?;
                self.ctx.begin_path();
                self.ctx.move_to(segment.from.x, segment.from.y);
                self.ctx.line_to(segment.to.x, segment.to.y);
                self.ctx.stroke();
                if *arrow {
                    let direction = Point::new(
                        segment.to.x - segment.from.x,
                        segment.to.y - segment.from.y,
                    );
                    self.fill_arrowhead(segment.to, direction, accent, stroke.width);
                }
                self.ctx.set_global_alpha(1.0);
            }
            Primitive::Curve {
                curve,
                stroke,
                arrow,
            } => {
                self.apply_stroke(stroke)?;
                self.ctx.begin_path();
                self.ctx.move_to(curve.start.x, curve.start.y);
                self.ctx.bezier_curve_to(
                    curve.c1.x,
                    curve.c1.y,
                    curve.c2.x,
                    curve.c2.y,
                    curve.end.x,
                    curve.end.y,
                );
                self.ctx.stroke();
                if *arrow {
                    self.fill_arrowhead(curve.end, curve.end_direction(), accent, stroke.width);
                }
            }
            Primitive::Text(run) => self.draw_text(run)?,
            Primitive::Circle {
                center,
                radius,
                fill,
            } => {
                self.ctx.set_fill_style_str(fill);
                self.ctx.begin_path();
                self.ctx
                    .arc(center.x, center.y, *radius, 0.0, std::f64::consts::TAU)
                    .map_err(|_| "Failed to draw arc")?;
                self.ctx.fill();
            }
        }
        Ok(())
    }

    fn draw_text(&self, run: &TextRun) -> Result<()> {
        let fonts: Vec<String> = run
            .spans
            .iter()
            .map(|span| {
                Font {
                    size: if span.subscript {
                        run.font.size * SUBSCRIPT_SCALE
                    } else {
                        run.font.size
                    },
                    bold: run.font.bold || span.bold,
                    ..run.font
                }
                .css()
            })
            .collect();

        // Measure every span first so anchors apply to the whole run.
        let mut widths = Vec::with_capacity(run.spans.len());
        for (span, css) in run.spans.iter().zip(&fonts) {
            self.ctx.set_font(css);
            let metrics = self
                .ctx
                .measure_text(&span.text)
                .map_err(|_| "Failed to measure text")?;
            widths.push(metrics.width());
        }
        let total: f64 = widths.iter().sum();
        let mut x = match run.anchor {
            TextAnchor::Start => run.position.x,
            TextAnchor::Middle => run.position.x - total / 2.0,
            TextAnchor::End => run.position.x - total,
        };

        self.ctx.set_fill_style_str(&run.fill);
        self.ctx.set_text_align("left");
        self.ctx.set_text_baseline("middle");
        for ((span, css), width) in run.spans.iter().zip(&fonts).zip(widths) {
            let y = if span.subscript {
                run.position.y + run.font.size * SUBSCRIPT_DROP
            } else {
                run.position.y
            };
            self.ctx.set_font(css);
            self.ctx
                .fill_text(&span.text, x, y)
                .map_err(|_| "Failed to draw text")?;
            x += width;
        }
        Ok(())
    }
}

impl RenderBackend for CanvasRenderer {
    fn init(&mut self) -> Result<()> {
        // Canvas 2D doesn't need explicit initialization
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32, dpr: f32) {
        self.width = width;
        self.height = height;
        self.dpr = dpr;

        // Setting the buffer size also resets the context transform.
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn render(&mut self, scene: &Scene) -> Result<()> {
        let dpr = f64::from(self.dpr);
        self.ctx
            .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(|_| "Failed to set transform")?;

        self.ctx.set_fill_style_str(&scene.background);
        self.ctx.fill_rect(0.0, 0.0, scene.width, scene.height);

        self.ctx.save();
        self.ctx
            .translate(scene.origin.x, scene.origin.y)
            .map_err(|_| "Failed to translate")?;
        let result = scene
            .primitives
            .iter()
            .try_for_each(|p| self.draw_primitive(p, &scene.accent));
        self.ctx.restore();

        log::debug!(
            "canvas render: {} primitives at {}x{} (dpr {})",
            scene.primitives.len(),
            self.width,
            self.height,
            self.dpr
        );
        result
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
