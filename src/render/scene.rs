//! Backend-agnostic display list for one diagram.
//!
//! [`Scene::build`] turns the grid, the resolved styles and the geometry into
//! a flat list of primitives in paint order. Coordinates stay in content
//! space; backends translate by [`Scene::origin`].

use crate::config::{DiagramConfig, Labels, Palette};
use crate::layout::{CellRect, CubicBezier, DiagramGeometry, Point, Segment};
use crate::matrix::Grid;
use crate::render::colors::palette as default_colors;
use crate::render::CssColor;
use crate::styles::{resolve_cell_style, resolve_vector_cell_style};
use crate::types::{ActiveSet, CellStyle};

/// Title font size
const TITLE_FONT_SIZE: f64 = 14.0;
/// Font size of the symbols inside active vector cells
const CELL_LABEL_FONT_SIZE: f64 = 12.0;
/// Horizontal padding of symbols inside vector cells
const CELL_LABEL_PADDING: f64 = 8.0;
const GROUP_LABEL_FONT_SIZE: f64 = 14.0;
const FORMULA_FONT_SIZE: f64 = 24.0;
const LEGEND_FONT_SIZE: f64 = 14.0;
const LEGEND_DOT_RADIUS: f64 = 4.0;
const LEGEND_DOT_GAP: f64 = 8.0;
/// Average glyph advance as a fraction of the font size, for layout
/// decisions that happen before any text is measured
const AVERAGE_GLYPH_WIDTH: f64 = 0.52;

/// Line stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: CssColor,
    pub width: f64,
    /// Dash and gap lengths
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    pub fn solid(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: None,
        }
    }

    pub fn dashed(color: &str, width: f64, dash: f64, gap: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: Some([dash, gap]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub serif: bool,
}

impl Font {
    pub const fn sans(size: f64, bold: bool) -> Self {
        Self {
            size,
            bold,
            italic: false,
            serif: false,
        }
    }

    pub const fn serif(size: f64, bold: bool) -> Self {
        Self {
            size,
            bold,
            italic: false,
            serif: true,
        }
    }

    /// CSS font family list.
    pub fn family(&self) -> &'static str {
        if self.serif {
            "Georgia, 'Times New Roman', serif"
        } else {
            "Inter, 'Helvetica Neue', Arial, sans-serif"
        }
    }

    /// CSS font shorthand, as accepted by Canvas 2D.
    pub fn css(&self) -> String {
        format!(
            "{}{}{}px {}",
            if self.italic { "italic " } else { "" },
            if self.bold { "bold " } else { "" },
            self.size,
            self.family()
        )
    }
}

/// A run of text; subscript spans render smaller and lowered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub subscript: bool,
    /// Bold on top of the run's font weight
    pub bold: bool,
}

impl TextSpan {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            subscript: false,
            bold: false,
        }
    }

    pub fn subscript(text: &str) -> Self {
        Self {
            subscript: true,
            ..Self::plain(text)
        }
    }
}

/// Split formula markup into spans.
///
/// `_` makes the following run of non-space characters a subscript, `*`
/// toggles bold and `\` takes the next character literally. So
/// `"Δ*x*_S₁ = T"` yields `Δ`, bold `x`, subscript `S₁`, then ` = T`.
pub fn parse_markup(s: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut subscript = false;
    let mut bold = false;

    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => current.push(chars.next().unwrap_or('\\')),
            '_' if !subscript => {
                flush(&mut spans, &mut current, subscript, bold);
                subscript = true;
            }
            '*' => {
                flush(&mut spans, &mut current, subscript, bold);
                bold = !bold;
            }
            c if subscript && c.is_whitespace() => {
                flush(&mut spans, &mut current, subscript, bold);
                subscript = false;
                current.push(c);
            }
            c => current.push(c),
        }
    }
    flush(&mut spans, &mut current, subscript, bold);
    spans
}

fn flush(spans: &mut Vec<TextSpan>, current: &mut String, subscript: bool, bold: bool) {
    if !current.is_empty() {
        spans.push(TextSpan {
            text: std::mem::take(current),
            subscript,
            bold,
        });
    }
}

/// Text anchored at `position`, vertically centered on it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub position: Point,
    pub spans: Vec<TextSpan>,
    pub font: Font,
    pub fill: CssColor,
    pub anchor: TextAnchor,
}

impl TextRun {
    /// Text as it reads, without markup.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        rect: CellRect,
        fill: Option<CssColor>,
        stroke: Option<Stroke>,
        opacity: f64,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Line {
        segment: Segment,
        stroke: Stroke,
        opacity: f64,
        arrow: bool,
    },
    Curve {
        curve: CubicBezier,
        stroke: Stroke,
        arrow: bool,
    },
    Text(TextRun),
    Circle {
        center: Point,
        radius: f64,
        fill: CssColor,
    },
}

/// Complete display list.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    /// Translation from content space to canvas space
    pub origin: Point,
    pub background: CssColor,
    /// Fill of arrowheads
    pub accent: CssColor,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    /// Lay out every element of the diagram in paint order: titles, the
    /// three blocks, the overlay (bracket, guides, arrows, connectors, group
    /// labels), then the footer.
    pub fn build(config: &DiagramConfig, grid: &Grid, geometry: &DiagramGeometry) -> Self {
        let mut builder = SceneBuilder {
            palette: &config.palette,
            labels: &config.labels,
            geometry,
            primitives: Vec::new(),
        };

        builder.titles();
        builder.vector(
            config.rows,
            &config.active_rows,
            &config.labels.row_symbol,
            VectorSide::Objective,
        );
        builder.matrix(grid, &config.active_rows, &config.active_cols);
        builder.vector(
            config.cols,
            &config.active_cols,
            &config.labels.column_symbol,
            VectorSide::Decision,
        );
        builder.overlay();
        builder.footer();

        log::debug!(
            "scene built: {}x{} with {} primitives",
            geometry.width,
            geometry.height,
            builder.primitives.len()
        );

        Self {
            width: geometry.width,
            height: geometry.height,
            origin: geometry.origin,
            background: config.palette.white.clone(),
            accent: config.palette.primary.clone(),
            primitives: builder.primitives,
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn curves(&self) -> impl Iterator<Item = &CubicBezier> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Curve { curve, .. } => Some(curve),
            _ => None,
        })
    }
}

#[derive(Clone, Copy)]
enum VectorSide {
    Objective,
    Decision,
}

struct SceneBuilder<'a> {
    palette: &'a Palette,
    labels: &'a Labels,
    geometry: &'a DiagramGeometry,
    primitives: Vec<Primitive>,
}

impl SceneBuilder<'_> {
    /// Label text, drawn exactly as configured.
    fn text(&mut self, position: Point, text: &str, font: Font, fill: &str, anchor: TextAnchor) {
        if text.is_empty() {
            return;
        }
        self.spans(position, vec![TextSpan::plain(text)], font, fill, anchor);
    }

    fn spans(
        &mut self,
        position: Point,
        spans: Vec<TextSpan>,
        font: Font,
        fill: &str,
        anchor: TextAnchor,
    ) {
        if spans.is_empty() {
            return;
        }
        self.primitives.push(Primitive::Text(TextRun {
            position,
            spans,
            font,
            fill: fill.to_string(),
            anchor,
        }));
    }

    fn cell(&mut self, rect: CellRect, style: &CellStyle) {
        self.primitives.push(Primitive::Rect {
            rect,
            fill: Some(style.fill.clone()),
            stroke: Some(Stroke::solid(&style.border, 1.0)),
            opacity: style.opacity,
        });
    }

    fn frame(&mut self, rect: CellRect) {
        self.primitives.push(Primitive::Rect {
            rect,
            fill: None,
            stroke: Some(Stroke::solid(&self.palette.inactive_edge, 1.0)),
            opacity: 1.0,
        });
    }

    fn titles(&mut self) {
        let Some([first, second]) = self.geometry.title_lines else {
            return;
        };
        let g = self.geometry;
        let color = self.palette.text_main.clone();
        let font = Font::sans(TITLE_FONT_SIZE, true);
        let labels = self.labels;
        for (band, title, caption) in [
            (
                &g.row_vector,
                &labels.objective_title,
                &labels.objective_caption,
            ),
            (&g.matrix, &labels.matrix_title, &labels.matrix_caption),
            (&g.decision, &labels.decision_title, &labels.decision_caption),
        ] {
            let x = band.center();
            self.text(Point::new(x, first), title, font, &color, TextAnchor::Middle);
            self.text(Point::new(x, second), caption, font, &color, TextAnchor::Middle);
        }
    }

    fn vector(&mut self, len: u32, active: &ActiveSet, symbol: &str, side: VectorSide) {
        let g = self.geometry;
        let band = match side {
            VectorSide::Objective => g.row_vector,
            VectorSide::Decision => g.decision,
        };
        let label_font = Font::serif(CELL_LABEL_FONT_SIZE, true);

        for i in 0..len {
            let rect = match side {
                VectorSide::Objective => g.row_vector_cell(i),
                VectorSide::Decision => g.decision_cell(i),
            };
            let style = resolve_vector_cell_style(i, active, self.palette);
            self.cell(rect, &style);

            if active.contains(i) {
                let (x, anchor) = match side {
                    VectorSide::Objective => (band.end - CELL_LABEL_PADDING, TextAnchor::End),
                    VectorSide::Decision => (band.start + CELL_LABEL_PADDING, TextAnchor::Start),
                };
                let y = rect.y + rect.height / 2.0;
                let mut label = Vec::with_capacity(2);
                if !symbol.is_empty() {
                    label.push(TextSpan::plain(symbol));
                }
                label.push(TextSpan::subscript(&(u64::from(i) + 1).to_string()));
                let white = self.palette.white.clone();
                self.spans(Point::new(x, y), label, label_font, &white, anchor);
            }
        }

        self.frame(CellRect {
            x: band.start,
            y: 0.0,
            width: band.width(),
            height: f64::from(len) * g.cell_size,
        });
    }

    fn matrix(&mut self, grid: &Grid, active_rows: &ActiveSet, active_cols: &ActiveSet) {
        let g = self.geometry;
        for (row, col, value) in grid.cells() {
            let style =
                resolve_cell_style(row, col, value, active_rows, active_cols, self.palette);
            self.cell(g.matrix_cell(row, col), &style);
        }
        self.frame(CellRect {
            x: g.matrix.start,
            y: 0.0,
            width: g.matrix.width(),
            height: g.matrix_bottom,
        });
    }

    fn overlay(&mut self) {
        let g = self.geometry;
        let primary = self.palette.primary.clone();
        let group_font = Font::sans(GROUP_LABEL_FONT_SIZE, true);

        if let Some(bracket) = g.bracket {
            self.primitives.push(Primitive::Polyline {
                points: bracket.to_vec(),
                stroke: Stroke::solid(&primary, 2.0),
            });
        }
        if let Some(anchor) = g.row_group_label {
            let text = self.labels.row_group.clone();
            self.text(anchor, &text, group_font, &primary, TextAnchor::End);
        }

        for segment in &g.guides {
            self.primitives.push(Primitive::Line {
                segment: *segment,
                stroke: Stroke::dashed(&primary, 1.0, 4.0, 4.0),
                opacity: 0.4,
                arrow: false,
            });
        }
        if let Some(segment) = g.flow_arrow {
            self.primitives.push(Primitive::Line {
                segment,
                stroke: Stroke::solid(&primary, 3.0),
                opacity: 1.0,
                arrow: true,
            });
        }

        for connector in &g.connectors {
            self.primitives.push(Primitive::Curve {
                curve: connector.curve,
                stroke: Stroke::solid(&primary, 1.5),
                arrow: true,
            });
        }
        if let Some(anchor) = g.column_group_label {
            let text = self.labels.column_group.clone();
            self.text(anchor, &text, group_font, &primary, TextAnchor::Start);
        }
    }

    fn footer(&mut self) {
        let g = self.geometry;
        let formula = parse_markup(&self.labels.formula);
        let text_main = self.palette.text_main.clone();
        self.spans(
            Point::new(g.footer_center, g.formula_y),
            formula,
            Font::serif(FORMULA_FONT_SIZE, false),
            &text_main,
            TextAnchor::Middle,
        );

        let legend = self.labels.legend.clone();
        if legend.is_empty() {
            return;
        }
        let half_width = estimate_text_width(&legend, LEGEND_FONT_SIZE) / 2.0;
        self.primitives.push(Primitive::Circle {
            center: Point::new(
                g.footer_center - half_width - LEGEND_DOT_GAP,
                g.legend_y,
            ),
            radius: LEGEND_DOT_RADIUS,
            fill: self.palette.primary.clone(),
        });
        let font = Font {
            italic: true,
            ..Font::sans(LEGEND_FONT_SIZE, false)
        };
        self.text(
            Point::new(g.footer_center, g.legend_y),
            &legend,
            font,
            default_colors::TEXT_MUTED,
            TextAnchor::Middle,
        );
    }
}

/// Rough rendered width of `text`, used only to place the legend dot.
fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    let glyphs = text.chars().count();
    f64::from(u32::try_from(glyphs).unwrap_or(u32::MAX)) * font_size * AVERAGE_GLYPH_WIDTH
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn bold(text: &str) -> TextSpan {
        TextSpan {
            bold: true,
            ..TextSpan::plain(text)
        }
    }

    #[test]
    fn test_parse_markup_subscript() {
        assert_eq!(
            parse_markup("f_10"),
            vec![TextSpan::plain("f"), TextSpan::subscript("10")]
        );
    }

    #[test]
    fn test_parse_markup_formula() {
        assert_eq!(
            parse_markup("\u{394}*x*_S\u{2081} = *T*"),
            vec![
                TextSpan::plain("\u{394}"),
                bold("x"),
                TextSpan::subscript("S\u{2081}"),
                TextSpan::plain(" = "),
                bold("T"),
            ]
        );
    }

    #[test]
    fn test_parse_markup_escapes() {
        assert_eq!(
            parse_markup(r"a\_b \*c\*"),
            vec![TextSpan::plain("a_b *c*")]
        );
        assert_eq!(parse_markup("end\\"), vec![TextSpan::plain("end\\")]);
    }

    #[test]
    fn test_parse_markup_plain() {
        assert_eq!(parse_markup("Group O"), vec![TextSpan::plain("Group O")]);
        assert!(parse_markup("").is_empty());
    }

    #[test]
    fn test_labels_keep_underscores() {
        let mut config = DiagramConfig::default();
        config.labels.matrix_title = "T_inverse *matrix*".to_string();
        let grid = crate::matrix::generate(
            config.rows,
            config.cols,
            &config.active_rows,
            &config.active_cols,
        )
        .unwrap();
        let geometry = DiagramGeometry::resolve(&config).unwrap();
        let scene = Scene::build(&config, &grid, &geometry);

        let title = scene
            .texts()
            .find(|t| t.plain_text().starts_with("T_"))
            .unwrap();
        assert_eq!(title.spans, vec![TextSpan::plain("T_inverse *matrix*")]);
    }

    #[test]
    fn test_vector_symbol_spans() {
        let config = DiagramConfig::default();
        let grid = crate::matrix::generate(
            config.rows,
            config.cols,
            &config.active_rows,
            &config.active_cols,
        )
        .unwrap();
        let geometry = DiagramGeometry::resolve(&config).unwrap();
        let scene = Scene::build(&config, &grid, &geometry);

        let label = scene.texts().find(|t| t.plain_text() == "f1").unwrap();
        assert_eq!(
            label.spans,
            vec![TextSpan::plain("f"), TextSpan::subscript("1")]
        );
    }

    #[test]
    fn test_font_css() {
        let font = Font {
            italic: true,
            ..Font::serif(12.0, true)
        };
        assert_eq!(
            font.css(),
            "italic bold 12px Georgia, 'Times New Roman', serif"
        );
    }
}
