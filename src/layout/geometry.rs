//! Pixel geometry for every diagram element.
//!
//! Coordinates are in content space: `x = 0` is the left edge of the
//! objective vector and `y = 0` the top edge of the vectors and the matrix.
//! Titles sit at negative `y`, the row group bracket at negative `x`.
//! [`DiagramGeometry::origin`] maps content space into the full canvas.

use serde::Serialize;

use super::curves::{CubicBezier, Point};
use crate::config::DiagramConfig;
use crate::error::ConfigError;
use crate::types::ActiveSet;

/// Horizontal distance of the bracket tips from the objective vector
const BRACKET_INSET: f64 = 10.0;
/// Horizontal distance of the bracket spine from the objective vector
const BRACKET_DEPTH: f64 = 20.0;
/// Row group label anchor (right-aligned) left of the vector
const ROW_GROUP_LABEL_OFFSET: f64 = 30.0;
/// Gap between the flow arrow and the blocks it joins
const FLOW_ARROW_INSET: f64 = 10.0;
/// Connectors start this far below the matrix
const CONNECTOR_START_OFFSET: f64 = 5.0;
/// First control point drop below the matrix bottom
const CONNECTOR_DROP: f64 = 60.0;
/// Second control point lead before the decision vector
const CONNECTOR_LEAD: f64 = 40.0;
/// Connectors stop this far before the decision vector
const CONNECTOR_END_INSET: f64 = 5.0;
/// Column group label distance right of the decision vector
const COLUMN_GROUP_LABEL_OFFSET: f64 = 20.0;
/// Space between the lowest element and the formula
const FOOTER_GAP: f64 = 48.0;
/// Formula line center, relative to the footer top
const FORMULA_OFFSET: f64 = 12.0;
/// Legend line center, relative to the footer top
const LEGEND_OFFSET: f64 = 48.0;
/// Total footer height
const FOOTER_HEIGHT: f64 = 60.0;

/// A horizontal extent `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub start: f64,
    pub end: f64,
}

impl Band {
    fn after(previous_end: f64, gap: f64, width: f64) -> Self {
        let start = previous_end + gap;
        Self {
            start,
            end: start + width,
        }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Vertical extent of the active row group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupSpan {
    pub start: f64,
    pub end: f64,
    pub mid: f64,
}

impl GroupSpan {
    /// Span from the first active row's top edge to the last one's bottom
    /// edge. None when no row is active.
    pub fn for_rows(active_rows: &ActiveSet, cell_size: f64) -> Option<Self> {
        let first = active_rows.first()?;
        let last = active_rows.last()?;
        let start = f64::from(first) * cell_size;
        let end = (f64::from(last) + 1.0) * cell_size;
        Some(Self {
            start,
            end,
            mid: (start + end) / 2.0,
        })
    }
}

/// Straight segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Curve from the bottom of an active matrix column to its decision cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connector {
    pub column: u32,
    pub curve: CubicBezier,
}

/// Rectangle of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Every derived coordinate of a diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramGeometry {
    pub cell_size: f64,
    pub row_vector: Band,
    pub matrix: Band,
    pub decision: Band,
    /// Bottom edge of the objective vector and the matrix
    pub matrix_bottom: f64,
    /// Bottom edge of the decision vector
    pub decision_bottom: f64,
    pub group_span: Option<GroupSpan>,
    /// Bracket polyline: tip, spine top, spine bottom, tip
    pub bracket: Option<[Point; 4]>,
    pub row_group_label: Option<Point>,
    /// Dashed guides at the group's top and bottom edges
    pub guides: Vec<Segment>,
    pub flow_arrow: Option<Segment>,
    pub connectors: Vec<Connector>,
    pub column_group_label: Option<Point>,
    /// Centers of the two title lines; None when there is no header band
    pub title_lines: Option<[f64; 2]>,
    /// Horizontal center of the footer lines
    pub footer_center: f64,
    pub formula_y: f64,
    pub legend_y: f64,
    /// Translation from content space to canvas space
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl DiagramGeometry {
    /// Validate `config` and derive every coordinate from it.
    pub fn resolve(config: &DiagramConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let cell = config.cell_size;
        let row_vector = Band {
            start: 0.0,
            end: config.vector_width,
        };
        let matrix = Band::after(
            row_vector.end,
            config.gap_vector_to_matrix,
            f64::from(config.cols) * cell,
        );
        let decision = Band::after(
            matrix.end,
            config.gap_matrix_to_decision,
            config.vector_width,
        );
        let matrix_bottom = f64::from(config.rows) * cell;
        let decision_bottom = f64::from(config.cols) * cell;

        let group_span = GroupSpan::for_rows(&config.active_rows, cell);
        let bracket = group_span.map(|span| {
            [
                Point::new(-BRACKET_INSET, span.start),
                Point::new(-BRACKET_DEPTH, span.start),
                Point::new(-BRACKET_DEPTH, span.end),
                Point::new(-BRACKET_INSET, span.end),
            ]
        });
        let row_group_label = group_span.map(|span| Point::new(-ROW_GROUP_LABEL_OFFSET, span.mid));
        let guides = group_span
            .map(|span| {
                [span.start, span.end]
                    .into_iter()
                    .map(|y| Segment {
                        from: Point::new(row_vector.end, y),
                        to: Point::new(matrix.start, y),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let flow_arrow = group_span.map(|span| Segment {
            from: Point::new(row_vector.end + FLOW_ARROW_INSET, span.mid),
            to: Point::new(matrix.start - FLOW_ARROW_INSET, span.mid),
        });

        let connectors: Vec<Connector> = config
            .active_cols
            .iter()
            .map(|column| Connector {
                column,
                curve: connector_curve(column, cell, &matrix, &decision, matrix_bottom),
            })
            .collect();

        let column_group_label = (!config.active_cols.is_empty()).then(|| {
            Point::new(
                decision.end + COLUMN_GROUP_LABEL_OFFSET,
                decision_bottom / 2.0,
            )
        });

        let title_lines = (config.header_height > 0.0)
            .then(|| [-config.header_height * 0.8, -config.header_height * 0.44]);

        let lowest = connectors
            .iter()
            .map(|c| c.curve.max_hull_y())
            .fold(matrix_bottom.max(decision_bottom), f64::max);
        let footer_top = lowest + FOOTER_GAP;

        let origin = Point::new(
            config.padding + config.gutter,
            config.padding + config.header_height,
        );
        let width = 2.0 * (config.padding + config.gutter) + decision.end;
        let height = 2.0 * config.padding + config.header_height + footer_top + FOOTER_HEIGHT;

        Ok(Self {
            cell_size: cell,
            row_vector,
            matrix,
            decision,
            matrix_bottom,
            decision_bottom,
            group_span,
            bracket,
            row_group_label,
            guides,
            flow_arrow,
            connectors,
            column_group_label,
            title_lines,
            footer_center: decision.end / 2.0,
            formula_y: footer_top + FORMULA_OFFSET,
            legend_y: footer_top + LEGEND_OFFSET,
            origin,
            width,
            height,
        })
    }

    /// Rectangle of matrix cell (row, col).
    pub fn matrix_cell(&self, row: u32, col: u32) -> CellRect {
        CellRect {
            x: self.matrix.start + f64::from(col) * self.cell_size,
            y: f64::from(row) * self.cell_size,
            width: self.cell_size,
            height: self.cell_size,
        }
    }

    /// Rectangle of objective vector entry `index`.
    pub fn row_vector_cell(&self, index: u32) -> CellRect {
        self.vector_cell(&self.row_vector, index)
    }

    /// Rectangle of decision vector entry `index`.
    pub fn decision_cell(&self, index: u32) -> CellRect {
        self.vector_cell(&self.decision, index)
    }

    fn vector_cell(&self, band: &Band, index: u32) -> CellRect {
        CellRect {
            x: band.start,
            y: f64::from(index) * self.cell_size,
            width: band.width(),
            height: self.cell_size,
        }
    }
}

/// S-shaped drop-then-across curve from the bottom of matrix column `column`
/// to the left edge of the matching decision cell.
fn connector_curve(
    column: u32,
    cell: f64,
    matrix: &Band,
    decision: &Band,
    matrix_bottom: f64,
) -> CubicBezier {
    let start_x = matrix.start + f64::from(column) * cell + cell / 2.0;
    let end_y = f64::from(column) * cell + cell / 2.0;
    CubicBezier {
        start: Point::new(start_x, matrix_bottom + CONNECTOR_START_OFFSET),
        c1: Point::new(start_x, matrix_bottom + CONNECTOR_DROP),
        c2: Point::new(decision.start - CONNECTOR_LEAD, end_y),
        end: Point::new(decision.start - CONNECTOR_END_INSET, end_y),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let g = DiagramGeometry::resolve(&DiagramConfig::default()).unwrap();
        assert_eq!(g.row_vector, Band { start: 0.0, end: 60.0 });
        assert_eq!(g.matrix, Band { start: 160.0, end: 480.0 });
        assert_eq!(g.decision, Band { start: 600.0, end: 660.0 });
    }

    #[test]
    fn test_default_group_span() {
        let g = DiagramGeometry::resolve(&DiagramConfig::default()).unwrap();
        assert_eq!(
            g.group_span,
            Some(GroupSpan {
                start: 0.0,
                end: 96.0,
                mid: 48.0
            })
        );
        let arrow = g.flow_arrow.unwrap();
        assert_eq!(arrow.from, Point::new(70.0, 48.0));
        assert_eq!(arrow.to, Point::new(150.0, 48.0));
    }

    #[test]
    fn test_connector_for_column_five() {
        let g = DiagramGeometry::resolve(&DiagramConfig::default()).unwrap();
        let c = g.connectors.iter().find(|c| c.column == 5).unwrap();
        assert_eq!(c.curve.start, Point::new(336.0, 325.0));
        assert_eq!(c.curve.c1, Point::new(336.0, 380.0));
        assert_eq!(c.curve.c2, Point::new(560.0, 176.0));
        assert_eq!(c.curve.end, Point::new(595.0, 176.0));
    }

    #[test]
    fn test_canvas_size() {
        let g = DiagramGeometry::resolve(&DiagramConfig::default()).unwrap();
        assert_eq!(g.origin, Point::new(136.0, 90.0));
        assert_eq!(g.width, 932.0);
        // 380 (lowest control point) + 48 gap + 60 footer + 80 padding + 50 header
        assert_eq!(g.height, 618.0);
    }
}
