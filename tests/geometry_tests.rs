//! Layout geometry tests
//!
//! Band ordering, the active group span, connectors and canvas sizing.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use bridgeview::layout::{DiagramGeometry, Point};
use bridgeview::DiagramConfig;
use common::config_with;
use test_case::test_case;

#[test_case(32.0, 60.0, 100.0, 120.0 ; "reference sizes")]
#[test_case(1.0, 1.0, 1.0, 1.0 ; "unit sizes")]
#[test_case(8.5, 200.0, 0.5, 3.25 ; "fractional sizes")]
#[test_case(64.0, 10.0, 400.0, 12.0 ; "wide gap")]
fn test_band_starts_strictly_increase(cell: f64, vector: f64, gap1: f64, gap2: f64) {
    let config = DiagramConfig {
        cell_size: cell,
        vector_width: vector,
        gap_vector_to_matrix: gap1,
        gap_matrix_to_decision: gap2,
        ..DiagramConfig::default()
    };
    let g = DiagramGeometry::resolve(&config).unwrap();

    assert!(g.row_vector.start < g.row_vector.end);
    assert!(g.row_vector.end < g.matrix.start);
    assert!(g.matrix.start < g.matrix.end);
    assert!(g.matrix.end < g.decision.start);
    assert!(g.decision.start < g.decision.end);
    assert_eq!(g.matrix.start - g.row_vector.end, gap1);
    assert_eq!(g.decision.start - g.matrix.end, gap2);
}

#[test_case(&[0, 1, 2], 0.0, 96.0 ; "reference group")]
#[test_case(&[4], 128.0, 160.0 ; "single row")]
#[test_case(&[2, 7], 64.0, 256.0 ; "non contiguous rows")]
#[test_case(&[9, 0], 0.0, 320.0 ; "unsorted input")]
fn test_group_span(rows: &[u32], start: f64, end: f64) {
    let g = DiagramGeometry::resolve(&config_with(10, 10, rows, &[1])).unwrap();
    let span = g.group_span.unwrap();
    assert_eq!(span.start, start);
    assert_eq!(span.end, end);
    assert_eq!(span.mid, (span.start + span.end) / 2.0);
    assert!(span.start < span.end);
}

#[test]
fn test_one_flow_arrow_for_the_whole_group() {
    let g = DiagramGeometry::resolve(&DiagramConfig::default()).unwrap();
    let arrow = g.flow_arrow.unwrap();
    let span = g.group_span.unwrap();

    assert_eq!(arrow.from.y, span.mid);
    assert_eq!(arrow.to.y, span.mid);
    assert!(arrow.from.x > g.row_vector.end);
    assert!(arrow.to.x < g.matrix.start);

    assert_eq!(g.guides.len(), 2);
    assert_eq!(g.guides[0].from.y, span.start);
    assert_eq!(g.guides[1].from.y, span.end);
}

#[test]
fn test_bracket_left_of_vector() {
    let g = DiagramGeometry::resolve(&DiagramConfig::default()).unwrap();
    let bracket = g.bracket.unwrap();
    assert_eq!(bracket[0], Point::new(-10.0, 0.0));
    assert_eq!(bracket[1], Point::new(-20.0, 0.0));
    assert_eq!(bracket[2], Point::new(-20.0, 96.0));
    assert_eq!(bracket[3], Point::new(-10.0, 96.0));
    assert_eq!(g.row_group_label, Some(Point::new(-30.0, 48.0)));
}

#[test]
fn test_no_active_rows_means_no_bracket_or_arrow() {
    let g = DiagramGeometry::resolve(&config_with(10, 10, &[], &[2])).unwrap();
    assert!(g.group_span.is_none());
    assert!(g.bracket.is_none());
    assert!(g.flow_arrow.is_none());
    assert!(g.guides.is_empty());
    assert!(g.row_group_label.is_none());
    assert_eq!(g.connectors.len(), 1);
}

#[test]
fn test_connector_per_active_column() {
    let g = DiagramGeometry::resolve(&DiagramConfig::default()).unwrap();
    let columns: Vec<u32> = g.connectors.iter().map(|c| c.column).collect();
    assert_eq!(columns, vec![2, 5, 6, 8]);

    for connector in &g.connectors {
        let cell = g.matrix_cell(0, connector.column);
        let target = g.decision_cell(connector.column);
        let curve = connector.curve;

        // Starts under the middle of its column, below the matrix.
        assert_eq!(curve.start.x, cell.x + cell.width / 2.0);
        assert!(curve.start.y > g.matrix_bottom);
        // Ends just before the middle of its decision cell.
        assert_eq!(curve.end.y, target.y + target.height / 2.0);
        assert!(curve.end.x < g.decision.start);
        // Drops first, then travels across.
        assert_eq!(curve.c1.x, curve.start.x);
        assert!(curve.c1.y > curve.start.y);
        assert_eq!(curve.c2.y, curve.end.y);
    }
}

#[test]
fn test_connectors_stay_above_footer() {
    let g = DiagramGeometry::resolve(&DiagramConfig::default()).unwrap();
    for connector in &g.connectors {
        for i in 0..=50 {
            let p = connector.curve.point_at(f64::from(i) / 50.0);
            assert!(p.y <= connector.curve.max_hull_y() + 1e-9);
            assert!(p.y < g.formula_y);
        }
    }
}

#[test]
fn test_cell_rects() {
    let g = DiagramGeometry::resolve(&DiagramConfig::default()).unwrap();
    let m = g.matrix_cell(1, 5);
    assert_eq!((m.x, m.y, m.width, m.height), (320.0, 32.0, 32.0, 32.0));
    let r = g.row_vector_cell(2);
    assert_eq!((r.x, r.y, r.width, r.height), (0.0, 64.0, 60.0, 32.0));
    let d = g.decision_cell(8);
    assert_eq!((d.x, d.y, d.width, d.height), (600.0, 256.0, 60.0, 32.0));
}

#[test]
fn test_canvas_grows_with_padding_and_gutter() {
    let base = DiagramGeometry::resolve(&DiagramConfig::default()).unwrap();
    let wider = DiagramGeometry::resolve(&DiagramConfig {
        padding: 50.0,
        gutter: 100.0,
        ..DiagramConfig::default()
    })
    .unwrap();
    assert_eq!(wider.width - base.width, 28.0);
    assert_eq!(wider.origin, Point::new(150.0, 100.0));
}

#[test]
fn test_zero_header_hides_titles() {
    let g = DiagramGeometry::resolve(&DiagramConfig {
        header_height: 0.0,
        ..DiagramConfig::default()
    })
    .unwrap();
    assert!(g.title_lines.is_none());
    assert_eq!(g.origin.y, 40.0);
}

#[test]
fn test_tall_decision_vector_extends_layout() {
    // More columns than rows: the decision vector is taller than the matrix.
    let g = DiagramGeometry::resolve(&config_with(3, 12, &[0], &[11])).unwrap();
    assert_eq!(g.matrix_bottom, 96.0);
    assert_eq!(g.decision_bottom, 384.0);
    assert!(g.formula_y > g.decision_bottom);
}

#[test]
fn test_invalid_config_fails_before_geometry() {
    let config = config_with(10, 10, &[0, 10], &[1]);
    assert!(DiagramGeometry::resolve(&config).is_err());
}
