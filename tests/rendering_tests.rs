//! Rendering tests
//!
//! Scene composition and the SVG document produced from it.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use bridgeview::render::{render_svg, Primitive, RenderBackend, SvgRenderer, TextAnchor};
use bridgeview::{Diagram, DiagramConfig};
use common::{config_with, count, default_svg, diagram};

const HIT_CELL: &str = r##"fill="#F59E0B" stroke="#FFFFFF""##;
const PARTIAL_CELL: &str = r##"fill="#FFFBEB" stroke="#FFFFFF""##;
const INACTIVE_CELL: &str = r##"fill="#F1F5F9" stroke="#FFFFFF" stroke-width="1" opacity="0.5""##;

#[test]
fn test_document_header() {
    let svg = default_svg();
    assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(svg.contains(r#"width="932" height="618" viewBox="0 0 932 618""#));
    assert!(svg.contains(r#"<g transform="translate(136 90)">"#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_cell_counts_by_tier() {
    let svg = default_svg();
    // 12 matrix hits plus 3 objective and 4 decision entries.
    assert_eq!(count(&svg, HIT_CELL), 19);
    // Active rows outside active columns (3 x 6) plus active columns below them (4 x 7).
    assert_eq!(count(&svg, PARTIAL_CELL), 46);
    // 42 matrix cells plus 7 + 6 vector entries.
    assert_eq!(count(&svg, INACTIVE_CELL), 55);
}

#[test]
fn test_one_connector_per_active_column() {
    let svg = default_svg();
    assert_eq!(count(&svg, r#"<path d="M "#), 5); // bracket + 4 connectors
    assert_eq!(count(&svg, " C "), 4);
    assert!(svg.contains(r#"<path d="M 336 325 C 336 380, 560 176, 595 176""#));
    // Four connectors and the single flow arrow.
    assert_eq!(count(&svg, r##"marker-end="url(#arrow-primary)""##), 5);
    assert_eq!(count(&svg, "<marker "), 1);
}

#[test]
fn test_bracket_and_flow_arrow() {
    let svg = default_svg();
    assert!(svg.contains(r#"<path d="M -10 0 L -20 0 L -20 96 L -10 96" fill="none""#));
    assert!(svg.contains(r#"<line x1="70" y1="48" x2="150" y2="48""#));
    assert_eq!(count(&svg, r#"stroke-dasharray="4,4""#), 2);
}

#[test]
fn test_vector_symbols_only_on_active_entries() {
    let svg = default_svg();
    for i in [1, 2, 3] {
        assert!(svg.contains(&format!(
            r#">f<tspan baseline-shift="sub" font-size="75%">{i}</tspan></text>"#
        )));
    }
    for i in [3, 6, 7, 9] {
        assert!(svg.contains(&format!(
            r#">x<tspan baseline-shift="sub" font-size="75%">{i}</tspan></text>"#
        )));
    }
    assert!(!svg.contains(r#">f<tspan baseline-shift="sub" font-size="75%">4</tspan>"#));
    assert!(!svg.contains(r#">x<tspan baseline-shift="sub" font-size="75%">1</tspan>"#));
}

#[test]
fn test_titles_group_labels_and_footer() {
    let svg = default_svg();
    for title in [
        "Objective Space",
        "(Input)",
        "Inverse Mapping Matrix T",
        "(Bridge)",
        "Decision Space",
        "(Output)",
        "Group O\u{2081}",
        "Group S\u{2081}",
        "Visual Logic:",
    ] {
        assert!(svg.contains(title), "missing {title}");
    }
    assert!(svg.contains(concat!(
        "\u{394}<tspan font-weight=\"bold\">x</tspan>",
        "<tspan baseline-shift=\"sub\" font-size=\"75%\">S\u{2081}</tspan> = ",
        "\u{394}<tspan font-weight=\"bold\">y</tspan>"
    )));
    assert_eq!(count(&svg, "<circle "), 1);
}

#[test]
fn test_label_text_is_escaped() {
    let mut config = DiagramConfig::default();
    config.labels.matrix_title = "T <inverse> & \"bridge\"".to_string();
    let svg = diagram(config).to_svg().unwrap();
    assert!(svg.contains("T &lt;inverse&gt; &amp; &quot;bridge&quot;"));
    assert!(!svg.contains("<inverse>"));
}

#[test]
fn test_label_underscores_are_literal() {
    let mut config = DiagramConfig::default();
    config.labels.matrix_title = "T_inverse matrix".to_string();
    config.labels.row_group = "group_a".to_string();
    let svg = diagram(config).to_svg().unwrap();
    assert!(svg.contains(">T_inverse matrix</text>"));
    assert!(svg.contains(">group_a</text>"));
}

#[test]
fn test_formula_escapes_markup() {
    let mut config = DiagramConfig::default();
    config.labels.formula = r"y = a\_b \* 2".to_string();
    let svg = diagram(config).to_svg().unwrap();
    assert!(svg.contains(">y = a_b * 2</text>"));
}

#[test]
fn test_no_active_sets_draws_no_overlay() {
    let svg = diagram(config_with(4, 4, &[], &[])).to_svg().unwrap();
    assert!(!svg.contains("<defs>"));
    assert!(!svg.contains("<line "));
    assert!(!svg.contains("Group O"));
    assert!(!svg.contains("Group S"));
    assert_eq!(count(&svg, INACTIVE_CELL), 16 + 4 + 4);
}

#[test]
fn test_empty_legend_hides_dot() {
    let mut config = DiagramConfig::default();
    config.labels.legend = String::new();
    let svg = diagram(config).to_svg().unwrap();
    assert!(!svg.contains("<circle "));
}

#[test]
fn test_scene_paint_order() {
    let d = Diagram::with_defaults().unwrap();
    let scene = d.scene().unwrap();

    let first_rect = scene
        .primitives
        .iter()
        .position(|p| matches!(p, Primitive::Rect { .. }))
        .unwrap();
    let first_curve = scene
        .primitives
        .iter()
        .position(|p| matches!(p, Primitive::Curve { .. }))
        .unwrap();
    // Connectors are drawn over the blocks.
    assert!(first_curve > first_rect);
    assert_eq!(scene.curves().count(), 4);

    let titles: Vec<_> = scene
        .texts()
        .filter(|t| t.anchor == TextAnchor::Middle && t.position.y < 0.0)
        .map(|t| t.plain_text())
        .collect();
    assert_eq!(titles.len(), 6);
    assert_eq!(titles[0], "Objective Space");
}

#[test]
fn test_svg_renderer_resize_sets_display_size() {
    let scene = Diagram::with_defaults().unwrap().scene().unwrap();
    let mut renderer = SvgRenderer::new();
    renderer.init().unwrap();
    renderer.resize(466, 309, 2.0);
    renderer.render(&scene).unwrap();

    assert_eq!(renderer.width(), 466);
    assert!(renderer
        .output()
        .contains(r#"width="466" height="309" viewBox="0 0 932 618""#));
    // Natural size when rendered through the helper.
    assert!(render_svg(&scene).unwrap().contains(r#"width="932""#));
}

#[test]
fn test_render_is_deterministic() {
    assert_eq!(default_svg(), default_svg());
}
