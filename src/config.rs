//! Diagram configuration.
//!
//! Every field has a default taken from the reference diagram, so an empty
//! JSON object is a complete configuration and partial JSON overrides only
//! the fields it names.

use serde::{Deserialize, Serialize};

use crate::error::{Axis, ConfigError, Result};
use crate::render::colors::{palette, parse_color, Rgb};
use crate::render::CssColor;
use crate::types::ActiveSet;

/// Largest `rows * cols` accepted. Each cell becomes one SVG rect, so this
/// also bounds document size; the product fits `usize` on wasm32.
pub const MAX_GRID_CELLS: u64 = 1_000_000;

/// Blend factor used when deriving `primary_light` from `primary`.
const LIGHT_TINT_FACTOR: f64 = 0.92;

/// Complete description of one diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagramConfig {
    /// Matrix rows, one per objective-space entry
    pub rows: u32,
    /// Matrix columns, one per decision-space entry
    pub cols: u32,
    /// Active objective indices (group O1)
    pub active_rows: ActiveSet,
    /// Active decision indices (group S1)
    pub active_cols: ActiveSet,
    /// Edge length of one matrix or vector cell in pixels
    pub cell_size: f64,
    /// Width of the objective and decision vectors
    pub vector_width: f64,
    /// Horizontal gap between the objective vector and the matrix
    pub gap_vector_to_matrix: f64,
    /// Horizontal gap between the matrix and the decision vector
    pub gap_matrix_to_decision: f64,
    /// Outer padding on every side
    pub padding: f64,
    /// Height of the title band above the blocks (may be 0)
    pub header_height: f64,
    /// Horizontal room left and right of the blocks for group labels (may be 0)
    pub gutter: f64,
    pub palette: Palette,
    pub labels: Labels,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            active_rows: ActiveSet::from([0, 1, 2]),
            active_cols: ActiveSet::from([2, 5, 6, 8]),
            cell_size: 32.0,
            vector_width: 60.0,
            gap_vector_to_matrix: 100.0,
            gap_matrix_to_decision: 120.0,
            padding: 40.0,
            header_height: 50.0,
            gutter: 96.0,
            palette: Palette::default(),
            labels: Labels::default(),
        }
    }
}

impl DiagramConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every invariant the generator and geometry rely on.
    ///
    /// Fails on the first problem found: empty or oversized axes, active
    /// indices out of bounds, non-positive sizes, then palette colors.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        check_axes(self.rows, self.cols, &self.active_rows, &self.active_cols)?;

        for (name, value) in [
            ("cellSize", self.cell_size),
            ("vectorWidth", self.vector_width),
            ("gapVectorToMatrix", self.gap_vector_to_matrix),
            ("gapMatrixToDecision", self.gap_matrix_to_decision),
            ("padding", self.padding),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveSize { name, value });
            }
        }

        for (name, value) in [("headerHeight", self.header_height), ("gutter", self.gutter)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NegativeSize { name, value });
            }
        }

        self.palette.validate()
    }
}

/// Validate grid dimensions and both active sets.
pub(crate) fn check_axes(
    rows: u32,
    cols: u32,
    active_rows: &ActiveSet,
    active_cols: &ActiveSet,
) -> std::result::Result<(), ConfigError> {
    if rows == 0 {
        return Err(ConfigError::EmptyAxis { axis: Axis::Row });
    }
    if cols == 0 {
        return Err(ConfigError::EmptyAxis { axis: Axis::Column });
    }
    if u64::from(rows) * u64::from(cols) > MAX_GRID_CELLS {
        return Err(ConfigError::GridTooLarge {
            rows,
            cols,
            max: MAX_GRID_CELLS,
        });
    }
    active_rows.check_bounds(Axis::Row, rows)?;
    active_cols.check_bounds(Axis::Column, cols)
}

/// Diagram colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    pub primary: CssColor,
    pub primary_light: CssColor,
    pub inactive_fill: CssColor,
    pub inactive_edge: CssColor,
    pub text_main: CssColor,
    pub white: CssColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: palette::PRIMARY.to_string(),
            primary_light: palette::PRIMARY_LIGHT.to_string(),
            inactive_fill: palette::INACTIVE_FILL.to_string(),
            inactive_edge: palette::INACTIVE_EDGE.to_string(),
            text_main: palette::TEXT_MAIN.to_string(),
            white: palette::WHITE.to_string(),
        }
    }
}

impl Palette {
    /// Default palette with a different accent. The light tint is derived
    /// from the accent. Returns None if `primary` is not a hex color.
    pub fn from_primary(primary: &str) -> Option<Self> {
        let rgb = Rgb::from_hex(primary)?;
        Some(Self {
            primary: rgb.to_hex(),
            primary_light: rgb.lighten(LIGHT_TINT_FACTOR).to_hex(),
            ..Self::default()
        })
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (name, value) in [
            ("primary", &self.primary),
            ("primaryLight", &self.primary_light),
            ("inactiveFill", &self.inactive_fill),
            ("inactiveEdge", &self.inactive_edge),
            ("textMain", &self.text_main),
            ("white", &self.white),
        ] {
            if parse_color(value).is_none() {
                return Err(ConfigError::InvalidColor {
                    name,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Text drawn on the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    pub objective_title: String,
    pub objective_caption: String,
    pub matrix_title: String,
    pub matrix_caption: String,
    pub decision_title: String,
    pub decision_caption: String,
    /// Symbol for active objective cells, drawn as `f` with subscript `i+1`
    pub row_symbol: String,
    /// Symbol for active decision cells, drawn as `x` with subscript `i+1`
    pub column_symbol: String,
    pub row_group: String,
    pub column_group: String,
    /// Formula line. `_` subscripts the next word, `*` toggles bold and
    /// `\` escapes either; other labels are drawn verbatim
    pub formula: String,
    /// Legend caption under the formula; empty hides the legend
    pub legend: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            objective_title: "Objective Space".to_string(),
            objective_caption: "(Input)".to_string(),
            matrix_title: "Inverse Mapping Matrix T".to_string(),
            matrix_caption: "(Bridge)".to_string(),
            decision_title: "Decision Space".to_string(),
            decision_caption: "(Output)".to_string(),
            row_symbol: "f".to_string(),
            column_symbol: "x".to_string(),
            row_group: "Group O\u{2081}".to_string(),
            column_group: "Group S\u{2081}".to_string(),
            formula: "\u{394}*x*_S\u{2081} = \u{394}*y*_O\u{2081} \u{b7} *T*(O\u{2081}, S\u{2081})"
                .to_string(),
            legend: "Visual Logic: The activation (Gold Color) flows from the objective \
                     group to the coupled decision variables."
                .to_string(),
        }
    }
}
