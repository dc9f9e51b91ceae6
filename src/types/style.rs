use serde::Serialize;

use crate::render::CssColor;

/// Visual class of a matrix or vector cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CellClass {
    /// Row and column both active; the grid value is set.
    Hit,
    /// Row or column active, but the cell is not an intersection.
    Partial,
    /// Neither index participates.
    Inactive,
}

/// Resolved fill, border and opacity for one cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    pub class: CellClass,
    pub fill: CssColor,
    pub border: CssColor,
    pub opacity: f64,
}
