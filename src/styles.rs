//! Cell style resolution.
//!
//! Matrix cells fall into three tiers, checked in order:
//!
//! 1. a positive grid value is a hit (accent fill),
//! 2. an active row or an active column makes the cell partial (light tint),
//! 3. anything else is inactive (gray, half opacity).
//!
//! Vector cells only know hit and inactive, since each belongs to a single
//! axis. Borders are white in every tier.

use crate::config::Palette;
use crate::types::{ActiveSet, CellClass, CellStyle};

/// Opacity of inactive cells.
pub const INACTIVE_OPACITY: f64 = 0.5;

/// Classify a matrix cell.
pub fn classify_cell(
    row: u32,
    col: u32,
    value: f64,
    active_rows: &ActiveSet,
    active_cols: &ActiveSet,
) -> CellClass {
    if value > 0.0 {
        CellClass::Hit
    } else if active_rows.contains(row) || active_cols.contains(col) {
        CellClass::Partial
    } else {
        CellClass::Inactive
    }
}

/// Resolve fill, border and opacity for a matrix cell.
pub fn resolve_cell_style(
    row: u32,
    col: u32,
    value: f64,
    active_rows: &ActiveSet,
    active_cols: &ActiveSet,
    palette: &Palette,
) -> CellStyle {
    style_for_class(
        classify_cell(row, col, value, active_rows, active_cols),
        palette,
    )
}

/// Resolve the style of entry `index` in the objective or decision vector.
pub fn resolve_vector_cell_style(index: u32, active: &ActiveSet, palette: &Palette) -> CellStyle {
    let class = if active.contains(index) {
        CellClass::Hit
    } else {
        CellClass::Inactive
    };
    style_for_class(class, palette)
}

fn style_for_class(class: CellClass, palette: &Palette) -> CellStyle {
    let (fill, opacity) = match class {
        CellClass::Hit => (&palette.primary, 1.0),
        CellClass::Partial => (&palette.primary_light, 1.0),
        CellClass::Inactive => (&palette.inactive_fill, INACTIVE_OPACITY),
    };
    CellStyle {
        class,
        fill: fill.clone(),
        border: palette.white.clone(),
        opacity,
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn sets() -> (ActiveSet, ActiveSet) {
        (ActiveSet::from([0, 1, 2]), ActiveSet::from([2, 5, 6, 8]))
    }

    #[test]
    fn test_value_wins_over_membership() {
        // A positive value is a hit even when neither index is active.
        let (rows, cols) = sets();
        assert_eq!(classify_cell(9, 9, 1.0, &rows, &cols), CellClass::Hit);
    }

    #[test]
    fn test_row_only_and_column_only_look_the_same() {
        let (rows, cols) = sets();
        let palette = Palette::default();
        let row_only = resolve_cell_style(1, 1, 0.0, &rows, &cols, &palette);
        let col_only = resolve_cell_style(7, 5, 0.0, &rows, &cols, &palette);
        assert_eq!(row_only, col_only);
        assert_eq!(row_only.class, CellClass::Partial);
    }

    #[test]
    fn test_inactive_style() {
        let (rows, cols) = sets();
        let palette = Palette::default();
        let style = resolve_cell_style(7, 7, 0.0, &rows, &cols, &palette);
        assert_eq!(style.class, CellClass::Inactive);
        assert_eq!(style.fill, palette.inactive_fill);
        assert_eq!(style.opacity, INACTIVE_OPACITY);
        assert_eq!(style.border, palette.white);
    }

    #[test]
    fn test_vector_cells_have_no_partial_tier() {
        let (rows, _) = sets();
        let palette = Palette::default();
        for i in 0..10 {
            let class = resolve_vector_cell_style(i, &rows, &palette).class;
            assert_ne!(class, CellClass::Partial);
            assert_eq!(class == CellClass::Hit, rows.contains(i));
        }
    }
}
