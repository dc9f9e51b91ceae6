//! A validated diagram: configuration plus its grid.
//!
//! The grid is generated once in [`Diagram::new`]; styles, geometry and the
//! scene are derived on demand from the immutable configuration.

use serde::Serialize;

use crate::config::DiagramConfig;
use crate::error::Result;
use crate::layout::DiagramGeometry;
use crate::matrix::{generate, Grid};
use crate::render::scene::Scene;
use crate::render::svg::render_svg;
use crate::styles::{resolve_cell_style, resolve_vector_cell_style};
use crate::types::CellStyle;

#[derive(Debug, Clone)]
pub struct Diagram {
    config: DiagramConfig,
    grid: Grid,
}

/// Grid and geometry together, for JSON output.
#[derive(Debug, Serialize)]
pub struct DiagramSummary<'a> {
    pub grid: &'a Grid,
    pub hits: usize,
    pub geometry: DiagramGeometry,
}

impl Diagram {
    /// Validate `config` and generate its grid.
    pub fn new(config: DiagramConfig) -> Result<Self> {
        config.validate()?;
        let grid = generate(
            config.rows,
            config.cols,
            &config.active_rows,
            &config.active_cols,
        )?;

        if !config.active_rows.is_contiguous() {
            log::warn!(
                "active rows are not contiguous; the group bracket spans rows {:?}..={:?}",
                config.active_rows.first(),
                config.active_rows.last()
            );
        }
        log::debug!(
            "diagram {}x{}: {} hit cells",
            grid.rows(),
            grid.cols(),
            grid.hit_count()
        );

        Ok(Self { config, grid })
    }

    /// The reference diagram.
    pub fn with_defaults() -> Result<Self> {
        Self::new(DiagramConfig::default())
    }

    /// Parse, validate and build from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(DiagramConfig::from_json(json)?)
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Style of matrix cell (row, col), or None outside the grid.
    pub fn cell_style(&self, row: u32, col: u32) -> Option<CellStyle> {
        let value = self.grid.get(row, col)?;
        Some(resolve_cell_style(
            row,
            col,
            value,
            &self.config.active_rows,
            &self.config.active_cols,
            &self.config.palette,
        ))
    }

    /// Style of objective vector entry `index`.
    pub fn row_vector_style(&self, index: u32) -> Option<CellStyle> {
        (index < self.config.rows).then(|| {
            resolve_vector_cell_style(index, &self.config.active_rows, &self.config.palette)
        })
    }

    /// Style of decision vector entry `index`.
    pub fn column_vector_style(&self, index: u32) -> Option<CellStyle> {
        (index < self.config.cols).then(|| {
            resolve_vector_cell_style(index, &self.config.active_cols, &self.config.palette)
        })
    }

    pub fn geometry(&self) -> Result<DiagramGeometry> {
        Ok(DiagramGeometry::resolve(&self.config)?)
    }

    pub fn scene(&self) -> Result<Scene> {
        let geometry = self.geometry()?;
        Ok(Scene::build(&self.config, &self.grid, &geometry))
    }

    /// Standalone SVG document.
    pub fn to_svg(&self) -> Result<String> {
        render_svg(&self.scene()?)
    }

    pub fn summary(&self) -> Result<DiagramSummary<'_>> {
        Ok(DiagramSummary {
            grid: &self.grid,
            hits: self.grid.hit_count(),
            geometry: self.geometry()?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::CellClass;

    #[test]
    fn test_reference_styles() {
        let d = Diagram::with_defaults().unwrap();
        assert_eq!(d.cell_style(1, 5).unwrap().class, CellClass::Hit);
        assert_eq!(d.cell_style(1, 1).unwrap().class, CellClass::Partial);
        assert_eq!(d.cell_style(7, 7).unwrap().class, CellClass::Inactive);
        assert!(d.cell_style(10, 0).is_none());
    }

    #[test]
    fn test_vector_styles_bounds() {
        let d = Diagram::with_defaults().unwrap();
        assert_eq!(d.row_vector_style(2).unwrap().class, CellClass::Hit);
        assert_eq!(d.column_vector_style(3).unwrap().class, CellClass::Inactive);
        assert!(d.row_vector_style(10).is_none());
    }

    #[test]
    fn test_invalid_config_rejected_before_grid() {
        let config = DiagramConfig {
            cell_size: -1.0,
            ..DiagramConfig::default()
        };
        assert!(Diagram::new(config).is_err());
    }
}
