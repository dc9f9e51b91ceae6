//! Render backend trait for pluggable rendering implementations.
//!
//! This module defines the `RenderBackend` trait that abstracts rendering
//! of a [`Scene`], allowing the SVG writer and the Canvas 2D backend to be
//! used interchangeably.

use crate::error::Result;
use crate::render::scene::Scene;

/// Trait for render backends
///
/// Implementations handle the actual drawing operations for different
/// output technologies (SVG documents, Canvas 2D, etc.)
pub trait RenderBackend {
    /// Initialize the backend
    fn init(&mut self) -> Result<()>;

    /// Resize the render surface. A zero size means "use the scene's size".
    fn resize(&mut self, width: u32, height: u32, dpr: f32);

    /// Render a complete scene
    fn render(&mut self, scene: &Scene) -> Result<()>;

    /// Get the current width
    fn width(&self) -> u32;

    /// Get the current height
    fn height(&self) -> u32;
}
