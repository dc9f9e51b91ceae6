//! Rendering engine with pluggable backends.
//!
//! This module provides:
//! - A backend-agnostic scene (display list) built from grid, styles and geometry
//! - An SVG backend (all targets)
//! - A Canvas 2D backend (wasm32 only)
//! - Color parsing utilities

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod colors;
pub mod scene;
pub mod svg;

// Re-export commonly used types
pub use backend::RenderBackend;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use colors::{palette, parse_color, CssColor};
pub use scene::{Font, Primitive, Scene, Stroke, TextAnchor, TextRun, TextSpan};
pub use svg::{render_svg, to_data_uri, SvgRenderer};
