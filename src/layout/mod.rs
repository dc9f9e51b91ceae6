//! Layout engine for the diagram.
//!
//! This module handles:
//! - Cumulative band offsets for the objective vector, matrix and decision vector
//! - The active row group span, its bracket and the flow arrow
//! - Cubic connectors from active matrix columns to decision cells
//! - Title, label and footer anchors and the overall canvas size

mod curves;
mod geometry;

pub use curves::{arrowhead, CubicBezier, Point};
pub use geometry::{Band, CellRect, Connector, DiagramGeometry, GroupSpan, Segment};
