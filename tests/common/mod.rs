//! Common test utilities and assertion helpers.
//!
//! Builders for configurations and small helpers for inspecting rendered
//! SVG output.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use bridgeview::{ActiveSet, Diagram, DiagramConfig};

/// Default configuration with a different grid and active sets.
#[must_use]
pub fn config_with(rows: u32, cols: u32, active_rows: &[u32], active_cols: &[u32]) -> DiagramConfig {
    DiagramConfig {
        rows,
        cols,
        active_rows: active_rows.iter().copied().collect(),
        active_cols: active_cols.iter().copied().collect(),
        ..DiagramConfig::default()
    }
}

/// Build a diagram, panicking on invalid configuration.
#[must_use]
pub fn diagram(config: DiagramConfig) -> Diagram {
    Diagram::new(config).expect("configuration should be valid")
}

/// SVG for the reference diagram.
#[must_use]
pub fn default_svg() -> String {
    Diagram::with_defaults()
        .and_then(|d| d.to_svg())
        .expect("default diagram should render")
}

/// Number of non-overlapping occurrences of `needle`.
#[must_use]
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Active set from a slice.
#[must_use]
pub fn set(indices: &[u32]) -> ActiveSet {
    indices.iter().copied().collect()
}
