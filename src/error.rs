//! Structured error types for bridgeview.
//!
//! Configuration problems are reported eagerly as [`ConfigError`] before any
//! grid or geometry is computed; everything else is wrapped in
//! [`BridgeviewError`].

use std::fmt;

/// Which axis of the grid an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => f.write_str("row"),
            Self::Column => f.write_str("column"),
        }
    }
}

/// Invalid diagram configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The grid has no rows or no columns.
    #[error("{axis} count must be positive")]
    EmptyAxis { axis: Axis },

    /// An active index lies outside `[0, bound)`.
    #[error("active {axis} index {index} outside [0, {bound})")]
    IndexOutOfRange { axis: Axis, index: u32, bound: u32 },

    /// More matrix cells than a diagram may hold.
    #[error("grid of {rows}x{cols} cells exceeds the limit of {max} cells")]
    GridTooLarge { rows: u32, cols: u32, max: u64 },

    /// A size constant that must be strictly positive is not.
    #[error("size `{name}` must be positive, got {value}")]
    NonPositiveSize { name: &'static str, value: f64 },

    /// A size constant that may be zero is negative (or not finite).
    #[error("size `{name}` must not be negative, got {value}")]
    NegativeSize { name: &'static str, value: f64 },

    /// A palette entry is not a CSS hex color.
    #[error("palette color `{name}` is not a valid color: {value:?}")]
    InvalidColor { name: &'static str, value: String },
}

/// All errors that can occur while configuring or rendering a diagram.
#[derive(Debug, thiserror::Error)]
pub enum BridgeviewError {
    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// Writing into an output buffer failed.
    #[error("Formatting: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors from host APIs.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BridgeviewError>;

impl From<String> for BridgeviewError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for BridgeviewError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<BridgeviewError> for wasm_bindgen::JsValue {
    fn from(e: BridgeviewError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::IndexOutOfRange {
            axis: Axis::Column,
            index: 12,
            bound: 10,
        };
        assert_eq!(err.to_string(), "active column index 12 outside [0, 10)");

        let err = ConfigError::EmptyAxis { axis: Axis::Row };
        assert_eq!(err.to_string(), "row count must be positive");
    }

    #[test]
    fn test_config_error_wraps() {
        let err: BridgeviewError = ConfigError::NonPositiveSize {
            name: "cellSize",
            value: 0.0,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: size `cellSize` must be positive, got 0"
        );
    }
}
