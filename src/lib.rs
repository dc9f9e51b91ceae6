//! bridgeview - inverse mapping diagrams for the web and the command line
//!
//! Renders the objective space -> bridge matrix `T` -> decision space diagram:
//! - Binary intersection grid from two active index sets
//! - Hit / partial / inactive cell styling
//! - Group bracket, flow arrow and cubic connectors to the decision vector
//! - SVG output on every target, Canvas 2D in the browser
//!
//! # Usage (Rust)
//!
//! ```no_run
//! let diagram = bridgeview::Diagram::with_defaults()?;
//! let svg = diagram.to_svg()?;
//! # Ok::<(), bridgeview::error::BridgeviewError>(())
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { BridgeView, render_svg } from 'bridgeview';
//! await init();
//! const view = new BridgeView(canvas, devicePixelRatio);
//! view.load_config(JSON.stringify({ activeCols: [1, 4] }));
//! view.render();
//! ```

// Model
pub mod config;
pub mod diagram;
pub mod error;
pub mod matrix;
pub mod styles;
pub mod types;

// Layout and rendering
pub mod layout;
pub mod render;
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::{DiagramConfig, Labels, Palette};
pub use diagram::Diagram;
pub use matrix::{generate, Grid};
pub use types::*;
#[cfg(target_arch = "wasm32")]
pub use viewer::BridgeView;

/// Install the panic hook and the console logger when the module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("bridgeview {} initialized", env!("CARGO_PKG_VERSION"));
    }
}

/// Render a diagram from a JSON configuration to an SVG string
///
/// # Arguments
/// * `config_json` - A (possibly partial) configuration; `"{}"` is the default diagram
///
/// # Errors
/// Returns an error if the JSON is malformed or the configuration is invalid.
#[wasm_bindgen]
pub fn render_svg(config_json: &str) -> Result<String, JsValue> {
    Diagram::from_json(config_json)
        .and_then(|d| d.to_svg())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The default configuration as pretty JSON
///
/// # Errors
/// Returns an error if serialization fails.
#[wasm_bindgen]
pub fn default_config() -> Result<String, JsValue> {
    DiagramConfig::default()
        .to_json_pretty()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Generate the grid for a JSON configuration and return it as a `JsValue`
///
/// The result has the shape `{ rows, cols, values: number[][] }`.
///
/// # Errors
/// Returns an error if the configuration is invalid.
#[wasm_bindgen]
pub fn generate_grid(config_json: &str) -> Result<JsValue, JsValue> {
    let diagram = Diagram::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(diagram.grid())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
