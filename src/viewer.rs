//! `BridgeView` - the WASM-exported Canvas 2D viewer.
//!
//! Owns one [`Diagram`] and a [`CanvasRenderer`]. Loading a configuration
//! resizes the canvas to the diagram; `render` draws only when something
//! changed since the last frame.

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::config::DiagramConfig;
use crate::diagram::Diagram;
use crate::render::{CanvasRenderer, RenderBackend};

#[wasm_bindgen]
pub struct BridgeView {
    renderer: CanvasRenderer,
    diagram: Diagram,
    dpr: f32,
    needs_render: bool,
}

#[wasm_bindgen]
impl BridgeView {
    /// Create a viewer showing the default diagram.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, dpr: f32) -> Result<BridgeView, JsValue> {
        console_error_panic_hook::set_once();

        let mut renderer = CanvasRenderer::new(canvas)?;
        renderer.init()?;
        let diagram = Diagram::with_defaults()?;

        let mut view = Self {
            renderer,
            diagram,
            dpr: dpr.max(0.1),
            needs_render: true,
        };
        view.fit_canvas()?;
        Ok(view)
    }

    /// Replace the diagram with one built from a JSON configuration.
    /// On error the current diagram stays in place.
    #[wasm_bindgen]
    pub fn load_config(&mut self, config_json: &str) -> Result<(), JsValue> {
        self.diagram = Diagram::from_json(config_json)?;
        self.fit_canvas()?;
        self.needs_render = true;
        Ok(())
    }

    /// The active configuration as pretty JSON.
    #[wasm_bindgen]
    pub fn config_json(&self) -> Result<String, JsValue> {
        Ok(self.diagram.config().to_json_pretty()?)
    }

    /// Draw the diagram if anything changed since the last render.
    #[wasm_bindgen]
    pub fn render(&mut self) -> Result<(), JsValue> {
        if !self.needs_render {
            return Ok(());
        }
        let scene = self.diagram.scene()?;
        self.renderer.render(&scene)?;
        self.needs_render = false;
        Ok(())
    }

    /// Resize the canvas buffer; the next `render` redraws.
    #[wasm_bindgen]
    pub fn resize(&mut self, physical_width: u32, physical_height: u32, dpr: f32) {
        self.dpr = dpr.max(0.1);
        self.renderer
            .resize(physical_width.max(1), physical_height.max(1), self.dpr);
        self.renderer.set_canvas_css_size(
            f64::from(physical_width) / f64::from(self.dpr),
            f64::from(physical_height) / f64::from(self.dpr),
        );
        self.needs_render = true;
    }

    /// The current diagram as an SVG document.
    #[wasm_bindgen]
    pub fn svg(&self) -> Result<String, JsValue> {
        Ok(self.diagram.to_svg()?)
    }

    /// Logical width of the diagram in CSS pixels.
    #[wasm_bindgen]
    pub fn width(&self) -> Result<f64, JsValue> {
        Ok(self.diagram.geometry()?.width)
    }

    /// Logical height of the diagram in CSS pixels.
    #[wasm_bindgen]
    pub fn height(&self) -> Result<f64, JsValue> {
        Ok(self.diagram.geometry()?.height)
    }
}

impl BridgeView {
    /// Size the canvas to the diagram at the current pixel ratio.
    fn fit_canvas(&mut self) -> Result<(), JsValue> {
        let geometry = self.diagram.geometry()?;
        let dpr = f64::from(self.dpr);
        self.renderer.resize(
            physical_pixels(geometry.width * dpr),
            physical_pixels(geometry.height * dpr),
            self.dpr,
        );
        self.renderer
            .set_canvas_css_size(geometry.width, geometry.height);
        log::debug!(
            "canvas fitted to {}x{} (dpr {})",
            geometry.width,
            geometry.height,
            self.dpr
        );
        Ok(())
    }

    /// Replace the configuration from Rust without a JSON round trip.
    pub fn set_config(&mut self, config: DiagramConfig) -> Result<(), JsValue> {
        self.diagram = Diagram::new(config)?;
        self.fit_canvas()?;
        self.needs_render = true;
        Ok(())
    }
}

/// Round a logical size up to whole device pixels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn physical_pixels(size: f64) -> u32 {
    size.ceil().clamp(1.0, f64::from(u32::MAX)) as u32
}
