//! Browser binding: drives a [`SignatureCore`] from an `HtmlCanvasElement`.
//!
//! The core draws into its own pixel surface; this module copies that surface
//! into the canvas whenever a handler reports [`Action::RenderNeeded`]. Pointer
//! coordinates are expected as `offsetX`/`offsetY`, i.e. already canvas-local.

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, ImageData};

use crate::color::Rgba;
use crate::consts::DOWNLOAD_FILENAME;
use crate::engine::{Action, DownloadSink, PadConfig, SignatureCore};
use crate::error::SignatureError;
use crate::export::EncodedImage;
use crate::render::InkStyle;
use crate::stroke::Point;

/// Download sink that clicks a temporary `<a download>` element.
pub struct BrowserDownload;

impl DownloadSink for BrowserDownload {
    fn download(&mut self, filename: &str, image: &EncodedImage) -> Result<(), SignatureError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SignatureError::Download("no document available".into()))?;
        let anchor = document
            .create_element("a")
            .map_err(js_download_error)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| SignatureError::Download("created element is not an anchor".into()))?;
        anchor.set_href(&image.to_data_uri());
        anchor.set_download(filename);
        anchor.click();
        Ok(())
    }
}

/// A signature widget bound to a canvas element.
pub struct WebSignaturePad {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    core: SignatureCore,
}

impl WebSignaturePad {
    /// Bind to `canvas`, sized by its `width`/`height` attributes, and paint
    /// the background.
    ///
    /// # Errors
    ///
    /// Fails when the 2D context is unavailable or the surface cannot be built.
    pub fn new(canvas: HtmlCanvasElement, background: Rgba, ink: InkStyle) -> Result<Self, JsValue> {
        let context: js_sys::Object = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?;
        let ctx = context.dyn_into::<CanvasRenderingContext2d>()?;
        let config = PadConfig { width: canvas.width(), height: canvas.height(), background, ink };
        let core = SignatureCore::new(config).map_err(to_js)?;

        let pad = Self { canvas, ctx, core };
        pad.present()?;
        Ok(pad)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, offset_x: f64, offset_y: f64) -> Result<(), JsValue> {
        let actions = self.core.on_pointer_down(Point::new(offset_x, offset_y));
        self.apply(&actions)
    }

    pub fn on_pointer_move(&mut self, offset_x: f64, offset_y: f64) -> Result<(), JsValue> {
        let actions = self.core.on_pointer_move(Point::new(offset_x, offset_y));
        self.apply(&actions)
    }

    pub fn on_pointer_up(&mut self, offset_x: f64, offset_y: f64) -> Result<(), JsValue> {
        let actions = self.core.on_pointer_up(Point::new(offset_x, offset_y));
        self.apply(&actions)
    }

    pub fn on_pointer_leave(&mut self, offset_x: f64, offset_y: f64) -> Result<(), JsValue> {
        let actions = self.core.on_pointer_leave(Point::new(offset_x, offset_y));
        self.apply(&actions)
    }

    // --- Commands ---

    pub fn reset(&mut self) -> Result<(), JsValue> {
        let actions = self.core.reset();
        self.apply(&actions)
    }

    /// Render and return the `data:image/png;base64,...` URI for the host form.
    pub fn save(&mut self) -> Result<String, JsValue> {
        let image = self.core.export().map_err(to_js)?;
        self.present()?;
        Ok(image.to_data_uri())
    }

    /// Render and download as `drawing.png`.
    pub fn download(&mut self) -> Result<(), JsValue> {
        let image = self.core.export().map_err(to_js)?;
        self.present()?;
        BrowserDownload.download(DOWNLOAD_FILENAME, &image).map_err(to_js)
    }

    /// Copy the surface into the canvas.
    pub fn present(&self) -> Result<(), JsValue> {
        let surface = self.core.surface();
        let pixels = surface.to_rgba8();
        let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(&pixels), surface.width(), surface.height())?;
        self.ctx.put_image_data(&image, 0.0, 0.0)
    }

    fn apply(&self, actions: &[Action]) -> Result<(), JsValue> {
        if actions.contains(&Action::RenderNeeded) {
            self.present()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn core(&self) -> &SignatureCore {
        &self.core
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

fn to_js(e: SignatureError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn js_download_error(value: JsValue) -> SignatureError {
    SignatureError::Download(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}
