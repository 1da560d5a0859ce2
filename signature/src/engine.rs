//! The signature capture widget: pointer input in, pixels and PNGs out.
//!
//! [`SignatureCore`] holds the stroke model, the raster surface and the
//! drawing state machine. It has no notion of who is listening; handlers
//! return [`Action`]s so a UI layer knows when to repaint.
//!
//! [`SignaturePad`] pairs a core with its host. The same core serves both
//! integrations: an embedded pad hands saved images to a [`SignatureHost`]
//! (`on_save` then `on_close`), a standalone pad writes `drawing.png` through a
//! [`DownloadSink`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::blank::{BlankPolicy, DecodedImage};
use crate::color::Rgba;
use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, DOWNLOAD_FILENAME};
use crate::error::SignatureError;
use crate::export::EncodedImage;
use crate::input::{InputState, PointerEvent};
use crate::render::{InkStyle, Surface};
use crate::stroke::{Point, Stroke, StrokeModel};

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Surface pixels changed; repaint.
    RenderNeeded,
    /// An image was handed to the host's `on_save`.
    Saved,
    /// An image was written through the download sink.
    Downloaded { filename: String },
    /// The host was asked to dismiss the widget.
    Closed,
}

/// Widget configuration supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadConfig {
    pub width: u32,
    pub height: u32,
    pub background: Rgba,
    pub ink: InkStyle,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT, background: Rgba::WHITE, ink: InkStyle::default() }
    }
}

impl PadConfig {
    /// Blank detection policy matching this pad's background.
    #[must_use]
    pub fn blank_policy(&self) -> BlankPolicy {
        BlankPolicy::with_background(self.background)
    }
}

/// Core widget state: everything that does not depend on a host.
#[derive(Debug, Clone)]
pub struct SignatureCore {
    model: StrokeModel,
    surface: Surface,
    input: InputState,
    config: PadConfig,
}

impl SignatureCore {
    /// Build a widget with an empty stroke collection and a background-filled
    /// surface.
    ///
    /// # Errors
    ///
    /// Fails fast when the surface cannot be allocated or the ink style is
    /// invalid; no partially built widget is returned.
    pub fn new(config: PadConfig) -> Result<Self, SignatureError> {
        let surface = Surface::new(config.width, config.height, config.background, config.ink)?;
        debug!(width = config.width, height = config.height, "signature surface ready");
        Ok(Self { model: StrokeModel::new(), surface, input: InputState::Idle, config })
    }

    // --- Input events ---

    /// Dispatch a pointer event to the matching handler.
    pub fn handle(&mut self, event: PointerEvent) -> Vec<Action> {
        let point = event.point();
        match event {
            PointerEvent::Down { .. } => self.on_pointer_down(point),
            PointerEvent::Move { .. } => self.on_pointer_move(point),
            PointerEvent::Up { .. } => self.on_pointer_up(point),
            PointerEvent::Leave { .. } => self.on_pointer_leave(point),
        }
    }

    /// Start a stroke unless one is already being drawn.
    pub fn on_pointer_down(&mut self, point: Point) -> Vec<Action> {
        if self.input.is_drawing() {
            return Vec::new();
        }
        self.model.begin_stroke(point);
        self.input = InputState::Drawing { start: point };
        debug!(x = point.x, y = point.y, stroke = self.model.len(), "stroke started");
        Vec::new()
    }

    /// Extend the active stroke and draw its newest segment.
    pub fn on_pointer_move(&mut self, point: Point) -> Vec<Action> {
        if !self.input.is_drawing() {
            return Vec::new();
        }
        match self.model.append_point(point) {
            Ok(stroke) => {
                if self.surface.render_incremental(stroke) {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            Err(e) => {
                warn!(error = %e, "pointer move while drawing without an open stroke");
                self.input = InputState::Idle;
                Vec::new()
            }
        }
    }

    pub fn on_pointer_up(&mut self, point: Point) -> Vec<Action> {
        self.finish_stroke(point)
    }

    pub fn on_pointer_leave(&mut self, point: Point) -> Vec<Action> {
        self.finish_stroke(point)
    }

    /// Close the active stroke. A stroke that never moved leaves a dot at its
    /// start, wherever the pointer is released, so the live surface matches
    /// what [`Surface::redraw_all`] produces on export.
    fn finish_stroke(&mut self, point: Point) -> Vec<Action> {
        let InputState::Drawing { start } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;

        let mut actions = Vec::new();
        let tapped = self.model.active().is_some_and(Stroke::is_dot);
        if tapped {
            self.surface.draw_dot(start);
            actions.push(Action::RenderNeeded);
        }
        if let Some(stroke) = self.model.end_stroke() {
            debug!(points = stroke.len(), tapped, release_x = point.x, release_y = point.y, "stroke finished");
        }
        actions
    }

    // --- Commands ---

    /// Drop all strokes and repaint the background.
    pub fn reset(&mut self) -> Vec<Action> {
        self.model.reset();
        self.input = InputState::Idle;
        self.surface.clear(self.config.background);
        debug!("signature reset");
        vec![Action::RenderNeeded]
    }

    /// Composite background plus every stroke and encode it as PNG.
    ///
    /// Always succeeds for an empty collection too; whether the result counts
    /// as a signature is for blank detection to decide.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::Encode`] if PNG encoding fails.
    pub fn export(&mut self) -> Result<EncodedImage, SignatureError> {
        self.surface.redraw_all(self.model.strokes(), self.config.background);
        EncodedImage::encode(&self.surface)
    }

    // --- Queries ---

    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        self.model.strokes()
    }

    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[must_use]
    pub fn input(&self) -> InputState {
        self.input
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.input.is_drawing()
    }

    #[must_use]
    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    /// Whether the surface as currently shown carries no ink.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        DecodedImage::from_surface(&self.surface).scan(&self.config.blank_policy())
    }
}

/// Callbacks of a host form embedding the widget.
pub trait SignatureHost {
    /// Receives the final image when the user confirms.
    fn on_save(&mut self, image: EncodedImage);
    /// Asks the host to dismiss the widget.
    fn on_close(&mut self);
}

/// Plain closures as host callbacks.
pub struct Callbacks<S, C> {
    pub on_save: S,
    pub on_close: C,
}

impl<S, C> SignatureHost for Callbacks<S, C>
where
    S: FnMut(EncodedImage),
    C: FnMut(),
{
    fn on_save(&mut self, image: EncodedImage) {
        (self.on_save)(image);
    }

    fn on_close(&mut self) {
        (self.on_close)();
    }
}

/// Destination for standalone downloads.
pub trait DownloadSink {
    /// Store `image` under `filename`.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform refuses the download.
    fn download(&mut self, filename: &str, image: &EncodedImage) -> Result<(), SignatureError>;
}

/// Native download sink writing files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `filename` lands.
    #[must_use]
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl DownloadSink for DirectorySink {
    fn download(&mut self, filename: &str, image: &EncodedImage) -> Result<(), SignatureError> {
        let path = self.path_for(filename);
        std::fs::write(&path, image.bytes())?;
        info!(path = %path.display(), bytes = image.bytes().len(), "signature downloaded");
        Ok(())
    }
}

/// A widget bound to its host.
pub struct SignaturePad<H> {
    core: SignatureCore,
    host: H,
}

impl<H> SignaturePad<H> {
    /// Create a widget reporting to `host`.
    ///
    /// # Errors
    ///
    /// See [`SignatureCore::new`].
    pub fn new(config: PadConfig, host: H) -> Result<Self, SignatureError> {
        Ok(Self { core: SignatureCore::new(config)?, host })
    }

    pub fn handle(&mut self, event: PointerEvent) -> Vec<Action> {
        self.core.handle(event)
    }

    pub fn on_pointer_down(&mut self, point: Point) -> Vec<Action> {
        self.core.on_pointer_down(point)
    }

    pub fn on_pointer_move(&mut self, point: Point) -> Vec<Action> {
        self.core.on_pointer_move(point)
    }

    pub fn on_pointer_up(&mut self, point: Point) -> Vec<Action> {
        self.core.on_pointer_up(point)
    }

    pub fn on_pointer_leave(&mut self, point: Point) -> Vec<Action> {
        self.core.on_pointer_leave(point)
    }

    pub fn reset(&mut self) -> Vec<Action> {
        self.core.reset()
    }

    #[must_use]
    pub fn core(&self) -> &SignatureCore {
        &self.core
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Tear the widget down, returning the host. Strokes are dropped.
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }
}

impl<H: SignatureHost> SignaturePad<H> {
    /// Render, hand the image to `on_save`, then signal `on_close`.
    ///
    /// # Errors
    ///
    /// Returns the export failure; the host is not called in that case.
    pub fn save(&mut self) -> Result<Vec<Action>, SignatureError> {
        let image = self.core.export()?;
        info!(strokes = self.core.strokes().len(), bytes = image.bytes().len(), "signature saved");
        self.host.on_save(image);
        self.host.on_close();
        Ok(vec![Action::Saved, Action::Closed])
    }

    /// Dismiss without saving.
    pub fn close(&mut self) -> Vec<Action> {
        self.host.on_close();
        vec![Action::Closed]
    }
}

impl<H: DownloadSink> SignaturePad<H> {
    /// Render and hand the PNG to the download sink as `drawing.png`.
    ///
    /// # Errors
    ///
    /// Returns export or sink failures.
    pub fn download(&mut self) -> Result<Vec<Action>, SignatureError> {
        let image = self.core.export()?;
        self.host.download(DOWNLOAD_FILENAME, &image)?;
        Ok(vec![Action::Downloaded { filename: DOWNLOAD_FILENAME.to_string() }])
    }
}
