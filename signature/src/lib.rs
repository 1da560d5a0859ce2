//! Free-hand signature capture, rasterization and blank detection.
//!
//! The crate owns everything between raw pointer input and an encoded PNG:
//! recording pen strokes, drawing them onto a fixed-size pixel surface,
//! exporting the composited result, and deciding whether an exported image
//! actually carries any ink. Hosts (a signup form, a standalone drawing page)
//! only wire pointer events in and consume the [`engine::Action`]s and images
//! that come out.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Widget core, host callbacks and download sinks |
//! | [`stroke`] | Points, strokes and the append-only stroke collection |
//! | [`input`] | Pointer events and the drawing state machine |
//! | [`render`] | Raster surface: incremental drawing, full redraw, dots |
//! | [`export`] | PNG encoding and data URI helpers |
//! | [`blank`] | Two-phase decode-then-scan blank detection |
//! | [`color`] | RGBA colour values and parsing |
//! | [`error`] | Error types shared across the crate |
//! | [`consts`] | Default dimensions, line width and file names |
//! | `web` | Browser binding (feature `web`) |

pub mod blank;
pub mod color;
pub mod consts;
pub mod engine;
pub mod error;
pub mod export;
pub mod input;
pub mod render;
pub mod stroke;
#[cfg(feature = "web")]
pub mod web;

pub use blank::{BlankPolicy, DecodedImage, SignatureCheck};
pub use color::Rgba;
pub use engine::{Action, Callbacks, DirectorySink, DownloadSink, PadConfig, SignatureCore, SignatureHost, SignaturePad};
pub use error::{DecodeError, SignatureError};
pub use export::EncodedImage;
pub use input::{InputState, PointerEvent};
pub use render::{InkStyle, Surface};
pub use stroke::{Point, Stroke, StrokeModel};
