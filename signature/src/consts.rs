//! Shared constants for the signature crate.

// ── Surface ─────────────────────────────────────────────────────

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: u32 = 800;

/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;

// ── Ink ─────────────────────────────────────────────────────────

/// Uniform stroke width in pixels.
pub const DEFAULT_LINE_WIDTH: f32 = 5.0;

// ── Export ──────────────────────────────────────────────────────

/// File name used by standalone downloads.
pub const DOWNLOAD_FILENAME: &str = "drawing.png";

/// MIME type of every exported image.
pub const PNG_MIME: &str = "image/png";

/// Prefix of a base64 PNG data URI, up to and including the comma.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";
