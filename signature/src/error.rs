//! Error types for capture, export and decoding.

/// Errors raised by the capture widget and its raster surface.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// The pixel surface could not be allocated (zero or oversized dimensions).
    #[error("raster surface unavailable for {width}x{height}")]
    SurfaceUnavailable { width: u32, height: u32 },
    /// A point was appended while no stroke was open.
    #[error("no stroke is open")]
    NoActiveStroke,
    /// The line width is not a positive finite number.
    #[error("invalid line width: {0}")]
    InvalidLineWidth(f32),
    /// PNG encoding of the surface failed.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    /// Writing a downloaded file failed.
    #[error("download failed: {0}")]
    Io(#[from] std::io::Error),
    /// The platform refused to start a download.
    #[error("download failed: {0}")]
    Download(String),
}

/// Errors raised while turning encoded bytes back into pixels.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input is not a `data:` URI or lacks its payload separator.
    #[error("invalid data URI: {0}")]
    InvalidDataUri(&'static str),
    /// The data URI payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The bytes are not a decodable PNG.
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
    /// Decoded pixel data does not match the declared dimensions.
    #[error("pixel buffer of {len} bytes does not fit {width}x{height}")]
    BufferSize { width: u32, height: u32, len: usize },
}
