//! PNG export and data URI helpers.
//!
//! An [`EncodedImage`] is a derived artifact: it is produced from the surface
//! at save/download time and never fed back into drawing state. Hosts embed it
//! either as a full `data:image/png;base64,...` URI or, for JSON payloads, as
//! the bare base64 part with the MIME prefix stripped.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::consts::{PNG_DATA_URI_PREFIX, PNG_MIME};
use crate::error::{DecodeError, SignatureError};
use crate::render::Surface;

const DATA_URI_SCHEME: &str = "data:";

/// PNG bytes of a rendered signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl EncodedImage {
    /// Encode the current surface content as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::Encode`] if the PNG encoder fails.
    pub fn encode(surface: &Surface) -> Result<Self, SignatureError> {
        let (width, height) = (surface.width(), surface.height());
        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(&surface.to_rgba8(), width, height, ExtendedColorType::Rgba8)?;
        Ok(Self { png, width, height })
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.png
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        PNG_MIME
    }

    /// Bare base64 of the PNG bytes, as embedded in registration payloads.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.png)
    }

    /// `data:image/png;base64,...` form handed to host callbacks.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("{PNG_DATA_URI_PREFIX}{}", self.to_base64())
    }
}

/// Strip the `data:<mime>;base64,` prefix, returning the payload after the
/// first comma. Input without a comma is returned unchanged.
#[must_use]
pub fn strip_data_uri_prefix(uri: &str) -> &str {
    match uri.split_once(',') {
        Some((_, payload)) => payload,
        None => uri,
    }
}

/// Wrap a bare base64 PNG payload back into a data URI.
#[must_use]
pub fn png_data_uri(base64_payload: &str) -> String {
    format!("{PNG_DATA_URI_PREFIX}{base64_payload}")
}

/// Decode a base64 `data:` URI into raw bytes.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidDataUri`] when the scheme, comma or `;base64`
/// marker is missing and [`DecodeError::Base64`] for a malformed payload.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, DecodeError> {
    let rest = uri
        .trim()
        .strip_prefix(DATA_URI_SCHEME)
        .ok_or(DecodeError::InvalidDataUri("missing 'data:' scheme"))?;
    let (metadata, payload) = rest.split_once(',').ok_or(DecodeError::InvalidDataUri("missing comma"))?;
    let is_base64 = metadata.split(';').skip(1).any(|param| param.trim().eq_ignore_ascii_case("base64"));
    if !is_base64 {
        return Err(DecodeError::InvalidDataUri("payload is not base64"));
    }
    decode_base64(payload)
}

/// Decode a bare base64 payload, tolerating embedded whitespace.
///
/// # Errors
///
/// Returns [`DecodeError::Base64`] for a malformed payload.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}
