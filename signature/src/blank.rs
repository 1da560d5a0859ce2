//! Blank detection: decide whether a rendered signature carries any ink.
//!
//! Detection is split in two explicit phases so the suspension point is
//! visible to callers: [`decode`] turns encoded bytes into a [`DecodedImage`]
//! (and may fail), then [`DecodedImage::scan`] walks the pixels. Reading
//! pixels before decode has completed is impossible by construction.
//!
//! A pixel counts as empty when it is fully transparent or when its RGB equals
//! the policy's background colour (alpha ignored). An all-transparent image is
//! blank. Hosts treat decode failures as an invalid signature.

#[cfg(test)]
#[path = "blank_test.rs"]
mod blank_test;

use image::ImageFormat;
use tracing::warn;

use crate::color::Rgba;
use crate::error::DecodeError;
use crate::export;
use crate::render::Surface;

/// What counts as "no ink".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlankPolicy {
    /// Colour the widget fills before drawing.
    pub background: Rgba,
}

impl Default for BlankPolicy {
    fn default() -> Self {
        Self { background: Rgba::WHITE }
    }
}

impl BlankPolicy {
    #[must_use]
    pub fn with_background(background: Rgba) -> Self {
        Self { background }
    }

    /// Whether one straight-alpha RGBA pixel is free of ink.
    #[must_use]
    pub fn is_empty_pixel(&self, px: [u8; 4]) -> bool {
        let [r, g, b, a] = px;
        a == 0 || self.background.same_rgb(Rgba { r, g, b, a })
    }
}

/// Decoded straight-alpha RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Wrap raw RGBA8 pixels.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferSize`] when the buffer length does not
    /// equal `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DecodeError> {
        let expected = u64::from(width) * u64::from(height) * 4;
        if pixels.len() as u64 != expected {
            return Err(DecodeError::BufferSize { width, height, len: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    /// Read the pixels straight off a live surface, skipping the PNG round-trip.
    #[must_use]
    pub fn from_surface(surface: &Surface) -> Self {
        Self { width: surface.width(), height: surface.height(), pixels: surface.to_rgba8() }
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
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// `true` iff every pixel is empty under `policy`. Stops at the first
    /// inked pixel.
    #[must_use]
    pub fn scan(&self, policy: &BlankPolicy) -> bool {
        self.pixels
            .chunks_exact(4)
            .all(|px| policy.is_empty_pixel([px[0], px[1], px[2], px[3]]))
    }

    /// Number of inked pixels under `policy`.
    #[must_use]
    pub fn ink_pixels(&self, policy: &BlankPolicy) -> usize {
        self.pixels
            .chunks_exact(4)
            .filter(|px| !policy.is_empty_pixel([px[0], px[1], px[2], px[3]]))
            .count()
    }
}

/// Phase one: decode PNG bytes.
///
/// # Errors
///
/// Returns [`DecodeError::Image`] for anything that is not a valid PNG.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let rgba = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage { width, height, pixels: rgba.into_raw() })
}

/// Phase one for a `data:image/png;base64,...` URI.
///
/// # Errors
///
/// Returns any data URI, base64 or PNG decode failure.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, DecodeError> {
    decode(&export::decode_data_uri(uri)?)
}

/// Decode then scan in one call.
///
/// # Errors
///
/// Returns the decode failure; no scan happens in that case.
pub fn is_blank(bytes: &[u8], policy: &BlankPolicy) -> Result<bool, DecodeError> {
    Ok(decode(bytes)?.scan(policy))
}

/// Outcome of validating a signature image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureCheck {
    /// At least one inked pixel.
    Signed,
    /// Nothing but background or transparency.
    Blank,
    /// The image could not be decoded.
    Invalid(String),
}

impl SignatureCheck {
    /// Only a signed image is acceptable; blank and invalid both fail.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed)
    }

    fn from_decoded(decoded: Result<DecodedImage, DecodeError>, policy: &BlankPolicy) -> Self {
        match decoded {
            Ok(image) if image.scan(policy) => Self::Blank,
            Ok(_) => Self::Signed,
            Err(e) => {
                warn!(error = %e, "signature image could not be decoded");
                Self::Invalid(e.to_string())
            }
        }
    }
}

/// Validate PNG bytes.
#[must_use]
pub fn check(bytes: &[u8], policy: &BlankPolicy) -> SignatureCheck {
    SignatureCheck::from_decoded(decode(bytes), policy)
}

/// Validate a PNG data URI.
#[must_use]
pub fn check_data_uri(uri: &str, policy: &BlankPolicy) -> SignatureCheck {
    SignatureCheck::from_decoded(decode_data_uri(uri), policy)
}
