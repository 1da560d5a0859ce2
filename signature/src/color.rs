//! RGBA colour values used for ink and background.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a colour string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour '{0}' (expected #RGB, #RRGGBB, #RRGGBBAA or a named colour)")]
pub struct ColorParseError(pub String);

/// A straight-alpha 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// Opaque colour from RGB channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Whether the RGB channels match, ignoring alpha.
    #[must_use]
    pub fn same_rgb(self, other: Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Whether the colour is fully transparent.
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    /// Parse `#RGB`, `#RRGGBB`, `#RRGGBBAA`, or one of `white`, `black`,
    /// `transparent`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let invalid = || ColorParseError(raw.to_string());

        match trimmed.to_ascii_lowercase().as_str() {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            "transparent" => return Ok(Self::TRANSPARENT),
            _ => {}
        }

        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match hex.len() {
            3 => {
                let r = hex_byte(&hex[0..1].repeat(2)).map_err(|_| invalid())?;
                let g = hex_byte(&hex[1..2].repeat(2)).map_err(|_| invalid())?;
                let b = hex_byte(&hex[2..3].repeat(2)).map_err(|_| invalid())?;
                Ok(Self::rgb(r, g, b))
            }
            6 | 8 => {
                let r = hex_byte(&hex[0..2]).map_err(|_| invalid())?;
                let g = hex_byte(&hex[2..4]).map_err(|_| invalid())?;
                let b = hex_byte(&hex[4..6]).map_err(|_| invalid())?;
                let a = if hex.len() == 8 { hex_byte(&hex[6..8]).map_err(|_| invalid())? } else { 255 };
                Ok(Self { r, g, b, a })
            }
            _ => Err(invalid()),
        }
    }
}

/// `pair` is already known to be ASCII hex digits.
fn hex_byte(pair: &str) -> Result<u8, std::num::ParseIntError> {
    u8::from_str_radix(pair, 16)
}
