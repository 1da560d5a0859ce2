//! Signup configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use signature::color::Rgba;
use signature::consts::{DEFAULT_HEIGHT, DEFAULT_LINE_WIDTH, DEFAULT_WIDTH};
use signature::{InkStyle, PadConfig};

pub const ENV_CANVAS_WIDTH: &str = "SIGNUP_CANVAS_WIDTH";
pub const ENV_CANVAS_HEIGHT: &str = "SIGNUP_CANVAS_HEIGHT";
pub const ENV_LINE_WIDTH: &str = "SIGNUP_LINE_WIDTH";
pub const ENV_BACKGROUND: &str = "SIGNUP_BACKGROUND";
pub const ENV_INK: &str = "SIGNUP_INK";
pub const ENV_OUTPUT_DIR: &str = "SIGNUP_OUTPUT_DIR";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid { var: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignupConfig {
    pub width: u32,
    pub height: u32,
    pub line_width: f32,
    pub background: Rgba,
    pub ink: Rgba,
    pub output_dir: PathBuf,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            line_width: DEFAULT_LINE_WIDTH,
            background: Rgba::WHITE,
            ink: Rgba::BLACK,
            output_dir: PathBuf::from("."),
        }
    }
}

impl SignupConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `SIGNUP_CANVAS_WIDTH`: default 800
    /// - `SIGNUP_CANVAS_HEIGHT`: default 600
    /// - `SIGNUP_LINE_WIDTH`: default 5
    /// - `SIGNUP_BACKGROUND`: default `#FFFFFF`
    /// - `SIGNUP_INK`: default `#000000`
    /// - `SIGNUP_OUTPUT_DIR`: default `.`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a value that does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            width: parse_var(&lookup, ENV_CANVAS_WIDTH, defaults.width)?,
            height: parse_var(&lookup, ENV_CANVAS_HEIGHT, defaults.height)?,
            line_width: parse_var(&lookup, ENV_LINE_WIDTH, defaults.line_width)?,
            background: parse_var(&lookup, ENV_BACKGROUND, defaults.background)?,
            ink: parse_var(&lookup, ENV_INK, defaults.ink)?,
            output_dir: lookup(ENV_OUTPUT_DIR).map_or(defaults.output_dir, PathBuf::from),
        })
    }

    /// Widget configuration for this signup flow.
    #[must_use]
    pub fn pad_config(&self) -> PadConfig {
        PadConfig {
            width: self.width,
            height: self.height,
            background: self.background,
            ink: InkStyle { line_width: self.line_width, color: self.ink, ..InkStyle::default() },
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::Invalid { var, value: raw.clone(), reason: e.to_string() })
}
