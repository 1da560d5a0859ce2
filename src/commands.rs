//! Bodies of the `signup` subcommands, kept apart from argument parsing.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use signature::blank::{self, SignatureCheck};
use signature::consts::DOWNLOAD_FILENAME;
use signature::export::png_data_uri;
use signature::{DownloadSink, EncodedImage, SignaturePad, SignatureError};
use tracing::info;

use crate::config::{ConfigError, SignupConfig};
use crate::form::{FormError, RegistrationForm, RegistrationPayload};
use crate::replay::StrokeFile;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("signature: {0}")]
    Signature(#[from] SignatureError),
    #[error("form invalid: {0}")]
    Form(#[from] FormError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{} is blank", .0.display())]
    BlankSignature(PathBuf),
    #[error("{} is not a usable signature: {reason}", .path.display())]
    InvalidSignature { path: PathBuf, reason: String },
}

/// Writes the PNG to a fixed path regardless of the suggested filename.
pub struct FileSink(pub PathBuf);

impl DownloadSink for FileSink {
    fn download(&mut self, _filename: &str, image: &EncodedImage) -> Result<(), SignatureError> {
        fs::write(&self.0, image.bytes())?;
        info!(path = %self.0.display(), "signature written");
        Ok(())
    }
}

/// What a render produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub strokes: usize,
    pub blank: bool,
}

/// Replay `file` through a pad and hand the PNG to `sink`.
///
/// # Errors
///
/// Returns surface, encode or sink failures.
pub fn render<S: DownloadSink>(config: &SignupConfig, file: StrokeFile, sink: S) -> Result<RenderSummary, CliError> {
    let mut pad = SignaturePad::new(config.pad_config(), sink)?;
    for event in file.into_events() {
        pad.handle(event);
    }
    pad.download()?;
    let core = pad.core();
    let summary = RenderSummary { strokes: core.strokes().len(), blank: core.is_blank() };
    info!(strokes = summary.strokes, blank = summary.blank, filename = DOWNLOAD_FILENAME, "render complete");
    Ok(summary)
}

/// Succeeds only for a PNG that carries ink.
///
/// # Errors
///
/// [`CliError::BlankSignature`] for a blank image, [`CliError::InvalidSignature`]
/// for one that does not decode, [`CliError::Io`] when unreadable.
pub fn check(config: &SignupConfig, image: &Path) -> Result<(), CliError> {
    let bytes = fs::read(image)?;
    match blank::check(&bytes, &config.pad_config().blank_policy()) {
        SignatureCheck::Signed => {
            info!(path = %image.display(), "signature present");
            Ok(())
        }
        SignatureCheck::Blank => Err(CliError::BlankSignature(image.to_path_buf())),
        SignatureCheck::Invalid(reason) => Err(CliError::InvalidSignature { path: image.to_path_buf(), reason }),
    }
}

/// Load a registration form, optionally embed a PNG as its signature, and
/// validate it into a payload.
///
/// # Errors
///
/// Returns IO, JSON or validation failures.
pub fn payload(config: &SignupConfig, form: &Path, signature: Option<&Path>) -> Result<RegistrationPayload, CliError> {
    let mut registration: RegistrationForm = serde_json::from_str(&fs::read_to_string(form)?)?;
    if let Some(path) = signature {
        registration.personal.signature = png_data_uri(&STANDARD.encode(fs::read(path)?));
    }
    let payload = registration.submit(&config.pad_config().blank_policy())?;
    info!(username = %payload.username, "registration payload built");
    Ok(payload)
}
