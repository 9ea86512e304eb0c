//! Encode-and-save action
//!
//! One invocation runs to completion on the caller's thread:
//! validate → resolve path → confirm overwrite → encode → save.

use crate::config::OutputOptions;
use crate::error::{Error, GenerationError, Result};
use crate::form::FormState;
use crate::path::resolve_target;
use crate::qr::{QrDecoder, QrEncoder};
use crate::sanitize::sanitize_file_name;
use std::path::{Path, PathBuf};

/// Asks the user whether an existing file may be replaced
pub trait OverwritePrompt {
    /// Return `true` to overwrite `path`, `false` to abort quietly.
    fn confirm_overwrite(&mut self, path: &Path) -> bool;
}

impl<F> OverwritePrompt for F
where
    F: FnMut(&Path) -> bool,
{
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        self(path)
    }
}

/// How a generate request ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The PNG was written to this path
    Saved(PathBuf),
    /// The target existed and the user chose not to overwrite it
    Declined,
}

/// Generates QR PNGs from form input
pub struct Generator {
    options: OutputOptions,
    encoder: QrEncoder,
    decoder: QrDecoder,
}

impl Generator {
    /// Create a generator writing relative to `options.default_folder`
    pub fn new(options: OutputOptions) -> Self {
        Self {
            options,
            encoder: QrEncoder::new(),
            decoder: QrDecoder::new(),
        }
    }

    /// Output settings this generator was built with
    pub fn options(&self) -> &OutputOptions {
        &self.options
    }

    /// Validate the form, then encode its text and save it as a PNG.
    ///
    /// Generation failures are logged with their full cause before being returned.
    pub fn generate_and_save<P>(&self, form: &FormState, prompt: &mut P) -> Result<Outcome>
    where
        P: OverwritePrompt + ?Sized,
    {
        let text = form.text.trim();
        if text.is_empty() {
            tracing::debug!("Rejected generate request with empty text");
            return Err(Error::EmptyInput);
        }

        let name = sanitize_file_name(&form.file_name);
        let target = resolve_target(&name, &form.folder, &self.options.default_folder)?;
        tracing::debug!(path = %target.path.display(), "Resolved output path");

        if target.path.exists() && !prompt.confirm_overwrite(&target.path) {
            tracing::debug!(path = %target.path.display(), "Overwrite declined");
            return Ok(Outcome::Declined);
        }

        match self.write_image(text, &target.path) {
            Ok(()) => {
                tracing::info!(path = %target.path.display(), bytes = text.len(), "Saved QR code");
                Ok(Outcome::Saved(target.path))
            }
            Err(err) => {
                tracing::error!(
                    path = %target.path.display(),
                    error = %err,
                    cause = ?err,
                    "Failed to generate/save QR code"
                );
                Err(Error::Generation(err))
            }
        }
    }

    fn write_image(&self, text: &str, path: &Path) -> std::result::Result<(), GenerationError> {
        self.encoder.save_png(text, path)?;

        if self.options.verify_after_save {
            let payload = self.decoder.decode_file(path)?;
            if payload.as_str() != Some(text) {
                return Err(GenerationError::Verify(format!(
                    "saved image decodes to {:?}",
                    String::from_utf8_lossy(payload.as_bytes())
                )));
            }
            tracing::debug!(path = %path.display(), "Verified saved QR code");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn generator(dir: &Path) -> Generator {
        Generator::new(OutputOptions::with_default_folder(dir))
    }

    fn form(text: &str, name: &str, folder: &str) -> FormState {
        FormState {
            text: text.to_string(),
            file_name: name.to_string(),
            folder: folder.to_string(),
        }
    }

    fn never_asked(path: &Path) -> bool {
        panic!("unexpected overwrite prompt for {}", path.display())
    }

    #[test]
    fn test_blank_text_is_rejected_without_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not-yet");
        let generator = generator(&missing);

        let err = generator
            .generate_and_save(&form("  \t ", "x", ""), &mut never_asked)
            .unwrap_err();

        assert!(matches!(err, Error::EmptyInput));
        assert!(!missing.exists());
    }

    #[test]
    fn test_saves_into_default_folder() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());

        let outcome = generator
            .generate_and_save(&form("hello", "", ""), &mut never_asked)
            .unwrap();

        let expected = dir.path().join("qrcode.png");
        assert_eq!(outcome, Outcome::Saved(expected.clone()));
        assert!(expected.is_file());
    }

    #[test]
    fn test_declined_overwrite_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("keep.png");
        fs::write(&existing, b"original").unwrap();
        let generator = generator(dir.path());

        let mut asked = Vec::new();
        let mut decline = |path: &Path| {
            asked.push(path.to_path_buf());
            false
        };
        let outcome = generator
            .generate_and_save(&form("new data", "keep", ""), &mut decline)
            .unwrap();

        assert_eq!(outcome, Outcome::Declined);
        assert_eq!(asked, vec![existing.clone()]);
        assert_eq!(fs::read(&existing).unwrap(), b"original");
    }

    #[test]
    fn test_accepted_overwrite_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("swap.png");
        fs::write(&existing, b"original").unwrap();
        let generator = generator(dir.path());

        let outcome = generator
            .generate_and_save(&form("new data", "swap.png", ""), &mut |_: &Path| true)
            .unwrap();

        assert_eq!(outcome, Outcome::Saved(existing.clone()));
        let bytes = fs::read(&existing).unwrap();
        assert_ne!(bytes, b"original");
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_oversized_text_is_generation_error() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());

        let err = generator
            .generate_and_save(&form(&"z".repeat(5000), "big", ""), &mut never_asked)
            .unwrap_err();

        assert!(matches!(err, Error::Generation(GenerationError::Encode(_))));
        assert!(!dir.path().join("big.png").exists());
    }

    #[test]
    fn test_verify_after_save_accepts_good_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = OutputOptions::with_default_folder(dir.path());
        options.verify_after_save = true;
        let generator = Generator::new(options);

        let outcome = generator
            .generate_and_save(&form("  verify me ", "v", ""), &mut never_asked)
            .unwrap();
        assert_eq!(outcome, Outcome::Saved(dir.path().join("v.png")));
    }
}
