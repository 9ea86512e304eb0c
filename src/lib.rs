//! QRSNAP - turn text or a URL into a QR code PNG
//!
//! A single-window desktop utility: type the text, pick a file name and a
//! folder, and save a black-on-white QR code image.
//!
//! # Features
//!
//! - **Safe file names**: reserved characters are stripped and `.png` is enforced
//! - **Best-fit encoding**: medium error correction, smallest symbol that fits
//! - **Overwrite confirmation**: existing files are only replaced on request
//! - **Optional verification**: saved images can be decoded and checked
//!
//! # Example
//!
//! ```no_run
//! use qrsnap::{FormState, Generator, OutputOptions, Outcome};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let generator = Generator::new(OutputOptions::with_default_folder("qr-out"));
//!
//!     let form = FormState {
//!         text: "https://example.com".to_string(),
//!         file_name: "site".to_string(),
//!         folder: String::new(),
//!     };
//!
//!     // Never overwrite from a script
//!     let outcome = generator.generate_and_save(&form, &mut |_: &Path| false)?;
//!     if let Outcome::Saved(path) = outcome {
//!         println!("Saved {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod action;
pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod path;
pub mod qr;
pub mod sanitize;

// Re-exports for convenience
pub use error::{Error, GenerationError, Result};

pub use action::{Generator, Outcome, OverwritePrompt};
pub use app::{Dialogs, NativeDialogs, QrSnapApp};
pub use config::{LogRotation, LoggingOptions, OutputOptions, QrSnapConfig};
pub use form::FormState;
pub use path::{ResolvedTarget, ensure_png_extension, resolve_target};
pub use qr::{QrDecoder, QrEncoder, QrPayload};
pub use sanitize::{FALLBACK_BASE_NAME, sanitize_file_name};
