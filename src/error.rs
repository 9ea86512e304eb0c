//! Error types for QRSNAP operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using QRSNAP's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for QRSNAP operations
#[derive(Error, Debug)]
pub enum Error {
    /// The text to encode was blank
    #[error("Please enter the URL or text to encode.")]
    EmptyInput,

    /// Destination folder is missing and could not be created
    #[error("Could not create folder {}: {source}", .folder.display())]
    FolderCreation {
        /// Folder that was being created
        folder: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Encoding, rendering or saving the QR image failed
    #[error("Failed to generate QR code: {0}")]
    Generation(#[from] GenerationError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures inside the encode → render → save pipeline
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The data did not fit in any QR version at the chosen ECC level
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// Writing or reading back the PNG failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The saved image did not decode back to the input text
    #[error("Verification failed: {0}")]
    Verify(String),
}

impl Error {
    /// Message suitable for a user-facing error dialog.
    ///
    /// Generation failures only point at the console; the full chain is logged.
    pub fn user_message(&self) -> String {
        match self {
            Error::EmptyInput => self.to_string(),
            Error::FolderCreation { source, .. } => format!("Could not create folder:\n{source}"),
            Error::Generation(_) => {
                "Failed to generate/save QR code. See console for details.".to_string()
            }
            Error::Config(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_message_hides_detail() {
        let err = Error::from(GenerationError::Verify("payload mismatch".into()));
        assert!(err.to_string().contains("payload mismatch"));
        assert!(!err.user_message().contains("payload mismatch"));
        assert!(err.user_message().contains("See console"));
    }

    #[test]
    fn test_image_failure_surfaces_as_generation() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = Error::from(GenerationError::from(image::ImageError::IoError(io)));

        assert!(matches!(err, Error::Generation(GenerationError::Image(_))));
        assert!(err.to_string().contains("disk full"));
        assert!(!err.user_message().contains("disk full"));
    }

    #[test]
    fn test_config_message_is_shown_verbatim() {
        let err = Error::Config("bad level".into());
        assert_eq!(err.user_message(), "Configuration error: bad level");
    }

    #[test]
    fn test_folder_creation_message_includes_cause() {
        let err = Error::FolderCreation {
            folder: PathBuf::from("/nope"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.user_message(), "Could not create folder:\ndenied");
    }
}
