//! Editable form state shared between the window and the generate action

use std::path::Path;

/// The three user-editable fields of the main window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// URL or text to encode
    pub text: String,
    /// Desired file name, extension optional
    pub file_name: String,
    /// Destination folder
    pub folder: String,
}

impl FormState {
    /// Empty form with the folder field seeded from `default_folder`.
    pub fn new(default_folder: &Path) -> Self {
        Self {
            folder: default_folder.display().to_string(),
            ..Self::default()
        }
    }
}
