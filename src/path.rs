//! Destination path resolution

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

const PNG_EXTENSION: &str = ".png";

/// Final location of the image for one generate request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Folder joined with the file name
    pub path: PathBuf,
}

/// Append `.png` unless the name already ends with it (any letter case).
///
/// Other extensions are kept as part of the base name: `logo.jpg` becomes `logo.jpg.png`.
pub fn ensure_png_extension(name: &str) -> String {
    if name.to_lowercase().ends_with(PNG_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{PNG_EXTENSION}")
    }
}

/// Combine a sanitized base name with the destination folder.
///
/// A blank `folder` falls back to `default_folder`. A missing folder is created
/// with all parents; failing that is reported as [`Error::FolderCreation`].
pub fn resolve_target(name: &str, folder: &str, default_folder: &Path) -> Result<ResolvedTarget> {
    let file_name = ensure_png_extension(name);

    let folder = match folder.trim() {
        "" => default_folder.to_path_buf(),
        trimmed => PathBuf::from(trimmed),
    };

    if !folder.is_dir() {
        tracing::debug!(folder = %folder.display(), "Creating destination folder");
        fs::create_dir_all(&folder).map_err(|source| Error::FolderCreation {
            folder: folder.clone(),
            source,
        })?;
    }

    Ok(ResolvedTarget {
        path: folder.join(file_name),
    })
}
