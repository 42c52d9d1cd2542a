//! Upload folder configuration and resolution.

use crate::sanitize::extension_of;
use crate::{FilesError, ALLOWED_MODEL_EXTENSIONS, DEFAULT_UPLOAD_FOLDER_NAME};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage settings handed to a [`crate::ModelStore`] at construction.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    upload_folder: Option<PathBuf>,
    default_folder: PathBuf,
    allowed_extensions: BTreeSet<String>,
}

impl StorageConfig {
    /// Creates a config with an optional explicit folder and the default allow-list.
    ///
    /// When `upload_folder` is `None`, [`default_upload_folder`] is used.
    pub fn new(upload_folder: Option<PathBuf>) -> Self {
        Self {
            upload_folder,
            default_folder: default_upload_folder(),
            allowed_extensions: ALLOWED_MODEL_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_owned())
                .collect(),
        }
    }

    /// Overrides the fallback folder used when no explicit folder is set.
    pub fn with_default_folder(mut self, default_folder: PathBuf) -> Self {
        self.default_folder = default_folder;
        self
    }

    /// Replaces the allow-list. Extensions are normalised to lower case with a leading dot.
    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().trim().to_ascii_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        self
    }

    /// The folder that will be resolved: the configured one, or the default.
    pub fn effective_folder(&self) -> &Path {
        self.upload_folder
            .as_deref()
            .unwrap_or(self.default_folder.as_path())
    }

    pub fn allowed_extensions(&self) -> &BTreeSet<String> {
        &self.allowed_extensions
    }

    /// The allow-list as a sorted vector, for error messages.
    pub fn allowed_sorted(&self) -> Vec<String> {
        self.allowed_extensions.iter().cloned().collect()
    }

    /// Whether the lower-cased extension of `filename` is on the allow-list.
    pub fn is_allowed(&self, filename: &str) -> bool {
        self.allowed_extensions.contains(&extension_of(filename))
    }
}

/// Fallback upload folder: `models/` next to this crate's manifest.
pub fn default_upload_folder() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_UPLOAD_FOLDER_NAME)
}

/// Resolves the effective upload folder, creating it if missing.
///
/// Only the folder itself is created, never missing parents. The returned path is
/// canonical so it can be compared against canonicalised file paths.
///
/// # Errors
///
/// Returns [`FilesError::StorageUnavailable`] if the folder cannot be created, is not a
/// directory, or cannot be canonicalised.
pub fn resolve_upload_folder(config: &StorageConfig) -> Result<PathBuf, FilesError> {
    let folder = config.effective_folder();

    match fs::create_dir(folder) {
        Ok(()) => tracing::info!("created upload folder {}", folder.display()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
        Err(e) => {
            return Err(FilesError::StorageUnavailable(format!(
                "cannot create upload folder {}: {}",
                folder.display(),
                e
            )))
        }
    }

    if !folder.is_dir() {
        return Err(FilesError::StorageUnavailable(format!(
            "upload folder path is not a directory: {}",
            folder.display()
        )));
    }

    folder.canonicalize().map_err(|e| {
        FilesError::StorageUnavailable(format!(
            "cannot canonicalize upload folder {}: {}",
            folder.display(),
            e
        ))
    })
}
