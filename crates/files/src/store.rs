//! Model store: ingestion, listing and confined serving
//!
//! [`ModelStore`] is the only writer of model files. It is stateless apart from its
//! [`StorageConfig`]: the upload folder is resolved (and created if missing) on every
//! operation rather than cached.
//!
//! # Ingestion
//!
//! ```text
//! claimed name ──► allow-list ──► sanitise ──► <stem>__<token><ext>
//!                                                   │
//! bytes ──► .upload-XXXX.partial (in folder) ──► rename (no clobber)
//! ```
//!
//! The bytes are staged in a hidden file inside the upload folder and only renamed to the
//! final name once fully written, so a listing never observes a truncated model. If the
//! reader fails half way the staging file is dropped and removed.
//!
//! # Serving
//!
//! The requested name is sanitised, joined to the folder and canonicalised. The canonical
//! parent must be exactly the canonical folder. Every failure (traversal, symlink escape,
//! missing file, directory) maps to the same [`FilesError::NotFound`].

use crate::folder::{resolve_upload_folder, StorageConfig};
use crate::naming::{display_name_from_stored, unique_stored_name};
use crate::sanitize::{extension_of, sanitize_filename, split_extension};
use crate::{FilesError, STAGING_PREFIX, STAGING_SUFFIX};
use std::cmp::Ordering;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use twin_types::PathSegment;
use twin_uuid::UniqueToken;

/// An upload as received from a client: the claimed filename plus the byte stream.
#[derive(Debug)]
pub struct IncomingModel<R> {
    /// Filename claimed by the client; `None` when the part carried no filename at all
    pub filename: Option<String>,
    pub reader: R,
}

impl<R: Read> IncomingModel<R> {
    pub fn new(filename: impl Into<String>, reader: R) -> Self {
        Self {
            filename: Some(filename.into()),
            reader,
        }
    }
}

/// A model file written by [`ModelStore::ingest`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StoredModel {
    stored_name: PathSegment,
    stem: String,
    token: UniqueToken,
    extension: String,
    size_bytes: u64,
}

impl StoredModel {
    /// Filename on disk, unique within the upload folder.
    pub fn stored_name(&self) -> &str {
        self.stored_name.as_str()
    }

    /// Sanitised stem the client supplied.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn token(&self) -> &UniqueToken {
        &self.token
    }

    /// Lower-cased extension with its leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Name shown to users.
    pub fn display_name(&self) -> String {
        display_name_from_stored(self.stored_name())
    }
}

/// One row of the model listing. Built fresh for every listing, never cached.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DisplayEntry {
    pub stored_name: String,
    pub display_name: String,
    pub size_bytes: u64,
}

/// The bytes of a served model plus the content type derived from its name.
#[derive(Debug, Clone)]
pub struct ServedModel {
    pub stored_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// File-backed model store scoped to one upload folder.
#[derive(Clone, Debug)]
pub struct ModelStore {
    config: StorageConfig,
}

impl ModelStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Resolves the upload folder for this operation, creating it if needed.
    pub fn folder(&self) -> Result<PathBuf, FilesError> {
        resolve_upload_folder(&self.config)
    }

    /// Stores an uploaded model under a fresh unique name.
    ///
    /// Validation happens before anything touches the disk, so a rejected upload never
    /// leaves a file behind.
    ///
    /// # Errors
    ///
    /// - [`FilesError::MissingFile`] if `incoming` is `None`
    /// - [`FilesError::EmptyFilename`] if the claimed filename is missing or empty
    /// - [`FilesError::UnsupportedExtension`] if the claimed extension is not allowed
    /// - [`FilesError::InvalidFilename`] if sanitising leaves no usable name, or strips
    ///   the allowed extension
    /// - [`FilesError::StorageUnavailable`] if the upload folder cannot be resolved
    /// - [`FilesError::Io`] if reading the stream or writing the file fails
    pub fn ingest<R: Read>(
        &self,
        incoming: Option<IncomingModel<R>>,
    ) -> Result<StoredModel, FilesError> {
        let IncomingModel { filename, mut reader } = incoming.ok_or(FilesError::MissingFile)?;

        let claimed = filename.unwrap_or_default();
        if claimed.is_empty() {
            return Err(FilesError::EmptyFilename);
        }

        if !self.config.is_allowed(&claimed) {
            return Err(FilesError::UnsupportedExtension {
                allowed: self.config.allowed_sorted(),
            });
        }

        let sanitized = sanitize_filename(&claimed)
            .ok_or_else(|| FilesError::InvalidFilename(claimed.clone()))?;
        if !self.config.is_allowed(sanitized.as_str()) {
            return Err(FilesError::InvalidFilename(claimed));
        }

        let (stored_name, token) = unique_stored_name(&sanitized)?;
        let folder = self.folder()?;

        let mut staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(STAGING_SUFFIX)
            .tempfile_in(&folder)?;
        let size_bytes = io::copy(&mut reader, &mut staging)?;
        staging.flush()?;
        staging.as_file().sync_all()?;

        let final_path = folder.join(stored_name.as_str());
        staging
            .persist_noclobber(&final_path)
            .map_err(|e| FilesError::Io(e.error))?;

        tracing::info!(
            stored_name = stored_name.as_str(),
            size_bytes,
            "stored uploaded model"
        );

        let (stem, extension) = split_extension(sanitized.as_str());
        Ok(StoredModel {
            stem: stem.to_owned(),
            extension: extension.to_ascii_lowercase(),
            stored_name,
            token,
            size_bytes,
        })
    }

    /// Lists the models in the upload folder, sorted for display.
    ///
    /// Only direct children that are regular files (not symlinks) with an allowed
    /// extension and a name the sanitiser leaves unchanged are returned, so every listed
    /// entry can be served. Entries that vanish or cannot be inspected mid-scan are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::StorageUnavailable`] if the folder cannot be resolved or read.
    pub fn list(&self) -> Result<Vec<DisplayEntry>, FilesError> {
        let folder = self.folder()?;
        let entries = fs::read_dir(&folder).map_err(|e| {
            FilesError::StorageUnavailable(format!(
                "cannot read upload folder {}: {}",
                folder.display(),
                e
            ))
        })?;

        let mut listed = Vec::new();
        for entry in entries.flatten() {
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    tracing::debug!("skipping {:?}: {}", entry.file_name(), e);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!("skipping non UTF-8 filename in upload folder");
                continue;
            };
            if !self.config.is_allowed(&name) {
                continue;
            }
            if !is_servable_name(&name) {
                tracing::debug!("skipping {name:?}: not reachable through the serving path");
                continue;
            }

            listed.push(DisplayEntry {
                display_name: display_name_from_stored(&name),
                stored_name: name,
                size_bytes: metadata.len(),
            });
        }

        listed.sort_by(compare_entries);
        Ok(listed)
    }

    /// Reads a stored model by name, confined to the upload folder.
    ///
    /// # Errors
    ///
    /// - [`FilesError::NotFound`] if the name escapes the folder, does not exist, or is
    ///   not a regular file
    /// - [`FilesError::StorageUnavailable`] if the folder cannot be resolved
    /// - [`FilesError::Io`] if an existing file cannot be read
    pub fn serve(&self, requested: &str) -> Result<ServedModel, FilesError> {
        let folder = self.folder()?;

        let Some(safe_name) = sanitize_filename(requested) else {
            return Err(FilesError::NotFound);
        };

        let canonical = match folder.join(safe_name.as_str()).canonicalize() {
            Ok(path) => path,
            Err(_) => return Err(FilesError::NotFound),
        };

        if canonical.parent() != Some(folder.as_path()) {
            tracing::warn!(
                requested,
                "rejected model request resolving outside the upload folder"
            );
            return Err(FilesError::NotFound);
        }

        match fs::metadata(&canonical) {
            Ok(metadata) if metadata.is_file() => {}
            _ => return Err(FilesError::NotFound),
        }

        let bytes = fs::read(&canonical).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FilesError::NotFound,
            _ => FilesError::Io(e),
        })?;

        Ok(ServedModel {
            content_type: content_type_for(safe_name.as_str(), &bytes),
            stored_name: safe_name.as_str().to_owned(),
            bytes,
        })
    }
}

/// Whether [`ModelStore::serve`] would look up `name` unchanged.
fn is_servable_name(name: &str) -> bool {
    sanitize_filename(name).is_some_and(|safe| safe.as_str() == name)
}

/// Case-insensitive display name, then stored name, so that ordering is deterministic.
fn compare_entries(a: &DisplayEntry, b: &DisplayEntry) -> Ordering {
    a.display_name
        .to_lowercase()
        .cmp(&b.display_name.to_lowercase())
        .then_with(|| a.stored_name.cmp(&b.stored_name))
}

/// Content type for a served model.
///
/// Decided from the file's own extension first, then from its leading bytes; never from
/// anything the uploader claimed.
pub fn content_type_for(name: &str, bytes: &[u8]) -> &'static str {
    match extension_of(name).as_str() {
        ".gltf" => "model/gltf+json",
        ".glb" => "model/gltf-binary",
        ".stl" => "model/stl",
        ".obj" => "model/obj",
        ".dae" => "model/vnd.collada+xml",
        ".urdf" | ".sdf" => "application/xml",
        _ => infer::get(bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream"),
    }
}
