//! Twin Model Files
//!
//! This crate stores uploaded 3D model files and serves them back, confined to a single
//! flat upload folder.
//!
//! ## Design Principles
//!
//! - The directory listing is the source of truth: no index file, no metadata sidecar
//! - Stored files are never overwritten: every stored name carries a random token
//! - Stored files are immutable once written
//! - A partially written upload is never visible under a listable name
//! - Untrusted names are sanitised before they touch the filesystem, on the way in *and*
//!   on the way out
//!
//! ## Storage Layout
//!
//! ```text
//! <upload_folder>/
//! ├── arm__d41d8cd98f00b204e9800998ecf8427e.gltf
//! ├── arm__0cc175b9c0f1b6a831c399e269772661.gltf
//! └── rover__92eb5ffee6ae2fec3ad71c777531578f.urdf
//! ```
//!
//! Stored names have the shape `<stem>__<token><extension>`. Users see `<stem><extension>`.
//!
//! ## Example Usage
//!
//! ```no_run
//! use twin_files::{IncomingModel, ModelStore, StorageConfig};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ModelStore::new(StorageConfig::new(Some(PathBuf::from("models"))));
//! let stored = store.ingest(Some(IncomingModel::new("arm.gltf", &b"{}"[..])))?;
//! for entry in store.list()? {
//!     println!("{} ({})", entry.display_name, entry.stored_name);
//! }
//! let served = store.serve(stored.stored_name())?;
//! assert_eq!(served.bytes, b"{}");
//! # Ok(())
//! # }
//! ```

mod constants;
mod folder;
mod naming;
mod sanitize;
mod store;

pub use constants::{
    ALLOWED_MODEL_EXTENSIONS, DEFAULT_UPLOAD_FOLDER_NAME, NAME_SEPARATOR, STAGING_PREFIX,
    STAGING_SUFFIX,
};
pub use folder::{default_upload_folder, resolve_upload_folder, StorageConfig};
pub use naming::{display_name_from_stored, unique_stored_name, unique_stored_name_with};
pub use sanitize::{extension_of, sanitize_filename, split_extension};
pub use store::{content_type_for, DisplayEntry, IncomingModel, ModelStore, ServedModel, StoredModel};
pub use twin_types::PathSegment;
pub use twin_uuid::UniqueToken;

/// Errors that can occur during model file operations
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// The request carried no file part
    #[error("No file part 'model' in request")]
    MissingFile,

    /// The file part had an empty filename
    #[error("No selected file")]
    EmptyFilename,

    /// The claimed filename's extension is not in the allow-list
    #[error("Unsupported file type. Allowed: {}", allowed.join(", "))]
    UnsupportedExtension {
        /// The accepted extensions, sorted
        allowed: Vec<String>,
    },

    /// Sanitising the filename left nothing usable
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    /// The upload folder cannot be created or accessed
    #[error("Model storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The requested model does not exist inside the upload folder
    #[error("Not Found")]
    NotFound,

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for model file operations.
pub type FilesResult<T> = Result<T, FilesError>;
