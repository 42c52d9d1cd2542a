/// Default allow-list of model file extensions (lower-case, with the leading dot).
pub const ALLOWED_MODEL_EXTENSIONS: &[&str] = &[
    ".gltf", // GLTF (graphics / robotics)
    ".glb",  // binary GLTF
    ".stl",  // CAD / robotics meshes
    ".obj",  // generic mesh
    ".dae",  // COLLADA (Gazebo)
    ".ply",  // point clouds / meshes
    ".urdf", // robot description
    ".sdf",  // simulation description
];

/// Separator between the original stem and the unique token in stored names.
pub const NAME_SEPARATOR: &str = "__";

/// Folder name used when no upload folder is configured.
pub const DEFAULT_UPLOAD_FOLDER_NAME: &str = "models";

/// Prefix of in-flight upload files inside the upload folder.
///
/// Starts with a dot so it can never be requested through the sanitiser.
pub const STAGING_PREFIX: &str = ".upload-";

/// Suffix of in-flight upload files; never on the allow-list.
pub const STAGING_SUFFIX: &str = ".partial";
