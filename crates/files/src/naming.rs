//! Stored-name generation and display-name recovery.
//!
//! A sanitised name `arm.gltf` is stored as `arm__<token>.gltf` where `<token>` is a
//! fresh [`UniqueToken`]. The display name is recovered by cutting the stem at the
//! *first* `__`, so an original stem that already contains `__` displays truncated:
//! `my__part.gltf` is stored as `my__part__<token>.gltf` and displays as `my.gltf`.

use crate::sanitize::split_extension;
use crate::{FilesError, NAME_SEPARATOR};
use twin_types::PathSegment;
use twin_uuid::UniqueToken;

/// Builds a unique stored name for a sanitised filename using a fresh random token.
///
/// Returns the stored name together with the token that was embedded in it.
pub fn unique_stored_name(sanitized: &PathSegment) -> Result<(PathSegment, UniqueToken), FilesError> {
    let token = UniqueToken::new();
    let stored = unique_stored_name_with(sanitized, &token)?;
    Ok((stored, token))
}

/// Builds the stored name `stem + "__" + token + extension` for a given token.
///
/// The extension is lower-cased; the stem is kept as-is.
pub fn unique_stored_name_with(
    sanitized: &PathSegment,
    token: &UniqueToken,
) -> Result<PathSegment, FilesError> {
    let (stem, extension) = split_extension(sanitized.as_str());
    let stored = format!(
        "{stem}{NAME_SEPARATOR}{token}{}",
        extension.to_ascii_lowercase()
    );
    PathSegment::new(&stored).map_err(|e| FilesError::InvalidFilename(format!("{stored}: {e}")))
}

/// Derives the user-facing name from a stored name.
///
/// Presentation only: never use the result for filesystem access. Names without a `__`
/// separator (for example files copied into the folder by hand) are returned unchanged.
pub fn display_name_from_stored(stored_name: &str) -> String {
    let (stem, extension) = split_extension(stored_name);
    match stem.split_once(NAME_SEPARATOR) {
        Some((original_stem, _)) => format!("{original_stem}{extension}"),
        None => stored_name.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::sanitize_filename;

    fn token() -> UniqueToken {
        UniqueToken::parse("d41d8cd98f00b204e9800998ecf8427e").unwrap()
    }

    #[test]
    fn stored_name_has_expected_shape() {
        let name = PathSegment::new("arm.gltf").unwrap();
        let stored = unique_stored_name_with(&name, &token()).unwrap();
        assert_eq!(stored.as_str(), "arm__d41d8cd98f00b204e9800998ecf8427e.gltf");
    }

    #[test]
    fn stored_name_lowercases_extension_only() {
        let name = PathSegment::new("Arm.GLB").unwrap();
        let stored = unique_stored_name_with(&name, &token()).unwrap();
        assert_eq!(stored.as_str(), "Arm__d41d8cd98f00b204e9800998ecf8427e.glb");
    }

    #[test]
    fn stored_name_without_extension() {
        let name = PathSegment::new("README").unwrap();
        let stored = unique_stored_name_with(&name, &token()).unwrap();
        assert_eq!(stored.as_str(), "README__d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn fresh_tokens_give_distinct_names() {
        let name = PathSegment::new("arm.gltf").unwrap();
        let (a, token_a) = unique_stored_name(&name).unwrap();
        let (b, token_b) = unique_stored_name(&name).unwrap();
        assert_ne!(a, b);
        assert_ne!(token_a, token_b);
        assert!(a.as_str().contains(&token_a.to_string()));
    }

    #[test]
    fn display_name_round_trips_plain_stems() {
        for original in ["arm.gltf", "rover-2.urdf", "scan_v3.ply", "Gripper.stl"] {
            let sanitized = sanitize_filename(original).unwrap();
            let (stored, _) = unique_stored_name(&sanitized).unwrap();
            let (stem, ext) = split_extension(original);
            let expected = format!("{stem}{}", ext.to_ascii_lowercase());
            assert_eq!(display_name_from_stored(stored.as_str()), expected);
        }
    }

    #[test]
    fn display_name_round_trips_stems_ending_in_underscore() {
        for (original, expected) in [("arm_.gltf", "arm.gltf"), ("a_b_.stl", "a_b.stl")] {
            let sanitized = sanitize_filename(original).unwrap();
            assert!(!sanitized.as_str().contains(NAME_SEPARATOR));

            let (stored, _) = unique_stored_name(&sanitized).unwrap();
            assert_eq!(display_name_from_stored(stored.as_str()), expected);
            assert_eq!(display_name_from_stored(stored.as_str()), sanitized.as_str());
        }
    }

    #[test]
    fn display_name_truncates_at_first_separator() {
        let sanitized = sanitize_filename("my__part.gltf").unwrap();
        let stored = unique_stored_name_with(&sanitized, &token()).unwrap();
        assert_eq!(
            stored.as_str(),
            "my__part__d41d8cd98f00b204e9800998ecf8427e.gltf"
        );
        assert_eq!(display_name_from_stored(stored.as_str()), "my.gltf");
    }

    #[test]
    fn display_name_leaves_foreign_names_alone() {
        assert_eq!(display_name_from_stored("manual_copy.stl"), "manual_copy.stl");
        assert_eq!(display_name_from_stored("noext"), "noext");
    }
}
