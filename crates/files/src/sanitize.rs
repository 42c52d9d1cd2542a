//! Filename sanitising and extension helpers.
//!
//! Client-supplied filenames are untrusted. [`sanitize_filename`] reduces them to a single
//! ASCII path segment built from `[A-Za-z0-9_.-]`, in the same spirit as Werkzeug's
//! `secure_filename`:
//!
//! 1. non-ASCII characters are dropped
//! 2. `/` and `\` become whitespace, and whitespace runs become a single `_`
//! 3. anything outside `[A-Za-z0-9_.-]` is dropped
//! 4. leading/trailing `.` and `_` are trimmed
//! 5. trailing `_` is trimmed from the stem, so the stem can never end in the first half of
//!    a `__` separator
//!
//! ```text
//! "../../etc/passwd"   -> "etc_passwd"
//! "my robot arm.GLTF"  -> "my_robot_arm.GLTF"
//! "C:\\models\\a.stl"  -> "C_models_a.stl"
//! "arm_.gltf"          -> "arm.gltf"
//! "..."                -> rejected
//! ```

use twin_types::PathSegment;

/// Sanitises an untrusted filename into a single safe path segment.
///
/// Returns `None` when nothing usable remains; callers must treat that as an error rather
/// than substituting a name.
pub fn sanitize_filename(raw: &str) -> Option<PathSegment> {
    let spaced: String = raw
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    let (stem, extension) = split_extension(trimmed);
    let stem = stem.trim_end_matches('_');
    PathSegment::new(format!("{stem}{extension}")).ok()
}

/// Splits a single filename into `(stem, extension)`.
///
/// The extension runs from the last `.` to the end and keeps the dot. A leading dot or a
/// trailing dot does not start an extension:
///
/// ```
/// use twin_files::split_extension;
///
/// assert_eq!(split_extension("arm.gltf"), ("arm", ".gltf"));
/// assert_eq!(split_extension("arm.tar.gz"), ("arm.tar", ".gz"));
/// assert_eq!(split_extension(".hidden"), (".hidden", ""));
/// assert_eq!(split_extension("arm."), ("arm.", ""));
/// ```
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 && i < name.len() - 1 => name.split_at(i),
        _ => (name, ""),
    }
}

/// Returns the lower-cased extension of the last component of `name`.
///
/// Both `/` and `\` count as component separators so client paths from any OS behave
/// the same.
pub fn extension_of(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or(name);
    split_extension(last).1.to_ascii_lowercase()
}
