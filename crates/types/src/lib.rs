//! Validated string types shared by the digital twin crates.
//!
//! - [`NonEmptyText`] rejects empty or whitespace-only input.
//! - [`PathSegment`] additionally guarantees the value can be joined onto a directory
//!   without escaping it: no separators, no leading dot, no control characters.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,

    /// The input contained a directory separator
    #[error("Path segment must not contain a directory separator")]
    Separator,

    /// The input started with a dot (`.`, `..`, hidden files)
    #[error("Path segment must not start with '.'")]
    LeadingDot,

    /// The input contained a control character (including NUL)
    #[error("Path segment must not contain control characters")]
    ControlCharacter,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// Returns `Err(TextError::Empty)` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A single filesystem path segment that is safe to join onto a directory.
///
/// Construction does not rewrite the input; it only validates it. Use a sanitizer to
/// turn untrusted names into something that passes these checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathSegment(NonEmptyText);

impl PathSegment {
    /// Validates `input` as a single safe path segment.
    ///
    /// # Errors
    ///
    /// - [`TextError::Empty`] for empty or whitespace-only input
    /// - [`TextError::Separator`] if `/` or `\` appears anywhere
    /// - [`TextError::LeadingDot`] if the segment starts with `.`
    /// - [`TextError::ControlCharacter`] for NUL and other control characters
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let raw = input.as_ref();
        if raw.chars().any(|c| c == '/' || c == '\\') {
            return Err(TextError::Separator);
        }
        if raw.chars().any(char::is_control) {
            return Err(TextError::ControlCharacter);
        }
        let text = NonEmptyText::new(raw)?;
        if text.as_str().starts_with('.') {
            return Err(TextError::LeadingDot);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PathSegment {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<std::path::Path> for PathSegment {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(self.0.as_str())
    }
}

impl serde::Serialize for PathSegment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}
