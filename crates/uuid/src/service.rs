//! Implementation of [`UniqueToken`].

use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Length of a canonical token in characters.
pub const TOKEN_LEN: usize = 32;

/// A canonical 128-bit random token (32 lowercase hex characters, no hyphens).
///
/// Once constructed the contained value is guaranteed to be canonical, so it can be
/// embedded in filenames as-is.
///
/// # Construction
/// - [`UniqueToken::new`] generates a fresh random token.
/// - [`UniqueToken::parse`] validates an externally supplied token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UniqueToken(Uuid);

impl Default for UniqueToken {
    fn default() -> Self {
        Self::new()
    }
}

impl UniqueToken {
    /// Generates a new random token.
    ///
    /// Collision probability between any two tokens is negligible (122 random bits).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses a token that must already be in canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not 32 lowercase hex characters.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(UuidError::InvalidInput(format!(
                "token must be 32 lowercase hex characters without hyphens, got: '{}'",
                input
            )));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(e.to_string()))
    }

    /// Returns the underlying `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Returns true if `input` is in canonical token form.
    ///
    /// Purely syntactic: exactly 32 bytes, all in `0-9a-f`.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == TOKEN_LEN
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Display for UniqueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for UniqueToken {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UniqueToken::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UniqueToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UniqueToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UniqueToken::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_generates_canonical_token() {
        let token = UniqueToken::new();
        let canonical = token.to_string();

        assert_eq!(canonical.len(), TOKEN_LEN);
        assert!(UniqueToken::is_canonical(&canonical));
    }

    #[test]
    fn test_parse_valid_canonical_token() {
        let canonical = "d41d8cd98f00b204e9800998ecf8427e";
        let token = UniqueToken::parse(canonical).unwrap();
        assert_eq!(token.to_string(), canonical);
    }

    #[test]
    fn test_parse_rejects_hyphenated() {
        let result = UniqueToken::parse("550e8400-e29b-41d4-a716-446655440000");
        match result {
            Err(UuidError::InvalidInput(msg)) => {
                assert!(msg.contains("32 lowercase hex characters"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_parse_rejects_uppercase() {
        assert!(UniqueToken::parse("D41D8CD98F00B204E9800998ECF8427E").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(UniqueToken::parse("d41d8cd98f00b204").is_err());
        assert!(UniqueToken::parse("d41d8cd98f00b204e9800998ecf8427e00").is_err());
    }

    #[test]
    fn test_is_canonical_invalid() {
        assert!(!UniqueToken::is_canonical(""));
        assert!(!UniqueToken::is_canonical("g41d8cd98f00b204e9800998ecf8427e"));
        assert!(!UniqueToken::is_canonical("d41d8cd98f00b204e9800998ecf8427 "));
    }

    #[test]
    fn test_from_str_round_trip() {
        let token = UniqueToken::new();
        let parsed: UniqueToken = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn test_many_tokens_are_distinct() {
        let tokens: HashSet<String> = (0..10_000).map(|_| UniqueToken::new().to_string()).collect();
        assert_eq!(tokens.len(), 10_000);
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let token = UniqueToken::parse("d41d8cd98f00b204e9800998ecf8427e").unwrap();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, "\"d41d8cd98f00b204e9800998ecf8427e\"");

        let bad: Result<UniqueToken, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
