//! Random unique tokens for stored model names.
//!
//! Every stored model file carries a token that makes its name unique within the upload
//! folder without any coordination or filesystem lookup. Tokens are 128-bit random values
//! (UUID v4) rendered in a *canonical* form: **32 lowercase hexadecimal characters** (no
//! hyphens).
//!
//! ## Canonical form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `d41d8cd98f00b204e9800998ecf8427e`
//!
//! This is the same value you would get from `Uuid::new_v4().simple().to_string()`.
//! Non-canonical values (uppercase, hyphenated, wrong length, non-hex) are rejected by
//! [`UniqueToken::parse`].

mod service;

pub use service::{UniqueToken, Uuid, TOKEN_LEN};

/// Error type for token operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for token operations.
pub type UuidResult<T> = Result<T, UuidError>;
