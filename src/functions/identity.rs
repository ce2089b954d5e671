//! Username validation.
//!
//! # Rules
//! - 1 to 39 ASCII characters
//! - Letters and digits, case-insensitive
//! - `-` only when immediately followed by a letter or digit
//!   (no leading, trailing, or doubled hyphen)
//!
//! # Design Decisions
//! - Hand-written matcher instead of a regex: the rule needs lookahead
//!   and is a single linear scan
//! - An `Identity` can only be obtained through validation

use std::fmt;
use thiserror::Error;

/// Longest accepted username.
pub const MAX_IDENTITY_LEN: usize = 39;

/// Returned when a candidate username fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid username \"{0}\"")]
pub struct InvalidIdentity(pub String);

/// A validated username.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Validate `raw` and wrap it.
    pub fn parse(raw: &str) -> Result<Self, InvalidIdentity> {
        if is_valid_identity(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidIdentity(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true if `candidate` is an acceptable username.
pub fn is_valid_identity(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_IDENTITY_LEN {
        return false;
    }
    if !bytes[0].is_ascii_alphanumeric() {
        return false;
    }

    bytes.iter().enumerate().all(|(i, b)| match b {
        b if b.is_ascii_alphanumeric() => true,
        b'-' => bytes.get(i + 1).is_some_and(u8::is_ascii_alphanumeric),
        _ => false,
    })
}
