//! # Identity Primitives
//!
//! Validated newtypes for the two registration fields. Both types enforce
//! their format invariants in the constructor, so a value in hand is a
//! value that passed validation.

use serde::{Deserialize, Serialize};

use crate::error::{Field, FieldError};

/// A national identity-card number: exactly 12 ASCII decimal digits,
/// no separators.
///
/// The raw number is held only transiently — it is hashed before storage
/// and never persisted or echoed back (see [`crate::fingerprint`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IcNumber(String);

impl IcNumber {
    /// Parse a raw IC number.
    ///
    /// Rejects anything that is not exactly 12 decimal digits: wrong
    /// length, non-digit characters, separators, empty input.
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        if raw.len() != 12 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::new(
                Field::IcNumber,
                "IC Number must be exactly 12 digits",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// The digits as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A registrant's full name: non-empty after trimming, ASCII letters and
/// whitespace only, uppercase-normalized at construction.
///
/// Stored and compared uppercase everywhere, which is why admin search
/// uppercases its term before matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FullName(String);

impl FullName {
    /// Upper bound on the raw input length. Bounds every free-text field
    /// before it reaches storage.
    pub const MAX_LEN: usize = 500;

    /// Parse and normalize a raw name.
    ///
    /// Trims surrounding whitespace, rejects empty results, digits,
    /// punctuation and symbols, then uppercases.
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        if raw.len() > Self::MAX_LEN {
            return Err(FieldError::new(
                Field::FullName,
                format!("Full name must not exceed {} characters", Self::MAX_LEN),
            ));
        }
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::new(Field::FullName, "Full name is required"));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_ascii_whitespace())
        {
            return Err(FieldError::new(
                Field::FullName,
                "Full name must contain only letters and spaces",
            ));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// The normalized (trimmed, uppercased) name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IcNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for FullName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
