//! # Error Hierarchy
//!
//! Structured error types for the domain core, built with `thiserror`.
//! Field-level validation errors carry the offending field so the API
//! layer can return a field → message mapping to the client.

use thiserror::Error;

/// The registration form field an error refers to.
///
/// Serialized names match the wire contract of the registration endpoint
/// (`icNumber`, `fullName`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The raw identity-card number.
    IcNumber,
    /// The registrant's full name.
    FullName,
}

impl Field {
    /// Wire-format name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IcNumber => "icNumber",
            Self::FullName => "fullName",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field validation failure with a human-readable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// The field that failed validation.
    pub field: Field,
    /// Human-readable, user-facing message.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// One or more field validation failures, collected across the whole form.
///
/// Validation does not stop at the first failure — the client gets every
/// field error in one response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Iterate over the individual field errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
            first = false;
        }
        Ok(())
    }
}

/// The OCR field extractor could not produce a confident result.
///
/// Non-fatal by design: callers route this to a manual-entry fallback,
/// never to a hard failure. Partial matches are discarded rather than
/// surfaced — a half-populated guess is worse than asking the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// No 12-digit identity number (plain or hyphenated) anywhere in the text.
    #[error("no identity number found in recognized text")]
    NoIcNumber,
    /// An identity number matched but no name pattern did.
    #[error("no name found in recognized text")]
    NoName,
}
