//! # Identity Fingerprint
//!
//! One-way SHA-256 digest of the raw IC number. The fingerprint is the
//! only form in which an identity number is ever stored, and doubles as
//! the duplicate-detection key: equal inputs must produce equal digests.
//!
//! ## Security Invariant
//!
//! The digest is deliberately unsalted. A salt or per-record nonce would
//! break duplicate detection, which requires identical IC numbers to
//! collide. The cost is that a leaked digest table is open to offline
//! dictionary search over the 12-digit input space — a documented risk of
//! this scheme, not an oversight.

use sha2::{Digest, Sha256};

use crate::identity::IcNumber;

/// A 32-byte SHA-256 fingerprint of an IC number.
///
/// Rendered as 64 lowercase hex characters for storage and export.
/// Construct via [`Fingerprint::of`]; parse stored values back with
/// [`Fingerprint::from_hex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Compute the fingerprint of an IC number.
    ///
    /// Deterministic: the same number always yields the same digest.
    pub fn of(ic: &IcNumber) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(ic.as_str().as_bytes());
        Self(hasher.finalize().into())
    }

    /// The raw 32 digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as a 64-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a stored hex fingerprint (64 lowercase or uppercase hex chars).
    pub fn from_hex(hex: &str) -> Result<Self, FingerprintParseError> {
        if hex.len() != 64 {
            return Err(FingerprintParseError::Length { actual: hex.len() });
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks_exact(2).enumerate() {
            let pair = std::str::from_utf8(chunk)
                .map_err(|_| FingerprintParseError::InvalidHex { position: i * 2 })?;
            bytes[i] = u8::from_str_radix(pair, 16)
                .map_err(|_| FingerprintParseError::InvalidHex { position: i * 2 })?;
        }
        Ok(Self(bytes))
    }
}

/// Error parsing a hex-encoded fingerprint read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FingerprintParseError {
    /// Input was not 64 characters.
    #[error("fingerprint must be 64 hex characters, got {actual}")]
    Length { actual: usize },
    /// A non-hex character at the given byte offset.
    #[error("invalid hex character at position {position}")]
    InvalidHex { position: usize },
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl serde::Serialize for Fingerprint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Fingerprint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
