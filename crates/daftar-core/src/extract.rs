//! # OCR Field Extractor
//!
//! Derives structured registration candidates from unstructured text
//! recognized off a photographed identity document. Recognition itself is
//! an external concern — this module only sees the recognized text.
//!
//! ## Extraction rules
//!
//! The IC number matches either the printed `######-##-####` layout or a
//! bare 12-digit run; hyphens are stripped on normalization. The name is
//! found by an ordered rule list evaluated in sequence — first rule that
//! produces a usable candidate wins:
//!
//! 1. a case-insensitive label token (`NAMA`, `NAME`, `NOM`) followed by a
//!    run of uppercase letters and spaces;
//! 2. a standalone line consisting solely of uppercase letters and spaces.
//!
//! Extraction is all-or-nothing: both fields must match or the whole
//! attempt fails and the caller falls back to manual entry.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ExtractionError;
use crate::identity::{FullName, IcNumber};

/// IC number as printed on the card (`990101-14-5678`) or as a bare
/// 12-digit run. Word-bounded so a longer digit run does not match.
static IC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{6}-\d{2}-\d{4}\b|\b\d{12}\b").expect("invalid IC pattern")
});

/// One entry in the ordered name-rule list.
struct NameRule {
    /// Rule name (for debugging).
    #[allow(dead_code)]
    name: &'static str,
    /// Pattern with the candidate name in capture group 1.
    pattern: Regex,
}

/// Name rules in evaluation order. Kept as a list rather than cascading
/// conditionals so adding a document layout means adding an entry.
static NAME_RULES: LazyLock<Vec<NameRule>> = LazyLock::new(|| {
    vec![
        NameRule {
            name: "labeled",
            pattern: Regex::new(r"(?i:nama|name|nom)\s*:?\s*([A-Z][A-Z ]{2,49})")
                .expect("invalid labeled name pattern"),
        },
        NameRule {
            name: "standalone-line",
            pattern: Regex::new(r"(?m)^([A-Z][A-Z ]{2,49})$")
                .expect("invalid standalone name pattern"),
        },
    ]
});

/// Registration candidates extracted from recognized document text.
///
/// Ephemeral — produced per scan to pre-fill the intake form, never
/// persisted. Both fields are already validated domain values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanExtraction {
    /// Normalized 12-digit IC number candidate.
    pub ic_number: IcNumber,
    /// Uppercased name candidate.
    pub full_name: FullName,
}

/// Extract registration candidates from recognized document text.
///
/// Returns [`ExtractionError`] when either field cannot be found; the
/// partial match, if any, is discarded rather than surfaced.
pub fn extract_fields(text: &str) -> Result<ScanExtraction, ExtractionError> {
    let ic_number = extract_ic(text).ok_or(ExtractionError::NoIcNumber)?;
    let full_name = extract_name(text).ok_or(ExtractionError::NoName)?;
    Ok(ScanExtraction {
        ic_number,
        full_name,
    })
}

/// First IC-number match in the text, hyphens stripped.
fn extract_ic(text: &str) -> Option<IcNumber> {
    let matched = IC_PATTERN.find(text)?;
    let digits: String = matched.as_str().chars().filter(|c| *c != '-').collect();
    IcNumber::new(&digits).ok()
}

/// First name rule that yields a usable candidate.
fn extract_name(text: &str) -> Option<FullName> {
    for rule in NAME_RULES.iter() {
        let Some(captures) = rule.pattern.captures(text) else {
            continue;
        };
        let Some(candidate) = captures.get(1) else {
            continue;
        };
        if let Ok(name) = FullName::new(candidate.as_str()) {
            return Some(name);
        }
    }
    None
}
