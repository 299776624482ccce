//! # daftar-core — Domain Core for IC Registration
//!
//! Pure domain logic for the national identity-card registration service.
//! No I/O, no async — everything here is a function of its inputs.
//!
//! ## Modules
//!
//! - [`identity`] — validated domain primitives: [`IcNumber`] (exactly 12
//!   decimal digits) and [`FullName`] (letters and spaces, uppercased).
//! - [`fingerprint`] — the one-way SHA-256 [`Fingerprint`] of an IC number,
//!   used as the pseudonymous storage key and the duplicate-detection key.
//! - [`validate`] — registration form validation aggregating field-level
//!   errors for both fields at once.
//! - [`extract`] — the OCR field extractor: derives an IC-number candidate
//!   and a name candidate from recognized document text.
//!
//! ## Crate Policy
//!
//! - Constructor-enforced invariants: an [`IcNumber`] or [`FullName`] value
//!   is valid by construction; downstream code never re-checks formats.
//! - Structured errors via `thiserror`. No `.unwrap()` outside tests.

pub mod error;
pub mod extract;
pub mod fingerprint;
pub mod identity;
pub mod validate;

pub use error::{ExtractionError, Field, FieldError, ValidationErrors};
pub use extract::{extract_fields, ScanExtraction};
pub use fingerprint::Fingerprint;
pub use identity::{FullName, IcNumber};
pub use validate::validate_registration;
