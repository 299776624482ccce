//! CSV rendering for the admin export endpoint.
//!
//! Hand-rolled on purpose: the export is four fixed columns with full
//! quoting, which does not justify a dependency. Quotes are doubled per
//! RFC 4180.

use crate::state::RegistrationRecord;

const HEADER: &str = "\"ID\",\"Hash IC\",\"Full Name\",\"Created At\"";

/// Quote a single CSV field, doubling embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render records as a CSV document: header line plus one line per
/// record, every field quoted, timestamps in RFC 3339.
pub fn render_csv(records: &[RegistrationRecord]) -> String {
    let mut out = String::with_capacity(64 + records.len() * 128);
    out.push_str(HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&quote(&record.id.to_string()));
        out.push(',');
        out.push_str(&quote(&record.fingerprint.to_hex()));
        out.push(',');
        out.push_str(&quote(&record.full_name));
        out.push(',');
        out.push_str(&quote(&record.created_at.to_rfc3339()));
        out.push('\n');
    }
    out
}
