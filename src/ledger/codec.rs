//! JSON encoding of id sequences.
//!
//! The stored form is a bare JSON array of strings with no version tag.

use super::LedgerError;

/// Encodes ids as a JSON array of strings.
///
/// # Errors
///
/// Returns [`LedgerError::Encode`] if serialization fails.
pub fn encode_ids(key: &str, ids: &[String]) -> Result<String, LedgerError> {
    serde_json::to_string(ids).map_err(|source| LedgerError::Encode {
        key: key.to_string(),
        source,
    })
}

/// Decodes a stored value into ids, preserving order and duplicates.
///
/// # Errors
///
/// Returns [`LedgerError::Decode`] for anything other than a JSON array of strings.
pub fn decode_ids(key: &str, raw: &str) -> Result<Vec<String>, LedgerError> {
    serde_json::from_str(raw).map_err(|source| LedgerError::Decode {
        key: key.to_string(),
        source,
    })
}
