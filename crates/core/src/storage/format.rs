use crate::errors::CoreError;
use crate::models::document::Document;

/// Name of the persisted slot. File stores append `.json`.
pub const DEFAULT_SLOT: &str = "zenwealth_local_db";

/// Serialize a whole document to snapshot bytes.
///
/// Layout:
/// ```text
/// { "accounts": [...], "transactions": [...], "goals": [...] }
/// ```
/// Money is written as decimal strings, dates as `YYYY-MM-DD`.
pub fn encode(document: &Document) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec(document)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
}

/// Parse snapshot bytes back into a document.
///
/// Any container may be missing and decodes as empty. Content that is not a
/// snapshot object yields `MalformedSnapshot`.
pub fn decode(data: &[u8]) -> Result<Document, CoreError> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Err(CoreError::MalformedSnapshot("Snapshot is empty".into()));
    }
    serde_json::from_slice(data)
        .map_err(|e| CoreError::MalformedSnapshot(format!("Failed to parse snapshot: {e}")))
}

/// Pretty-printed form, for export and inspection.
pub fn encode_pretty(document: &Document) -> Result<String, CoreError> {
    serde_json::to_string_pretty(document)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
}
