use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for the entire zenwealth-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / Snapshot ──────────────────────────────────────────
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── Ledger ──────────────────────────────────────────────────────
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Goal target must be positive, got {0}")]
    InvalidGoalTarget(Decimal),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Amount out of range: {0}")]
    AmountOverflow(String),

    // ── Advisory collaborators ──────────────────────────────────────
    #[error("Advisor error ({provider}): {message}")]
    Advisor {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No advisory provider configured: {0}")]
    NoProvider(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::StorageUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Gemini takes its key as a query parameter; strip it from the message.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
