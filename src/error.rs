//! Error types for appendlog
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LogError
pub type Result<T> = std::result::Result<T, LogError>;

/// Unified error type for appendlog operations
#[derive(Debug, Error)]
pub enum LogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Record Errors (recoverable: the record is skipped during replay)
    // -------------------------------------------------------------------------
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Checksum mismatch: stored {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Payload decode error: {0}")]
    PayloadDecode(String),

    #[error("Torn write at byte offset {offset}: line has no terminator")]
    TornWrite { offset: u64 },

    // -------------------------------------------------------------------------
    // Write Path Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LogError {
    /// Whether this error marks a single record as untrustworthy.
    ///
    /// Corruption errors are skipped during recovery; everything else is
    /// fatal to the call that produced it.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            LogError::MalformedRecord(_)
                | LogError::ChecksumMismatch { .. }
                | LogError::PayloadDecode(_)
                | LogError::TornWrite { .. }
        )
    }
}
