//! Record Codec Module
//!
//! Frames one logical event into one line of the log and parses it back.
//!
//! ## Line Format
//! ```text
//! ┌───────────────┬───┬────────────┬───┬──────────────┬───┬──────────────┬────┐
//! │ timestamp     │ | │ event_type │ | │ payload (hex)│ | │ sha256 (hex) │ \n │
//! │ RFC 3339, UTC │   │            │   │ bincode      │   │ of 1st three │    │
//! └───────────────┴───┴────────────┴───┴──────────────┴───┴──────────────┴────┘
//! ```
//!
//! The payload is bincode-serialized and hex-encoded, so it can never contain
//! the delimiter or a line terminator.

mod checksum;
mod codec;

use chrono::{DateTime, Utc};

pub use checksum::{compute_checksum, verify_checksum, CHECKSUM_LEN};
pub use codec::{decode, decode_bytes, encode, encode_at, verify_line, verify_line_bytes};

/// Field delimiter within a line
pub const DELIMITER: char = '|';

/// Record terminator
pub const TERMINATOR: char = '\n';

/// A decoded record that passed the checksum gate
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord<P> {
    /// When the record was encoded
    pub timestamp: DateTime<Utc>,

    /// Application-chosen tag (e.g. "download")
    pub event_type: String,

    /// The decoded application payload
    pub payload: P,

    /// Hex SHA-256 stored with the record
    pub checksum: String,
}

impl<P> LogRecord<P> {
    /// Consume the record, keeping only its payload
    pub fn into_payload(self) -> P {
        self.payload
    }
}

/// A framed record ready to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRecord {
    /// The full line, without the terminator
    pub line: String,

    /// Checksum stored in the line's last field
    pub checksum: String,
}

/// The fields of a line that passed framing and the checksum gate,
/// with the payload still encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub timestamp: &'a str,
    pub event_type: &'a str,
    pub payload: &'a str,
    pub checksum: &'a str,
}
