//! Record codec
//!
//! Encoding and decoding of single log lines.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::checksum::compute_checksum;
use super::{EncodedRecord, LogRecord, RawRecord, DELIMITER, TERMINATOR};
use crate::error::{LogError, Result};

/// Number of delimiter-separated fields in a valid line
const FIELD_COUNT: usize = 4;

// =============================================================================
// Encoding
// =============================================================================

/// Encode an event stamped with the current UTC time.
///
/// The returned line carries no terminator; the writer appends it.
pub fn encode<P>(event_type: &str, payload: &P) -> Result<EncodedRecord>
where
    P: Serialize + ?Sized,
{
    encode_at(Utc::now(), event_type, payload)
}

/// Encode an event with an explicit timestamp
pub fn encode_at<P>(
    timestamp: DateTime<Utc>,
    event_type: &str,
    payload: &P,
) -> Result<EncodedRecord>
where
    P: Serialize + ?Sized,
{
    validate_event_type(event_type)?;

    let payload_bytes =
        bincode::serialize(payload).map_err(|e| LogError::Serialization(e.to_string()))?;

    let mut line = format!(
        "{}{}{}{}{}",
        timestamp.to_rfc3339_opts(SecondsFormat::Micros, false),
        DELIMITER,
        event_type,
        DELIMITER,
        hex::encode(payload_bytes),
    );
    let checksum = compute_checksum(line.as_bytes());

    line.push(DELIMITER);
    line.push_str(&checksum);

    Ok(EncodedRecord { line, checksum })
}

fn validate_event_type(event_type: &str) -> Result<()> {
    if event_type.is_empty() {
        return Err(LogError::InvalidEventType(
            "event type must not be empty".to_string(),
        ));
    }

    if let Some(reserved) = event_type
        .chars()
        .find(|&c| c == DELIMITER || c == TERMINATOR || c == '\r')
    {
        return Err(LogError::InvalidEventType(format!(
            "{:?} contains reserved character {:?}",
            event_type, reserved
        )));
    }

    Ok(())
}

// =============================================================================
// Decoding
// =============================================================================

/// Check framing and the checksum of a line without decoding its payload.
///
/// A trailing terminator (`\n` or `\r\n`) is accepted and ignored.
pub fn verify_line(line: &str) -> Result<RawRecord<'_>> {
    verify_line_bytes(line.as_bytes())
}

/// Check framing and the checksum of a line given as raw bytes.
///
/// The digest is compared over the exact bytes on disk before any UTF-8
/// validation, so a corrupted byte is reported as `ChecksumMismatch` even when
/// it leaves the line invalid UTF-8. A line that passes the checksum but is not
/// UTF-8 is a `MalformedRecord`.
pub fn verify_line_bytes(line: &[u8]) -> Result<RawRecord<'_>> {
    let line = strip_terminator(line);

    let fields: Vec<&[u8]> = line.split(|&b| b == DELIMITER as u8).collect();
    let &[timestamp, event_type, payload, checksum] = fields.as_slice() else {
        return Err(LogError::MalformedRecord(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        )));
    };

    // The checksum covers everything before the last delimiter
    let row = &line[..line.len() - checksum.len() - DELIMITER.len_utf8()];
    let actual = compute_checksum(row);
    if actual.as_bytes() != checksum {
        return Err(LogError::ChecksumMismatch {
            expected: String::from_utf8_lossy(checksum).into_owned(),
            actual,
        });
    }

    Ok(RawRecord {
        timestamp: field_text(timestamp, "timestamp")?,
        event_type: field_text(event_type, "event type")?,
        payload: field_text(payload, "payload")?,
        checksum: field_text(checksum, "checksum")?,
    })
}

/// Decode a line into a record, verifying its checksum first.
///
/// Errors:
/// - `MalformedRecord` if the line does not split into four fields or the
///   timestamp does not parse
/// - `ChecksumMismatch` if the stored digest does not match
/// - `PayloadDecode` if the payload passes the checksum but cannot be
///   decoded as `P`
pub fn decode<P>(line: &str) -> Result<LogRecord<P>>
where
    P: DeserializeOwned,
{
    decode_bytes(line.as_bytes())
}

/// Decode a line given as raw bytes, as read from disk
pub fn decode_bytes<P>(line: &[u8]) -> Result<LogRecord<P>>
where
    P: DeserializeOwned,
{
    let raw = verify_line_bytes(line)?;

    let timestamp = DateTime::parse_from_rfc3339(raw.timestamp)
        .map_err(|e| {
            LogError::MalformedRecord(format!("invalid timestamp {:?}: {}", raw.timestamp, e))
        })?
        .with_timezone(&Utc);

    let payload_bytes = hex::decode(raw.payload)
        .map_err(|e| LogError::PayloadDecode(format!("payload is not hex: {}", e)))?;
    let payload =
        bincode::deserialize(&payload_bytes).map_err(|e| LogError::PayloadDecode(e.to_string()))?;

    Ok(LogRecord {
        timestamp,
        event_type: raw.event_type.to_string(),
        payload,
        checksum: raw.checksum.to_string(),
    })
}

fn field_text<'a>(field: &'a [u8], name: &str) -> Result<&'a str> {
    std::str::from_utf8(field)
        .map_err(|e| LogError::MalformedRecord(format!("{} is not UTF-8: {}", name, e)))
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    match line.strip_suffix(&[TERMINATOR as u8]) {
        Some(stripped) => stripped.strip_suffix(b"\r").unwrap_or(stripped),
        None => line,
    }
}
