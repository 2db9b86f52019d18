//! Log Recovery
//!
//! Replays the log into decoded records, skipping anything that fails the
//! checksum gate. A single bad record never aborts the scan.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use super::reader::{LineIter, RawLine};
use crate::error::{LogError, Result};
use crate::record::{self, LogRecord};

/// What a recovery or verification scan saw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    /// Records that passed every check
    pub records_recovered: u64,

    /// Tail lines with no terminator
    pub torn_writes: u64,

    /// Lines with the wrong field count, invalid UTF-8 or a bad timestamp
    pub malformed: u64,

    /// Lines whose stored checksum did not match
    pub checksum_mismatches: u64,

    /// Records that passed the checksum but whose payload did not decode
    pub payload_errors: u64,

    /// Bytes read from the file
    pub bytes_scanned: u64,
}

impl RecoveryReport {
    /// Lines skipped for any reason
    pub fn records_skipped(&self) -> u64 {
        self.torn_writes + self.malformed + self.checksum_mismatches + self.payload_errors
    }

    /// True when nothing was skipped
    pub fn is_clean(&self) -> bool {
        self.records_skipped() == 0
    }

    fn record_skip(&mut self, error: &LogError) {
        match error {
            LogError::TornWrite { .. } => self.torn_writes += 1,
            LogError::ChecksumMismatch { .. } => self.checksum_mismatches += 1,
            LogError::PayloadDecode(_) => self.payload_errors += 1,
            _ => self.malformed += 1,
        }
    }

    fn log_summary(&self) {
        if self.is_clean() {
            tracing::info!(
                recovered = self.records_recovered,
                bytes = self.bytes_scanned,
                "Log scan complete"
            );
        } else {
            tracing::warn!(
                recovered = self.records_recovered,
                skipped = self.records_skipped(),
                torn = self.torn_writes,
                malformed = self.malformed,
                checksum_mismatches = self.checksum_mismatches,
                payload_errors = self.payload_errors,
                "Log scan complete with skipped records"
            );
        }
    }
}

/// Lazy replay of every valid record, in file order.
///
/// Corrupt lines are logged at warn level and skipped. `Err` is yielded only
/// for an I/O failure while reading, which also ends the iteration.
pub struct Replay<'a, P> {
    lines: LineIter<'a>,
    report: RecoveryReport,
    finished: bool,
    _payload: PhantomData<fn() -> P>,
}

impl<'a, P> Replay<'a, P> {
    pub(crate) fn new(lines: LineIter<'a>) -> Self {
        Self {
            lines,
            report: RecoveryReport::default(),
            finished: false,
            _payload: PhantomData,
        }
    }

    /// Counts for the part of the log consumed so far
    pub fn report(&self) -> RecoveryReport {
        self.report
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            self.report.log_summary();
        }
    }
}

impl<P: DeserializeOwned> Iterator for Replay<'_, P> {
    type Item = Result<LogRecord<P>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    tracing::error!("Log replay aborted by read error: {}", e);
                    self.finished = true;
                    return Some(Err(e));
                }
                None => {
                    self.finish();
                    return None;
                }
            };
            self.report.bytes_scanned += line.disk_len();

            match decode_line(&line) {
                Ok(record) => {
                    self.report.records_recovered += 1;
                    return Some(Ok(record));
                }
                Err(e) => {
                    warn_skipped(&line, &e);
                    self.report.record_skip(&e);
                }
            }
        }
    }
}

/// Run framing and the checksum gate over every line, without decoding
/// payloads. Never modifies the file.
pub(crate) fn verify_lines(lines: LineIter<'_>) -> Result<RecoveryReport> {
    let mut report = RecoveryReport::default();

    for line in lines {
        let line = line?;
        report.bytes_scanned += line.disk_len();

        let checked = check_terminated(&line)
            .and_then(|_| record::verify_line_bytes(&line.bytes).map(|_| ()));
        match checked {
            Ok(()) => report.records_recovered += 1,
            Err(e) => {
                warn_skipped(&line, &e);
                report.record_skip(&e);
            }
        }
    }

    report.log_summary();
    Ok(report)
}

fn decode_line<P: DeserializeOwned>(line: &RawLine) -> Result<LogRecord<P>> {
    check_terminated(line)?;
    record::decode_bytes(&line.bytes)
}

fn check_terminated(line: &RawLine) -> Result<()> {
    if line.terminated {
        Ok(())
    } else {
        Err(LogError::TornWrite {
            offset: line.offset,
        })
    }
}

fn warn_skipped(line: &RawLine, error: &LogError) {
    let reason = match error {
        LogError::TornWrite { .. } => "Skipping torn line at end of log",
        LogError::ChecksumMismatch { .. } => "Skipping record with checksum mismatch",
        LogError::PayloadDecode(_) => "Skipping record whose payload failed to decode",
        _ => "Skipping malformed record",
    };

    tracing::warn!(
        offset = line.offset,
        error = %error,
        line = %line.display(),
        "{}",
        reason
    );
}
