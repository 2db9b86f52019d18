//! Log Session
//!
//! An open append-only log. The session owns the file handle for its whole
//! lifetime and releases it when dropped, on every exit path.
//!
//! ## Lifecycle
//! ```text
//!   Closed ──open()──▶ Open ──write()───▶ Open
//!                       │  ──recover()─▶ Open   (rewinds to offset 0 each call)
//!                       │
//!                       └──close() / drop──▶ Closed
//! ```
//! `close` consumes the session, so a closed log cannot be used again.
//! Reopening the same path starts a new session on the same file.

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::projection::Projection;
use crate::record::{self, LogRecord};
use crate::wal::{self, LogReader, LogWriter, RecoveryReport, Replay};

/// An open append-only event log
///
/// ## Concurrency
///
/// Synchronous and single-owner. Every `write` blocks until its record is
/// on stable storage. There is no internal locking: callers sharing a log
/// across threads must wrap the session in their own mutex, and separate
/// processes appending to the same file get no ordering guarantee beyond
/// what the filesystem gives a single append.
#[derive(Debug)]
pub struct AppendOnlyLog {
    config: Config,
    file: File,
    writer: LogWriter,
}

impl AppendOnlyLog {
    /// Open the log at `path`, creating it empty if absent
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(Config::new(path.as_ref()))
    }

    /// Open a log with an explicit configuration
    pub fn open_with_config(config: Config) -> Result<Self> {
        config.validate()?;

        if config.create_dirs {
            if let Some(parent) = config.parent_dir() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&config.path)?;

        let torn_tail = wal::has_torn_tail(&file)?;
        if torn_tail {
            tracing::warn!(
                path = %config.path.display(),
                "Log ends in an unterminated line; it will be sealed before the next write"
            );
        }

        tracing::debug!(path = %config.path.display(), "Opened log");

        Ok(Self {
            writer: LogWriter::new(config.sync_mode, torn_tail),
            config,
            file,
        })
    }

    // =========================================================================
    // Write Path
    // =========================================================================

    /// Append one event and force it to stable storage.
    ///
    /// Returns the committed line (without terminator). The record is durable
    /// once this returns `Ok`; any error is returned as-is and not retried.
    pub fn write<P>(&mut self, event_type: &str, payload: &P) -> Result<String>
    where
        P: Serialize + ?Sized,
    {
        let encoded = record::encode(event_type, payload)?;
        self.writer.append(&self.file, &encoded.line)?;

        tracing::trace!(event_type, checksum = %encoded.checksum, "Committed record");
        Ok(encoded.line)
    }

    // =========================================================================
    // Recovery Path
    // =========================================================================

    /// Lazily replay every valid record from the start of the file.
    ///
    /// Each call rewinds to offset 0, so repeated replays see the whole log.
    pub fn replay<P>(&mut self) -> Result<Replay<'_, P>>
    where
        P: DeserializeOwned,
    {
        let reader = LogReader::new(&self.file)?;
        Ok(Replay::new(reader.lines()))
    }

    /// Payloads of every valid record, in write order
    pub fn recover<P>(&mut self) -> Result<Vec<P>>
    where
        P: DeserializeOwned,
    {
        self.replay()?
            .map(|record| record.map(LogRecord::into_payload))
            .collect()
    }

    /// Every valid record with its metadata, plus scan counts
    pub fn recover_with_report<P>(&mut self) -> Result<(Vec<LogRecord<P>>, RecoveryReport)>
    where
        P: DeserializeOwned,
    {
        let mut replay = self.replay()?;
        let records = replay.by_ref().collect::<Result<Vec<_>>>()?;
        Ok((records, replay.report()))
    }

    /// Fold every valid record into `projection`, in write order
    pub fn rebuild<Pr>(&mut self, projection: &mut Pr) -> Result<RecoveryReport>
    where
        Pr: Projection,
    {
        let mut replay = self.replay::<Pr::Event>()?;
        for record in replay.by_ref() {
            let record = record?;
            projection.apply(&record.event_type, record.payload);
        }
        Ok(replay.report())
    }

    /// Check framing and checksums of every line without decoding payloads
    pub fn verify(&mut self) -> Result<RecoveryReport> {
        let reader = LogReader::new(&self.file)?;
        wal::verify_lines(reader.lines())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Close the session, surfacing any error from the final sync
    pub fn close(self) -> Result<()> {
        if self.writer.records_written() > 0 {
            self.writer.sync(&self.file)?;
        }
        Ok(())
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current size of the log file in bytes
    pub fn len(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Records committed during this session
    pub fn records_written(&self) -> u64 {
        self.writer.records_written()
    }
}

impl Drop for AppendOnlyLog {
    fn drop(&mut self) {
        tracing::debug!(
            path = %self.config.path.display(),
            written = self.writer.records_written(),
            "Closed log"
        );
    }
}
