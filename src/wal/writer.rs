//! Log Writer
//!
//! Appends framed lines to the log file and forces them to stable storage.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::config::SyncMode;
use crate::error::{LogError, Result};
use crate::record::{DELIMITER, TERMINATOR};

/// Appends lines to a log file opened in append mode.
///
/// The writer holds no handle of its own; the session lends it the file for
/// each append so that one `File` serves both writes and replays.
#[derive(Debug)]
pub struct LogWriter {
    sync_mode: SyncMode,

    /// The file ended in a torn line when it was opened; the next append
    /// seals that fragment with `|\n` first
    seal_pending: bool,

    /// Records committed through this writer
    records_written: u64,
}

impl LogWriter {
    pub fn new(sync_mode: SyncMode, torn_tail: bool) -> Self {
        Self {
            sync_mode,
            seal_pending: torn_tail,
            records_written: 0,
        }
    }

    /// Append `line` plus terminator, flush, then sync.
    ///
    /// The record is committed once this returns `Ok`. On error nothing is
    /// retried and the record may or may not be on disk.
    pub fn append(&mut self, file: &File, line: &str) -> Result<()> {
        let mut buffer = BufWriter::new(file);

        // A trailing delimiter gives the torn line a fifth field, so it stays
        // rejected even if it was a complete record missing only its newline
        if self.seal_pending {
            buffer.write_all(&[DELIMITER as u8, TERMINATOR as u8])?;
        }
        buffer.write_all(line.as_bytes())?;
        buffer.write_all(&[TERMINATOR as u8])?;
        buffer.flush()?;

        let file = buffer
            .into_inner()
            .map_err(|e| LogError::Io(e.into_error()))?;
        self.sync(file)?;

        if self.seal_pending {
            tracing::debug!("Terminated torn tail line before first append");
            self.seal_pending = false;
        }
        self.records_written += 1;
        Ok(())
    }

    /// Force written data to stable storage
    pub fn sync(&self, file: &File) -> Result<()> {
        match self.sync_mode {
            SyncMode::Full => file.sync_all()?,
            SyncMode::Data => file.sync_data()?,
        }
        Ok(())
    }

    /// Whether the next append will first terminate a torn tail
    pub fn seal_pending(&self) -> bool {
        self.seal_pending
    }

    /// Records committed through this writer
    pub fn records_written(&self) -> u64 {
        self.records_written
    }
}
