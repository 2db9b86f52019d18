//! Log Reader
//!
//! Scans the log file line by line from byte offset 0.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

use crate::error::{LogError, Result};
use crate::record::TERMINATOR;

/// One line read from the log, terminator excluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Byte offset of the first byte of the line
    pub offset: u64,

    /// Line content without the terminator
    pub bytes: Vec<u8>,

    /// Whether the line ended with a terminator (false only for a torn tail)
    pub terminated: bool,
}

impl RawLine {
    /// The line as UTF-8 text
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.bytes).map_err(|e| {
            LogError::MalformedRecord(format!("line at offset {} is not UTF-8: {}", self.offset, e))
        })
    }

    /// Lossy rendering for diagnostics
    pub fn display(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Bytes this line occupies on disk, terminator included
    pub fn disk_len(&self) -> u64 {
        self.bytes.len() as u64 + u64::from(self.terminated)
    }
}

/// Reads lines from a log file, starting at the beginning
pub struct LogReader<'a> {
    reader: BufReader<&'a File>,
    position: u64,
}

impl<'a> LogReader<'a> {
    /// Rewind `file` to offset 0 and start reading
    pub fn new(file: &'a File) -> Result<Self> {
        let mut reader = BufReader::new(file);
        reader.seek(SeekFrom::Start(0))?;
        Ok(Self {
            reader,
            position: 0,
        })
    }

    /// Read the next line, or `None` at end of file
    pub fn next_line(&mut self) -> Result<Option<RawLine>> {
        let mut bytes = Vec::new();
        let read = self.reader.read_until(TERMINATOR as u8, &mut bytes)?;
        if read == 0 {
            return Ok(None);
        }

        let offset = self.position;
        self.position += read as u64;

        let terminated = bytes.last() == Some(&(TERMINATOR as u8));
        if terminated {
            bytes.pop();
        }

        Ok(Some(RawLine {
            offset,
            bytes,
            terminated,
        }))
    }

    /// Bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Iterate over all remaining lines
    pub fn lines(self) -> LineIter<'a> {
        LineIter {
            reader: self,
            done: false,
        }
    }
}

/// Iterator over the lines of a log file.
///
/// Finite and not restartable: an I/O error is yielded once and ends the scan.
pub struct LineIter<'a> {
    reader: LogReader<'a>,
    done: bool,
}

impl Iterator for LineIter<'_> {
    type Item = Result<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Whether the file's last byte is something other than a terminator.
///
/// An empty file has no torn tail.
pub fn has_torn_tail(file: &File) -> Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }

    let mut handle = file;
    handle.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    handle.read_exact(&mut last)?;
    handle.seek(SeekFrom::Start(0))?;

    Ok(last[0] != TERMINATOR as u8)
}
