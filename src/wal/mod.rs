//! Write-Ahead Log Module
//!
//! Owns the on-disk side of the log: appending framed lines durably and
//! scanning them back for recovery.
//!
//! ## Responsibilities
//! - Append one line per record, then flush and sync before returning
//! - Scan from byte offset 0 on every replay
//! - Skip torn, malformed and corrupt lines with a warning, never abort
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ ts|event_type|payload_hex|sha256\n                   │  record 1
//! ├──────────────────────────────────────────────────────┤
//! │ ts|event_type|payload_hex|sha256\n                   │  record 2
//! ├──────────────────────────────────────────────────────┤
//! │ ts|event_ty                                          │  torn tail (skipped)
//! └──────────────────────────────────────────────────────┘
//! ```
//! No header, no footer, no version field.

mod reader;
mod recovery;
mod writer;

pub use reader::{has_torn_tail, LineIter, LogReader, RawLine};
pub use recovery::{RecoveryReport, Replay};
pub use writer::LogWriter;

pub(crate) use recovery::verify_lines;
