//! # appendlog
//!
//! A tiny durable append-only event log with:
//! - One checksummed text line per record (SHA-256 over the record fields)
//! - Write-ahead durability: flush + sync before a write is acknowledged
//! - Best-effort recovery that skips torn, malformed and corrupt records
//! - Replay into application-defined state projections
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                         │
//! │          (event semantics, Projection impls)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ write(event_type, payload) / recover()
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  AppendOnlyLog session                       │
//! │              (owns the file, scoped lifetime)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  LogWriter  │          │   Replay    │
//!   │ (append +   │          │ (scan from  │
//!   │  sync)      │          │  offset 0)  │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          └───────────┬────────────┘
//!                      ▼
//!              ┌──────────────┐
//!              │ Record Codec │
//!              │ (frame/check)│
//!              └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use appendlog::AppendOnlyLog;
//!
//! # fn main() -> appendlog::Result<()> {
//! let mut log = AppendOnlyLog::open("downloads.log")?;
//! log.write("download", &1u32)?;
//! log.write("download", &2u32)?;
//!
//! let segments: Vec<u32> = log.recover()?;
//! assert_eq!(segments, vec![1, 2]);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod wal;
pub mod projection;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LogError, Result};
pub use config::{Config, SyncMode};
pub use projection::Projection;
pub use record::LogRecord;
pub use session::AppendOnlyLog;
pub use wal::RecoveryReport;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of appendlog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
