//! Configuration for appendlog
//!
//! Centralized configuration with sensible defaults.

use std::path::{Path, PathBuf};

use crate::error::{LogError, Result};

/// Configuration for one append-only log file
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the log file. Created empty on first open.
    pub path: PathBuf,

    /// Create missing parent directories when opening
    pub create_dirs: bool,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// How each write is forced to stable storage
    pub sync_mode: SyncMode,
}

/// How a committed write is forced to stable storage.
///
/// Every write is synced before it returns; the modes only differ in whether
/// file metadata is synced along with the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// `fsync`: data and metadata (safest)
    #[default]
    Full,

    /// `fdatasync`: data plus the metadata needed to read it back
    Data,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./appendlog_data/events.log"),
            create_dirs: true,
            sync_mode: SyncMode::Full,
        }
    }
}

impl Config {
    /// Default config for the log file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject configurations that cannot name a log file
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(LogError::Config("log path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Parent directory of the log file, if it has one
    pub(crate) fn parent_dir(&self) -> Option<&Path> {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set whether missing parent directories are created on open
    pub fn create_dirs(mut self, create: bool) -> Self {
        self.config.create_dirs = create;
        self
    }

    /// Set the sync mode
    pub fn sync_mode(mut self, mode: SyncMode) -> Self {
        self.config.sync_mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
