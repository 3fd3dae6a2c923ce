use thiserror::Error;

/// Errors produced by the scan ledger.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// No platform data directory could be determined for the default
    /// ledger location.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Filesystem error while preparing the ledger directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A row that should exist could not be read back.
    #[error("Record not found")]
    NotFound,

    /// Schema migration failed, or the on-disk schema is unsupported.
    #[error("Migration error: {0}")]
    Migration(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
