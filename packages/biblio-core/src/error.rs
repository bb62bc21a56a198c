//! Library error types.

use thiserror::Error;

/// Library operation errors.
///
/// Every variant is recoverable and reported to the immediate caller;
/// none aborts the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// Malformed or out-of-range field value
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// Uniqueness violation on insert
    #[error("{entity} with key '{key}' already exists")]
    DuplicateKey { entity: &'static str, key: String },

    /// Lookup, removal, or update target absent
    #[error("{entity} with key '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    /// No copies available for checkout
    #[error("No copies of book '{isbn}' available")]
    Exhausted { isbn: String },

    /// Member already holds an active loan for this book
    #[error("Member {member_id} already has book '{isbn}' on loan")]
    DuplicateLoan { member_id: u32, isbn: String },

    /// I/O error during persistence
    #[error("I/O error: {0}")]
    Io(String),

    /// Transient I/O error that may succeed on retry
    #[error("Transient I/O error: {0}")]
    TransientIo(String),

    /// Disk full error during persistence
    #[error("Disk full: {0}")]
    DiskFull(String),
}
