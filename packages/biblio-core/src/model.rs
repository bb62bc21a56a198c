//! Record types for the three entity stores.

use crate::error::LibraryError;

/// Maximum ISBN length in bytes (the binary layout reserves 20 bytes
/// including the trailing NUL).
pub const ISBN_MAX_LEN: usize = 19;

/// Maximum length in bytes for title, author, name, and program fields
/// (100-byte fields including the trailing NUL).
pub const TEXT_MAX_LEN: usize = 99;

/// A book held by the catalog, keyed by ISBN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Unique key, at most [`ISBN_MAX_LEN`] bytes
    pub isbn: String,
    pub title: String,
    pub author: String,
    /// Publication year
    pub year: i32,
    /// Copies currently available for checkout. Mutated only by the
    /// loan ledger through the catalog's copy-adjustment interface.
    pub copies: u32,
}

/// A registered member, keyed by numeric ID (always > 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Unique key, never zero
    pub id: u32,
    pub name: String,
    /// Program or degree the member is enrolled in
    pub program: String,
}

/// An active loan. Composite key `(member_id, isbn)`; at most one active
/// loan exists per pair. Returned loans are removed, not archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub member_id: u32,
    pub isbn: String,
    /// Checkout date, `YYYY-MM-DD`, stamped once at creation
    pub date: String,
}

/// Validates a string field against its binary byte budget.
///
/// Oversized values are rejected rather than truncated: truncation at
/// save time would silently change the record across a round-trip.
/// Interior NUL bytes are rejected because NUL terminates the field in
/// the binary layout.
pub(crate) fn validate_text(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<(), LibraryError> {
    if value.len() > max_len {
        return Err(LibraryError::InvalidInput {
            field,
            reason: format!("exceeds {} bytes ({} given)", max_len, value.len()),
        });
    }
    if value.contains('\0') {
        return Err(LibraryError::InvalidInput {
            field,
            reason: "contains NUL byte".to_string(),
        });
    }
    Ok(())
}
