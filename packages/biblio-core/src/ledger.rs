//! Loan ledger: checkout and return with the borrowing invariants.
//!
//! The ledger never touches book records directly; copy counts are
//! adjusted through the [`CopyAdjuster`] capability, which keeps the
//! dependency on the catalog narrow and mockable.

use crate::clock::Clock;
use crate::error::LibraryError;
use crate::model::Loan;
use crate::registry::MemberRegistry;
use crate::store::RecordStore;

/// Copy-count adjustment capability the ledger requires of the catalog.
pub trait CopyAdjuster {
    /// Returns the copies currently available for the ISBN.
    ///
    /// # Returns
    /// `Err(NotFound)` if no book carries the ISBN.
    fn available_copies(&self, isbn: &str) -> Result<u32, LibraryError>;

    /// Takes one copy out of circulation.
    ///
    /// # Returns
    /// `Err(NotFound)` if no book carries the ISBN, `Err(Exhausted)` if
    /// no copies are available.
    fn decrement_copies(&mut self, isbn: &str) -> Result<(), LibraryError>;

    /// Puts one copy back into circulation.
    ///
    /// # Returns
    /// `Err(NotFound)` if no book carries the ISBN.
    fn increment_copies(&mut self, isbn: &str) -> Result<(), LibraryError>;
}

/// Ledger of active loans, unique by `(member_id, isbn)`.
///
/// A loan is either active (present) or nonexistent; returning removes
/// the record outright, no history is kept.
#[derive(Debug, Clone, Default)]
pub struct LoanLedger {
    loans: RecordStore<Loan>,
}

impl LoanLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a book out to a member.
    ///
    /// Validation order: member exists, book exists, copies available,
    /// no active loan for the pair. All checks happen before any
    /// mutation, so a failure never leaves a loan without its matching
    /// copy decrement.
    ///
    /// # Arguments
    /// * `member_id` - Borrowing member
    /// * `isbn` - Book to borrow
    /// * `catalog` - Copy-adjustment capability (the catalog)
    /// * `registry` - Member registry for existence checks
    /// * `clock` - Date source for the loan stamp
    ///
    /// # Returns
    /// The created loan, dated `YYYY-MM-DD` from the clock.
    pub fn checkout(
        &mut self,
        member_id: u32,
        isbn: &str,
        catalog: &mut dyn CopyAdjuster,
        registry: &MemberRegistry,
        clock: &dyn Clock,
    ) -> Result<Loan, LibraryError> {
        if registry.find_member(member_id).is_none() {
            return Err(LibraryError::NotFound {
                entity: "member",
                key: member_id.to_string(),
            });
        }
        if catalog.available_copies(isbn)? == 0 {
            return Err(LibraryError::Exhausted {
                isbn: isbn.to_string(),
            });
        }
        if self.find_loan(member_id, isbn).is_some() {
            return Err(LibraryError::DuplicateLoan {
                member_id,
                isbn: isbn.to_string(),
            });
        }

        let loan = Loan {
            member_id,
            isbn: isbn.to_string(),
            date: clock.today().format("%Y-%m-%d").to_string(),
        };

        catalog.decrement_copies(isbn)?;
        self.loans.insert_front(loan.clone());
        tracing::debug!(member_id, isbn, date = %loan.date, "loan created");
        Ok(loan)
    }

    /// Returns a borrowed book.
    ///
    /// Removes the matching loan and puts the copy back into
    /// circulation. If the book has been removed from the catalog in the
    /// meantime the increment is skipped; the return still succeeds.
    ///
    /// # Returns
    /// The settled loan, or `Err(NotFound)` if no loan matches the pair.
    pub fn return_book(
        &mut self,
        member_id: u32,
        isbn: &str,
        catalog: &mut dyn CopyAdjuster,
    ) -> Result<Loan, LibraryError> {
        let loan = self
            .loans
            .remove(|l| l.member_id == member_id && l.isbn == isbn)
            .ok_or_else(|| LibraryError::NotFound {
                entity: "loan",
                key: format!("member {} / isbn {}", member_id, isbn),
            })?;

        if let Err(LibraryError::NotFound { .. }) = catalog.increment_copies(isbn) {
            tracing::warn!(member_id, isbn, "returned book no longer in catalog");
        }
        tracing::debug!(member_id, isbn, "loan settled");
        Ok(loan)
    }

    /// Finds the active loan for a `(member, book)` pair. Linear scan.
    pub fn find_loan(&self, member_id: u32, isbn: &str) -> Option<&Loan> {
        self.loans
            .find(|l| l.member_id == member_id && l.isbn == isbn)
    }

    /// Iterates over all active loans, newest first.
    pub fn loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans.iter()
    }

    /// Returns the number of active loans.
    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }

    pub(crate) fn store_mut(&mut self) -> &mut RecordStore<Loan> {
        &mut self.loans
    }
}
