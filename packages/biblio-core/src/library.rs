//! Library aggregate: the three entity stores as one unit.

use crate::catalog::LibraryCatalog;
use crate::clock::Clock;
use crate::error::LibraryError;
use crate::ledger::LoanLedger;
use crate::model::Loan;
use crate::registry::MemberRegistry;

/// The whole library state: catalog, registry, and ledger.
///
/// One owned aggregate passed explicitly to every caller, in place of
/// three pieces of global state. Persistence saves and loads it as a
/// unit; the loan helpers wire the ledger's cross-store mutation to this
/// aggregate's own catalog.
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub catalog: LibraryCatalog,
    pub registry: MemberRegistry,
    pub ledger: LoanLedger,
}

impl Library {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a book out to a member, adjusting this library's catalog.
    pub fn checkout(
        &mut self,
        member_id: u32,
        isbn: &str,
        clock: &dyn Clock,
    ) -> Result<Loan, LibraryError> {
        self.ledger
            .checkout(member_id, isbn, &mut self.catalog, &self.registry, clock)
    }

    /// Returns a borrowed book, adjusting this library's catalog.
    pub fn return_book(&mut self, member_id: u32, isbn: &str) -> Result<Loan, LibraryError> {
        self.ledger.return_book(member_id, isbn, &mut self.catalog)
    }
}
