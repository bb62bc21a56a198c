//! End-to-end workflow tests over the whole library aggregate.

use chrono::NaiveDate;
use ntest::timeout;
use tempfile::tempdir;

use biblio_core::clock::FixedClock;
use biblio_core::config::BibConfig;
use biblio_core::error::LibraryError;
use biblio_core::model::{Book, Member};
use biblio_core::persistence::PersistenceManager;
use biblio_core::Library;

fn book(isbn: &str, title: &str, copies: u32) -> Book {
    Book {
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: "X".to_string(),
        year: 2020,
        copies,
    }
}

fn member(id: u32, name: &str) -> Member {
    Member {
        id,
        name: name.to_string(),
        program: "CS".to_string(),
    }
}

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
}

/// The canonical checkout/return walkthrough: borrow, double-borrow
/// rejected, return, double-return rejected, copies conserved throughout.
#[timeout(1000)]
#[test]
fn test_checkout_return_walkthrough() {
    let mut library = Library::new();
    library.catalog.add_book(book("111", "A", 2)).unwrap();
    library.registry.add_member(member(1, "Ana")).unwrap();

    let loan = library.checkout(1, "111", &clock()).unwrap();
    assert_eq!(loan.date, "2024-03-05");
    assert_eq!(library.catalog.find_book("111").unwrap().copies, 1);

    let err = library.checkout(1, "111", &clock()).unwrap_err();
    assert_eq!(
        err,
        LibraryError::DuplicateLoan {
            member_id: 1,
            isbn: "111".to_string()
        }
    );
    assert_eq!(library.catalog.find_book("111").unwrap().copies, 1);

    library.return_book(1, "111").unwrap();
    assert_eq!(library.catalog.find_book("111").unwrap().copies, 2);

    let err = library.return_book(1, "111").unwrap_err();
    assert!(matches!(err, LibraryError::NotFound { entity: "loan", .. }));
}

/// Copies always equal initial stock minus active loans for that ISBN,
/// across an interleaved sequence of checkouts and returns.
#[timeout(1000)]
#[test]
fn test_loan_conservation_under_interleaving() {
    let mut library = Library::new();
    library.catalog.add_book(book("aaa", "A", 3)).unwrap();
    library.catalog.add_book(book("bbb", "B", 1)).unwrap();
    for id in 1..=3 {
        library.registry.add_member(member(id, "M")).unwrap();
    }

    let assert_conserved = |library: &Library| {
        for (isbn, initial) in [("aaa", 3u32), ("bbb", 1u32)] {
            let active = library.ledger.loans().filter(|l| l.isbn == isbn).count() as u32;
            assert_eq!(
                library.catalog.find_book(isbn).unwrap().copies,
                initial - active
            );
        }
    };

    library.checkout(1, "aaa", &clock()).unwrap();
    assert_conserved(&library);
    library.checkout(2, "aaa", &clock()).unwrap();
    assert_conserved(&library);
    library.checkout(3, "bbb", &clock()).unwrap();
    assert_conserved(&library);
    library.return_book(2, "aaa").unwrap();
    assert_conserved(&library);
    library.checkout(2, "bbb", &clock()).unwrap_err(); // exhausted
    assert_conserved(&library);
    library.checkout(3, "aaa", &clock()).unwrap();
    assert_conserved(&library);
    library.return_book(1, "aaa").unwrap();
    library.return_book(3, "aaa").unwrap();
    library.return_book(3, "bbb").unwrap();
    assert_conserved(&library);
    assert_eq!(library.ledger.loan_count(), 0);
}

/// Exhausted books never produce a loan.
#[timeout(1000)]
#[test]
fn test_exhausted_book_rejects_checkout() {
    let mut library = Library::new();
    library.catalog.add_book(book("111", "A", 0)).unwrap();
    library.registry.add_member(member(1, "Ana")).unwrap();

    let err = library.checkout(1, "111", &clock()).unwrap_err();
    assert_eq!(
        err,
        LibraryError::Exhausted {
            isbn: "111".to_string()
        }
    );
    assert_eq!(library.ledger.loan_count(), 0);
}

/// Removing a book leaves its loans orphaned; returning an orphaned loan
/// still settles it.
#[timeout(1000)]
#[test]
fn test_orphaned_loan_can_still_be_returned() {
    let mut library = Library::new();
    library.catalog.add_book(book("111", "A", 1)).unwrap();
    library.registry.add_member(member(1, "Ana")).unwrap();

    library.checkout(1, "111", &clock()).unwrap();
    library.catalog.remove_book("111").unwrap();
    assert_eq!(library.ledger.loan_count(), 1);

    library.return_book(1, "111").unwrap();
    assert_eq!(library.ledger.loan_count(), 0);
    assert!(library.catalog.find_book("111").is_none());
}

/// Full cycle: mutate, persist, reload, keep operating on the reloaded
/// state.
#[timeout(1000)]
#[test]
fn test_state_survives_save_load_cycle() {
    let temp_dir = tempdir().unwrap();
    let persistence = PersistenceManager::new(&BibConfig {
        data_dir: temp_dir.path().to_path_buf(),
        ..Default::default()
    });

    let mut library = Library::new();
    library.catalog.add_book(book("111", "A", 2)).unwrap();
    library.registry.add_member(member(1, "Ana")).unwrap();
    library.checkout(1, "111", &clock()).unwrap();
    persistence.save(&library).unwrap();

    let mut reloaded = Library::new();
    persistence.load(&mut reloaded).unwrap();

    assert_eq!(reloaded.catalog.find_book("111").unwrap().copies, 1);
    assert_eq!(reloaded.ledger.find_loan(1, "111").unwrap().date, "2024-03-05");

    // The reloaded aggregate keeps enforcing the invariants
    let err = reloaded.checkout(1, "111", &clock()).unwrap_err();
    assert!(matches!(err, LibraryError::DuplicateLoan { .. }));
    reloaded.return_book(1, "111").unwrap();
    assert_eq!(reloaded.catalog.find_book("111").unwrap().copies, 2);
}
