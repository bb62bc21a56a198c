//! Fixed-layout binary persistence for the three entity stores.
//!
//! One flat file per entity type, each a concatenation of fixed-size
//! records (layouts in [`layout`]). No header, no count, no checksum;
//! end-of-file terminates. A file written by this module is parseable
//! only by reading fixed-size chunks until EOF.

mod layout;


pub use layout::FixedRecord;

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::config::BibConfig;
use crate::error::LibraryError;
use crate::library::Library;
use crate::model::{Book, Loan, Member};

/// Wraps an I/O failure with context. Disk-full and transient conditions
/// stay distinguishable so the save path can decide what to retry.
fn io_err(context: &str, error: std::io::Error) -> LibraryError {
    match error.kind() {
        ErrorKind::StorageFull => LibraryError::DiskFull(format!("{}: {}", context, error)),
        ErrorKind::Interrupted | ErrorKind::TimedOut | ErrorKind::WouldBlock => {
            LibraryError::TransientIo(format!("{}: {}", context, error))
        }
        _ => LibraryError::Io(format!("{}: {}", context, error)),
    }
}

/// Data file holding book records.
pub const BOOKS_FILE: &str = "books.dat";
/// Data file holding member records.
pub const MEMBERS_FILE: &str = "members.dat";
/// Data file holding loan records.
pub const LOANS_FILE: &str = "loans.dat";

/// Persistence manager for the three entity data files.
#[derive(Debug)]
pub struct PersistenceManager {
    /// Data directory path
    data_dir: PathBuf,
    /// Maximum retry attempts for transient I/O errors
    max_retries: u32,
    /// Delay between retry attempts in milliseconds
    retry_delay_ms: u64,
}

impl PersistenceManager {
    /// Creates a new persistence manager with the given configuration.
    pub fn new(config: &BibConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            max_retries: config.persistence_max_retries,
            retry_delay_ms: config.persistence_retry_delay_ms,
        }
    }

    /// Saves all three stores to disk.
    ///
    /// Each store is written in its current iteration order (newest
    /// record first) to a temporary file, synced, then atomically
    /// renamed over the previous data file. A transient I/O failure is
    /// retried up to the configured limit; any other failure is
    /// returned immediately.
    ///
    /// # Arguments
    /// * `library` - Library aggregate to save
    ///
    /// # Returns
    /// `Result<(), LibraryError>` indicating success or failure.
    pub fn save(&self, library: &Library) -> Result<(), LibraryError> {
        let mut attempt = 0;
        loop {
            match self.save_internal(library) {
                Err(LibraryError::TransientIo(reason)) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max_retries = self.max_retries,
                        %reason,
                        "transient I/O error while saving, retrying"
                    );
                    if self.retry_delay_ms > 0 {
                        std::thread::sleep(std::time::Duration::from_millis(self.retry_delay_ms));
                    }
                }
                result => return result,
            }
        }
    }

    /// Single save attempt.
    fn save_internal(&self, library: &Library) -> Result<(), LibraryError> {
        // Ensure data directory exists
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| io_err("Failed to create data directory", e))?;

        self.write_store(BOOKS_FILE, library.catalog.books())?;
        self.write_store(MEMBERS_FILE, library.registry.members())?;
        self.write_store(LOANS_FILE, library.ledger.loans())?;

        tracing::debug!(
            books = library.catalog.book_count(),
            members = library.registry.member_count(),
            loans = library.ledger.loan_count(),
            "library saved"
        );
        Ok(())
    }

    /// Writes one store as a flat sequence of fixed-size records.
    fn write_store<'a, R, I>(&self, file_name: &str, records: I) -> Result<(), LibraryError>
    where
        R: FixedRecord + 'a,
        I: Iterator<Item = &'a R>,
    {
        let temp_path = self.data_dir.join(format!("{}.tmp", file_name));
        let final_path = self.data_dir.join(file_name);

        let mut data = Vec::new();
        let mut buf = vec![0u8; R::RECORD_SIZE];
        for record in records {
            record.encode_into(&mut buf);
            data.extend_from_slice(&buf);
        }

        // Write to temporary file
        let mut file =
            File::create(&temp_path).map_err(|e| io_err("Failed to create temp file", e))?;
        file.write_all(&data)
            .map_err(|e| io_err("Failed to write data", e))?;
        file.sync_all()
            .map_err(|e| io_err("Failed to sync data", e))?;

        // Atomic rename
        fs::rename(&temp_path, &final_path)
            .map_err(|e| io_err("Failed to rename data file", e))?;

        tracing::debug!(file = file_name, bytes = data.len(), "store flushed");
        Ok(())
    }

    /// Loads all three stores from disk, replacing in-memory state.
    ///
    /// Every store is cleared first (full replace, not merge). Records
    /// are read in file order and re-inserted at each store's front, so
    /// load reverses the order save wrote; persisted iteration order is
    /// not stable across save/load cycles. A missing file leaves its
    /// store empty. A short final read is discarded as end-of-data.
    ///
    /// Uniqueness is not re-validated: a hand-edited file can introduce
    /// duplicate keys. Duplicates are logged at warn level but kept.
    ///
    /// # Arguments
    /// * `library` - Library aggregate to load into
    ///
    /// # Returns
    /// `Result<(), LibraryError>` indicating success or failure.
    pub fn load(&self, library: &mut Library) -> Result<(), LibraryError> {
        library.catalog.store_mut().clear();
        library.registry.store_mut().clear();
        library.ledger.store_mut().clear();

        let mut seen_isbns = HashSet::new();
        self.read_store::<Book, _>(BOOKS_FILE, |book| {
            if !seen_isbns.insert(book.isbn.clone()) {
                tracing::warn!(isbn = %book.isbn, "duplicate book key in data file");
            }
            library.catalog.store_mut().insert_front(book);
        })?;

        let mut seen_ids = HashSet::new();
        self.read_store::<Member, _>(MEMBERS_FILE, |member| {
            if !seen_ids.insert(member.id) {
                tracing::warn!(id = member.id, "duplicate member key in data file");
            }
            library.registry.store_mut().insert_front(member);
        })?;

        let mut seen_pairs = HashSet::new();
        self.read_store::<Loan, _>(LOANS_FILE, |loan| {
            if !seen_pairs.insert((loan.member_id, loan.isbn.clone())) {
                tracing::warn!(
                    member_id = loan.member_id,
                    isbn = %loan.isbn,
                    "duplicate loan key in data file"
                );
            }
            library.ledger.store_mut().insert_front(loan);
        })?;

        tracing::debug!(
            books = library.catalog.book_count(),
            members = library.registry.member_count(),
            loans = library.ledger.loan_count(),
            "library loaded"
        );
        Ok(())
    }

    /// Reads one store as fixed-size chunks until end-of-file.
    fn read_store<R, F>(&self, file_name: &str, mut insert: F) -> Result<(), LibraryError>
    where
        R: FixedRecord,
        F: FnMut(R),
    {
        let path = self.data_dir.join(file_name);
        let data = match fs::read(&path) {
            Ok(data) => data,
            // Missing file is an empty store, not an error
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(io_err("Failed to read data file", e)),
        };

        let usable = data.len() - data.len() % R::RECORD_SIZE;
        if usable != data.len() {
            tracing::warn!(
                file = file_name,
                trailing_bytes = data.len() - usable,
                "discarding partial trailing record"
            );
        }

        for chunk in data[..usable].chunks_exact(R::RECORD_SIZE) {
            insert(R::decode_from(chunk));
        }
        Ok(())
    }
}
