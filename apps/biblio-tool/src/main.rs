//! CLI for managing books, members, and loans.
//!
//! Loads the library from the data directory, runs one command, and
//! saves after any mutation. All prompting, parsing, and formatting
//! lives here; the core engine never touches the console.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};

use biblio_core::clock::SystemClock;
use biblio_core::config::BibConfig;
use biblio_core::model::{Book, Member};
use biblio_core::persistence::PersistenceManager;
use biblio_core::Library;

/// Command-line arguments for the library tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory for persistence
    #[arg(long, default_value = "./data")]
    data_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage the book catalog
    #[command(subcommand)]
    Book(BookCommand),
    /// Manage the member registry
    #[command(subcommand)]
    Member(MemberCommand),
    /// Manage loans
    #[command(subcommand)]
    Loan(LoanCommand),
    /// Look up a book by ISBN and report the scan time
    FindBook {
        /// ISBN to search for
        isbn: String,
    },
}

#[derive(Subcommand, Debug)]
enum BookCommand {
    /// Add a book to the catalog
    Add {
        #[arg(long)]
        isbn: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        copies: u32,
    },
    /// List all books
    List,
    /// Remove a book by ISBN
    Remove { isbn: String },
}

#[derive(Subcommand, Debug)]
enum MemberCommand {
    /// Register a member
    Add {
        #[arg(long)]
        id: u32,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        program: String,
    },
    /// List all members
    List,
    /// Remove a member by ID
    Remove { id: u32 },
}

#[derive(Subcommand, Debug)]
enum LoanCommand {
    /// Check a book out to a member
    Checkout { member_id: u32, isbn: String },
    /// Return a borrowed book
    Return { member_id: u32, isbn: String },
    /// List all active loans
    List,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let config = BibConfig {
        data_dir: PathBuf::from(&args.data_dir),
        ..Default::default()
    };
    let persistence = PersistenceManager::new(&config);

    let mut library = Library::new();
    persistence.load(&mut library)?;

    let mutated = run_command(&args.command, &mut library)?;
    if mutated {
        persistence.save(&library)?;
    }

    Ok(())
}

/// Executes one command. Returns whether the library was mutated.
fn run_command(command: &Command, library: &mut Library) -> Result<bool> {
    match command {
        Command::Book(BookCommand::Add {
            isbn,
            title,
            author,
            year,
            copies,
        }) => {
            library.catalog.add_book(Book {
                isbn: isbn.clone(),
                title: title.clone(),
                author: author.clone(),
                year: *year,
                copies: *copies,
            })?;
            println!("Book added.");
            Ok(true)
        }
        Command::Book(BookCommand::List) => {
            if library.catalog.book_count() == 0 {
                println!("(empty)");
            }
            for b in library.catalog.books() {
                println!(
                    "ISBN: {} | {} | {} | Year: {} | Copies: {}",
                    b.isbn, b.title, b.author, b.year, b.copies
                );
            }
            Ok(false)
        }
        Command::Book(BookCommand::Remove { isbn }) => {
            library.catalog.remove_book(isbn)?;
            println!("Book removed.");
            Ok(true)
        }
        Command::Member(MemberCommand::Add { id, name, program }) => {
            library.registry.add_member(Member {
                id: *id,
                name: name.clone(),
                program: program.clone(),
            })?;
            println!("Member added.");
            Ok(true)
        }
        Command::Member(MemberCommand::List) => {
            if library.registry.member_count() == 0 {
                println!("(empty)");
            }
            for m in library.registry.members() {
                println!("ID: {} | {} | {}", m.id, m.name, m.program);
            }
            Ok(false)
        }
        Command::Member(MemberCommand::Remove { id }) => {
            library.registry.remove_member(*id)?;
            println!("Member removed.");
            Ok(true)
        }
        Command::Loan(LoanCommand::Checkout { member_id, isbn }) => {
            let loan = library.checkout(*member_id, isbn, &SystemClock)?;
            println!("Loan created. Date: {}", loan.date);
            Ok(true)
        }
        Command::Loan(LoanCommand::Return { member_id, isbn }) => {
            library.return_book(*member_id, isbn)?;
            println!("Return recorded.");
            Ok(true)
        }
        Command::Loan(LoanCommand::List) => {
            if library.ledger.loan_count() == 0 {
                println!("(empty)");
            }
            for l in library.ledger.loans() {
                println!("Member ID: {} | ISBN: {} | Date: {}", l.member_id, l.isbn, l.date);
            }
            Ok(false)
        }
        Command::FindBook { isbn } => {
            let start = Instant::now();
            let found = library.catalog.find_book(isbn);
            let elapsed = start.elapsed();

            match found {
                Some(book) => println!(
                    "Found: {} ({:.3} ms)",
                    book.title,
                    elapsed.as_secs_f64() * 1000.0
                ),
                None => println!("Not found ({:.3} ms)", elapsed.as_secs_f64() * 1000.0),
            }
            Ok(false)
        }
    }
}
