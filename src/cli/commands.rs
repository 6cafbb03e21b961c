//! CLI command implementations
//!
//! Each front end builds one record store from the configuration, wraps it in
//! a `Library`, and talks to it only through the library or the `Inventory`
//! trait.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::catalog::{AddBookRequest, AddOutcome, InMemoryInventory, Inventory, StoreError};
use crate::library::{Library, LibraryError};
use crate::observability::{log_event, log_event_with_fields, Event};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{prompt, read_line, render_books, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    match cmd {
        Command::Shell { config } => {
            let store = open(config.as_deref())?;
            shell(&Library::new(store), &mut input, &mut output)
        }
        Command::Serve { config } => {
            let store = open(config.as_deref())?;
            serve(store, &mut input, &mut output)
        }
        Command::Demo { config } => {
            let store = open(config.as_deref())?;
            demo(&Library::new(store), &mut output)
        }
    }
}

fn open(config_path: Option<&Path>) -> CliResult<Arc<InMemoryInventory>> {
    let config = Config::load_or_default(config_path)?;
    Ok(Arc::new(config.open_store()?))
}

// =============================================================================
// Interactive shell
// =============================================================================

const MENU: &str = "\nSelect an option:
1. Add a book
2. Remove a book
3. Search books by author
4. Search books by title
5. Search books by genre
6. Display all books
7. Exit
";

/// Menu-driven shell. Returns at end of input or on the exit option.
///
/// Operation failures are printed and the loop continues; only I/O errors end
/// the session early.
pub fn shell<R: BufRead, W: Write>(library: &Library, input: &mut R, output: &mut W) -> CliResult<()> {
    log_event(Event::ShellStart);
    writeln!(output, "Welcome to the Library Management System!")?;

    loop {
        write!(output, "{}", MENU)?;
        let Some(choice) = prompt(input, output, "Enter your choice: ")? else {
            break;
        };

        let step = match choice.as_str() {
            "1" => shell_add(library, input, output),
            "2" => shell_remove(library, input, output),
            "3" => shell_search(library, input, output, "author"),
            "4" => shell_search(library, input, output, "title"),
            "5" => shell_search(library, input, output, "genre"),
            "6" => shell_list(library, output),
            "7" => {
                writeln!(output, "Exiting...")?;
                break;
            }
            _ => {
                writeln!(output, "Invalid choice. Please try again.")?;
                Ok(true)
            }
        };

        // Ok(false) means input ran out mid-prompt
        if !step? {
            break;
        }
    }

    log_event(Event::ShellExit);
    Ok(())
}

/// Prompt for a value; `None` at end of input
macro_rules! ask {
    ($input:expr, $output:expr, $label:expr) => {
        match prompt($input, $output, $label)? {
            Some(v) => v,
            None => return Ok(false),
        }
    };
}

fn shell_add<R: BufRead, W: Write>(library: &Library, input: &mut R, output: &mut W) -> CliResult<bool> {
    writeln!(output, "Adding a new book:")?;
    let title = ask!(input, output, "Enter title: ");
    let authors = ask!(input, output, "Enter author(s), comma separated: ");
    let year = ask!(input, output, "Enter publication year: ");
    let genre = ask!(input, output, "Enter genre: ");
    let price = ask!(input, output, "Enter price: ");

    let request = AddBookRequest {
        title,
        authors: split_authors(&authors),
        price,
        publication_year: year,
        genre,
    };

    match library.add(vec![request]) {
        Ok(outcomes) => match outcomes.first() {
            Some(AddOutcome::Added(book)) => writeln!(output, "Book added successfully with ID {}", book.id)?,
            Some(AddOutcome::Duplicate { title, existing }) => writeln!(
                output,
                "Book '{}' is already in the library (ID {})",
                title, existing
            )?,
            None => {}
        },
        Err(e) => writeln!(output, "Error adding book: {}: {}", e, e.store_error())?,
    }
    Ok(true)
}

fn shell_remove<R: BufRead, W: Write>(library: &Library, input: &mut R, output: &mut W) -> CliResult<bool> {
    writeln!(output, "Removing a book:")?;
    let title = ask!(input, output, "Enter title of the book to remove: ");

    match library.remove(&title) {
        Ok(_) => writeln!(output, "Book removed successfully")?,
        Err(e) => writeln!(output, "Error removing book: {}: {}", e, e.store_error())?,
    }
    Ok(true)
}

fn shell_search<R: BufRead, W: Write>(
    library: &Library,
    input: &mut R,
    output: &mut W,
    field: &str,
) -> CliResult<bool> {
    writeln!(output, "Searching books by {}:", field)?;
    let value = ask!(input, output, &format!("Enter {}: ", field));

    let found = match field {
        "author" => library.search_by_author(&value),
        "genre" => library.search_by_genre(&value),
        _ => library.search_by_title(&value).map(|b| vec![b]),
    };

    match found {
        Ok(books) => write!(output, "{}", render_books(&books))?,
        Err(e) => writeln!(output, "Error searching for books: {}: {}", e, e.store_error())?,
    }
    Ok(true)
}

fn shell_list<W: Write>(library: &Library, output: &mut W) -> CliResult<bool> {
    writeln!(output, "Displaying all books:")?;
    let books = library.all_books()?;
    if books.is_empty() {
        writeln!(output, "No books in the library at the moment!")?;
    } else {
        write!(output, "{}", render_books(&books))?;
    }
    Ok(true)
}

/// Split a comma-separated author list, dropping blanks
pub fn split_authors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// JSON-lines serve loop
// =============================================================================

/// One serve request line
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Add { books: Vec<AddBookRequest> },
    Remove { title: String },
    Search { attribute: String, value: String },
    List,
    Stats,
}

/// Serve requests until end of input.
///
/// A malformed line or a failed operation produces an error response and the
/// loop continues; only I/O errors stop it.
pub fn serve<R: BufRead, W: Write>(
    store: Arc<InMemoryInventory>,
    input: &mut R,
    output: &mut W,
) -> CliResult<()> {
    let library = Library::new(store.clone());
    log_event(Event::Serving);

    while let Some(line) = read_line(input)? {
        if line.is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let err = CliError::bad_request(e.to_string());
                log_event_with_fields(Event::RequestRejected, &[("reason", err.message())]);
                write_error(output, err.code_str(), err.message())?;
                continue;
            }
        };

        match handle_request(&store, &library, request) {
            Ok(data) => write_response(output, data)?,
            Err((code, message)) => write_error(output, code, &message)?,
        }
    }

    Ok(())
}

fn handle_request(
    store: &InMemoryInventory,
    library: &Library,
    request: Request,
) -> Result<Value, (&'static str, String)> {
    let library_failure = |e: LibraryError| (e.code(), format!("{}: {}", e, e.store_error()));
    let store_failure = |e: StoreError| (e.code(), e.to_string());

    match request {
        Request::Add { books } => {
            let outcomes = library.add(books).map_err(library_failure)?;
            Ok(json!(outcomes))
        }
        Request::Remove { title } => {
            let book = library.remove(&title).map_err(library_failure)?;
            Ok(json!({ "removed": book }))
        }
        Request::Search { attribute, value } => {
            let books = store.search(&attribute, &value).map_err(store_failure)?;
            Ok(json!(books))
        }
        Request::List => {
            let books = library.all_books().map_err(library_failure)?;
            Ok(json!(books))
        }
        Request::Stats => {
            let books = store.len().map_err(store_failure)?;
            let indexes = store.index_stats().map_err(store_failure)?;
            Ok(json!({
                "books": books,
                "removal_policy": store.removal_policy(),
                "indexes": indexes,
                "metrics": store.metrics(),
            }))
        }
    }
}

// =============================================================================
// Demo
// =============================================================================

/// Scripted walkthrough: add, search each way, remove, search again
pub fn demo<W: Write>(library: &Library, output: &mut W) -> CliResult<()> {
    log_event(Event::DemoStart);

    let outcomes = library.add(vec![
        AddBookRequest::new("Book1", &["Author1", "Author2"], "Fiction")
            .with_price("101")
            .with_publication_year("2021"),
        AddBookRequest::new("Book2", &["Author2"], "Non-Fiction")
            .with_price("1299")
            .with_publication_year("2020"),
        AddBookRequest::new("Book1", &["Author3"], "Poetry"),
    ])?;
    let added = outcomes.iter().filter(|o| !o.is_duplicate()).count();
    writeln!(
        output,
        "Added {} books ({} duplicate skipped)",
        added,
        outcomes.len() - added
    )?;

    writeln!(output, "\nAll books:")?;
    write!(output, "{}", render_books(&library.all_books()?))?;

    writeln!(output, "\nBooks in genre 'Fiction':")?;
    write!(output, "{}", render_books(&library.search_by_genre("Fiction")?))?;

    writeln!(output, "\nBooks by 'Author2':")?;
    write!(output, "{}", render_books(&library.search_by_author("Author2")?))?;

    writeln!(output, "\nBook titled 'Book2':")?;
    write!(output, "{}", render_books(&[library.search_by_title("Book2")?]))?;

    let removed = library.remove("Book1")?;
    writeln!(output, "\nRemoved '{}' (ID {})", removed.title, removed.id)?;

    match library.search_by_title("Book1") {
        Ok(_) => writeln!(output, "'Book1' is unexpectedly still present")?,
        Err(e) => writeln!(output, "Searching for 'Book1' again: {}", e.store_error())?,
    }

    writeln!(output, "\nBooks by 'Author2' after removal:")?;
    write!(output, "{}", render_books(&library.search_by_author("Author2")?))?;

    log_event(Event::DemoComplete);
    Ok(())
}
