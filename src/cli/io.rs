//! Line and JSON I/O for the CLI front ends
//!
//! All functions take the reader/writer explicitly so the shell and serve
//! loops can be driven from in-memory buffers.

use std::io::{BufRead, Write};

use serde_json::Value;

use crate::catalog::Book;

use super::errors::CliResult;

/// Read one line, trimmed. `None` at end of input.
pub fn read_line<R: BufRead>(reader: &mut R) -> CliResult<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Print a prompt and read the answer
pub fn prompt<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> CliResult<Option<String>> {
    write!(writer, "{}", label)?;
    writer.flush()?;
    read_line(reader)
}

/// Write a success response line
pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_json_line(writer, &response)
}

/// Write an error response line
pub fn write_error<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_json_line(writer, &response)
}

fn write_json_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

const HEADERS: [&str; 6] = ["ID", "Title", "Author", "Publication Year", "Genre", "Price"];

/// Render books as a `|`-separated table with aligned columns
pub fn render_books(books: &[Book]) -> String {
    let rows: Vec<[String; 6]> = books
        .iter()
        .map(|b| {
            [
                b.id.to_string(),
                b.title.clone(),
                b.authors.join(", "),
                b.publication_year.clone(),
                b.genre.clone(),
                b.price.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &widths, HEADERS.iter().copied());
    for row in &rows {
        push_row(&mut out, &widths, row.iter().map(String::as_str));
    }
    out
}

fn push_row<'a>(out: &mut String, widths: &[usize; 6], cells: impl Iterator<Item = &'a str>) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AddBookRequest, InMemoryInventory, Inventory};
    use std::io::Cursor;

    #[test]
    fn test_read_line_trims_and_detects_eof() {
        let mut input = Cursor::new("  Dune \n");
        assert_eq!(read_line(&mut input).unwrap(), Some("Dune".to_string()));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_prompt_writes_label() {
        let mut input = Cursor::new("Fiction\n");
        let mut output = Vec::new();

        let answer = prompt(&mut input, &mut output, "Enter genre: ").unwrap();

        assert_eq!(answer.as_deref(), Some("Fiction"));
        assert_eq!(String::from_utf8(output).unwrap(), "Enter genre: ");
    }

    #[test]
    fn test_response_lines_are_json() {
        let mut output = Vec::new();
        write_response(&mut output, serde_json::json!({"removed": "1"})).unwrap();
        write_error(&mut output, "CATALOG_NO_MATCH", "nothing").unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0]["status"], "ok");
        assert_eq!(lines[0]["data"]["removed"], "1");
        assert_eq!(lines[1]["status"], "error");
        assert_eq!(lines[1]["code"], "CATALOG_NO_MATCH");
    }

    #[test]
    fn test_render_books_aligns_columns() {
        let store = InMemoryInventory::new();
        let outcomes = store
            .add(vec![
                AddBookRequest::new("A Very Long Title", &["Ann", "Bo"], "Fiction")
                    .with_publication_year("2001")
                    .with_price("9.99"),
                AddBookRequest::new("Short", &["Cy"], "Poetry"),
            ])
            .unwrap();
        let books: Vec<Book> = outcomes.iter().filter_map(|o| o.book().cloned()).collect();

        let table = render_books(&books);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID | Title"));
        assert!(lines[1].contains("Ann, Bo"));
        let title_col = lines[0].find("| Author").unwrap();
        assert_eq!(lines[1].find("| Ann").unwrap(), title_col);
        assert_eq!(lines[2].find("| Cy").unwrap(), title_col);
    }
}
