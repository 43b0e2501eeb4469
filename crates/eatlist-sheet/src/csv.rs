//! Lexer for the published sheet's CSV export.
//!
//! Purely lexical: no header handling, no fixed row width. Malformed quoting
//! never errors; an unterminated quote swallows the rest of the input into
//! the current field.

/// Splits `text` into rows of raw cells.
///
/// Outside quotes, `,` ends a field, `\n` ends a row and `\r` is dropped.
/// Inside quotes every character is literal except `"`: a doubled `""` yields
/// one quote, a lone `"` closes the quoted section. A final row without a
/// trailing newline is still returned.
#[must_use]
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            '\r' => {}
            other => field.push(other),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
