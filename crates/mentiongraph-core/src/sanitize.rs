use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::models::{Cell, Table};

static SPECIAL_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("valid regex"));

/// Remove every character that is not an ASCII letter, ASCII digit or whitespace.
pub fn sanitize_text(value: &str) -> String {
    SPECIAL_CHARS_RE.replace_all(value, "").into_owned()
}

/// Sanitize the named columns in place.
///
/// Numbers and dates are converted to text first; missing values stay
/// missing. All fields are checked before any value is rewritten.
pub fn sanitize_columns(table: &mut Table, fields: &[&str]) -> Result<()> {
    for field in fields {
        table.column_index(field)?;
    }

    for field in fields {
        for cell in table.column_mut(field)? {
            if let Some(text) = cell.as_text() {
                *cell = Cell::Text(sanitize_text(&text));
            }
        }
    }
    Ok(())
}
