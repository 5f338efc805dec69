use chrono::NaiveDate;
use tracing::debug;

use crate::error::{MentionGraphError, Result};
use crate::models::{Cell, Table};

/// Formats tried in order. Slashed dates are read month-first, with
/// day-first as the fallback when the month would be out of range.
/// `%Y` only accepts four-digit years; two-digit years go through `%y`.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%d-%m-%Y",
    "%m/%d/%y",
    "%d/%m/%y",
    "%d-%m-%y",
];

/// Converts a column of mixed-format date strings into calendar dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateNormalizer {
    formats: Vec<String>,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self {
            formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl DateNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_formats<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// Parse one value with the first format that accepts it. A trailing
    /// time of day (`2020-01-01T10:00:00`, `2020-01-01 10:00`) is ignored.
    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        self.formats.iter().find_map(|format| {
            let (date, rest) = NaiveDate::parse_and_remainder(raw, format).ok()?;
            if !is_time_suffix(rest) {
                return None;
            }
            // chrono's %Y takes any digit count, so "12/31/19" would be year 19.
            let consumed = &raw[..raw.len() - rest.len()];
            if format.contains("%Y") && !has_four_digit_run(consumed) {
                return None;
            }
            Some(date)
        })
    }

    /// Replace every value of `field` with a [`Cell::Date`].
    ///
    /// Missing and blank values stay [`Cell::Missing`]. Any other value that
    /// no format accepts fails the whole call and leaves the table untouched.
    pub fn normalize_column(&self, table: &mut Table, field: &str) -> Result<()> {
        let mut parsed = Vec::with_capacity(table.len());
        for (row, cell) in table.column(field)?.enumerate() {
            parsed.push(self.normalize_cell(cell).ok_or_else(|| {
                MentionGraphError::UnparseableDate {
                    field: field.to_string(),
                    row,
                    value: cell.to_string(),
                }
            })?);
        }

        let count = parsed.len();
        for (cell, value) in table.column_mut(field)?.zip(parsed) {
            *cell = value;
        }
        debug!("normalized {count} values in column '{field}'");
        Ok(())
    }

    fn normalize_cell(&self, cell: &Cell) -> Option<Cell> {
        match cell {
            Cell::Missing => Some(Cell::Missing),
            Cell::Date(date) => Some(Cell::Date(*date)),
            Cell::Text(text) if text.trim().is_empty() => Some(Cell::Missing),
            other => self.parse(&other.to_string()).map(Cell::Date),
        }
    }
}

fn has_four_digit_run(text: &str) -> bool {
    text.split(|c: char| !c.is_ascii_digit())
        .any(|run| run.len() >= 4)
}

fn is_time_suffix(rest: &str) -> bool {
    match rest.strip_prefix(['T', ' ']) {
        None => rest.is_empty(),
        Some(time) => time.starts_with(|c: char| c.is_ascii_digit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DATE_FORMAT;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_mixed_formats() {
        let normalizer = DateNormalizer::new();
        assert_eq!(normalizer.parse("2023-01-01"), Some(ymd(2023, 1, 1)));
        assert_eq!(normalizer.parse("1 January 2020"), Some(ymd(2020, 1, 1)));
        assert_eq!(normalizer.parse("01/02/2019"), Some(ymd(2019, 1, 2)));
        assert_eq!(normalizer.parse("25/05/2020"), Some(ymd(2020, 5, 25)));
        assert_eq!(normalizer.parse(" 2020/03/04 "), Some(ymd(2020, 3, 4)));
        assert_eq!(normalizer.parse("2020-01-01T10:30:00"), Some(ymd(2020, 1, 1)));
        assert_eq!(normalizer.parse("2020-01-01 10:30"), Some(ymd(2020, 1, 1)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let normalizer = DateNormalizer::new();
        assert_eq!(normalizer.parse("not a date"), None);
        assert_eq!(normalizer.parse("2020-13-45"), None);
        assert_eq!(normalizer.parse("2020-01-01 trailing"), None);
    }

    #[test]
    fn test_normalize_column_renders_canonical() {
        let mut table = Table::from_text_rows(
            &["date", "column2"],
            &[&["2023-01-01", "a"], &["1 January 2020", "b"], &["", "c"]],
        )
        .unwrap();

        DateNormalizer::new().normalize_column(&mut table, "date").unwrap();
        assert_eq!(table.len(), 3);

        let rendered: Vec<String> = table.column("date").unwrap().map(Cell::to_string).collect();
        assert_eq!(rendered, vec!["2023-01-01", "2020-01-01", ""]);

        for cell in table.column("date").unwrap() {
            if let Some(date) = cell.as_date() {
                let text = date.format(DATE_FORMAT).to_string();
                assert_eq!(text.len(), 10);
                assert!(NaiveDate::parse_from_str(&text, DATE_FORMAT).is_ok());
            }
        }
        assert_eq!(table.get(1, "column2").unwrap(), Some(&Cell::text("b")));
    }

    #[test]
    fn test_unparseable_value_fails_whole_column() {
        let mut table =
            Table::from_text_rows(&["date"], &[&["2023-01-01"], &["someday"]]).unwrap();
        let before = table.clone();

        let err = DateNormalizer::new()
            .normalize_column(&mut table, "date")
            .unwrap_err();
        match err {
            MentionGraphError::UnparseableDate { field, row, value } => {
                assert_eq!(field, "date");
                assert_eq!(row, 1);
                assert_eq!(value, "someday");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(table, before);
    }

    #[test]
    fn test_normalize_is_repeatable() {
        let mut table = Table::from_text_rows(&["date"], &[&["2023-01-01"]]).unwrap();
        let normalizer = DateNormalizer::new();
        normalizer.normalize_column(&mut table, "date").unwrap();
        normalizer.normalize_column(&mut table, "date").unwrap();
        assert_eq!(table.get(0, "date").unwrap(), Some(&Cell::Date(ymd(2023, 1, 1))));
    }

    #[test]
    fn test_missing_field() {
        let mut table = Table::from_text_rows(&["when"], &[]).unwrap();
        let err = DateNormalizer::new()
            .normalize_column(&mut table, "date")
            .unwrap_err();
        assert!(matches!(err, MentionGraphError::MissingField(_)));
    }

    #[test]
    fn test_two_digit_years() {
        let normalizer = DateNormalizer::new();
        assert_eq!(normalizer.parse("12/31/19"), Some(ymd(2019, 12, 31)));
        assert_eq!(normalizer.parse("25/05/20"), Some(ymd(2020, 5, 25)));
        assert_eq!(normalizer.parse("01-02-20"), Some(ymd(2020, 2, 1)));
        assert_eq!(normalizer.parse("12/31/2019"), Some(ymd(2019, 12, 31)));
        assert_eq!(normalizer.parse("1 January 20"), None);
    }

    #[test]
    fn test_full_year_formats_reject_short_years() {
        let normalizer = DateNormalizer::with_formats(["%Y-%m-%d", "%m/%d/%Y"]);
        assert_eq!(normalizer.parse("20-01-02"), None);
        assert_eq!(normalizer.parse("12/31/19"), None);
        assert_eq!(normalizer.parse("12/31/19 10:30"), None);
        assert_eq!(normalizer.parse("2020-01-02"), Some(ymd(2020, 1, 2)));
    }

    #[test]
    fn test_custom_formats() {
        let normalizer = DateNormalizer::with_formats(["%d.%m.%Y"]);
        assert_eq!(normalizer.parse("03.04.2021"), Some(ymd(2021, 4, 3)));
        assert_eq!(normalizer.parse("2021-04-03"), None);
    }
}
