use chrono::NaiveDate;

use super::table::Table;
use crate::error::Result;

pub const DATE_FIELD: &str = "date";
pub const JOURNAL_FIELD: &str = "journal";

/// Typed view of one source document.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub row_index: usize,
    /// `None` when the title cell is missing; such records never match.
    pub title: Option<String>,
    /// `None` when the date is missing or was never normalized.
    pub date: Option<NaiveDate>,
    pub journal: String,
}

/// Ordered, index-addressable collection of records from one corpus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    /// Read `title_field`, `date` and `journal` out of every row of `table`.
    pub fn from_table(table: &Table, title_field: &str) -> Result<Self> {
        Self::from_columns(table, title_field, DATE_FIELD, JOURNAL_FIELD)
    }

    pub fn from_columns(
        table: &Table,
        title_field: &str,
        date_field: &str,
        journal_field: &str,
    ) -> Result<Self> {
        let title_col = table.column_index(title_field)?;
        let date_col = table.column_index(date_field)?;
        let journal_col = table.column_index(journal_field)?;

        let records = table
            .rows()
            .iter()
            .enumerate()
            .map(|(row_index, row)| Record {
                row_index,
                title: row[title_col].as_text(),
                date: row[date_col].as_date(),
                journal: row[journal_col].to_string(),
            })
            .collect();

        Ok(Self { records })
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(row_index, record)| Record { row_index, ..record })
            .collect();
        Self { records }
    }

    pub fn get(&self, row_index: usize) -> Option<&Record> {
        self.records.get(row_index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Record {
    pub fn new(title: impl Into<String>, date: Option<NaiveDate>, journal: impl Into<String>) -> Self {
        Self {
            row_index: 0,
            title: Some(title.into()),
            date,
            journal: journal.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::table::Cell;

    #[test]
    fn test_from_table_reads_typed_fields() {
        let mut table = Table::from_text_rows(
            &["id", "scientific_title", "date", "journal"],
            &[&["NCT1", "Trial A", "", "J1"], &["NCT2", "", "", ""]],
        )
        .unwrap();
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        *table.column_mut("date").unwrap().next().unwrap() = Cell::Date(date);

        let corpus = Corpus::from_table(&table, "scientific_title").unwrap();
        assert_eq!(corpus.len(), 2);

        let first = corpus.get(0).unwrap();
        assert_eq!(first.title.as_deref(), Some("Trial A"));
        assert_eq!(first.date, Some(date));
        assert_eq!(first.journal, "J1");

        let second = corpus.get(1).unwrap();
        assert_eq!(second.row_index, 1);
        assert_eq!(second.title, None);
        assert_eq!(second.date, None);
        assert_eq!(second.journal, "");
    }

    #[test]
    fn test_from_table_requires_title_field() {
        let table = Table::from_text_rows(&["title", "date", "journal"], &[]).unwrap();
        assert!(Corpus::from_table(&table, "scientific_title").is_err());
    }

    #[test]
    fn test_from_records_assigns_row_indices() {
        let corpus = Corpus::from_records(vec![
            Record::new("a", None, "J"),
            Record::new("b", None, "J"),
        ]);
        let indices: Vec<usize> = corpus.iter().map(|r| r.row_index).collect();
        assert_eq!(indices, vec![0, 1]);
    }
}
