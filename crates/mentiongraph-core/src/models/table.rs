use std::fmt;
use std::ops::Range;

use chrono::NaiveDate;

use crate::error::{MentionGraphError, Result};

/// Canonical rendering of a calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One tabular value as loaded from a CSV or document-store source.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Missing,
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Text form of the value, `None` when the cell is missing.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

/// A record set: named columns and rows addressed by position.
///
/// The row index is the position in `rows`, so it is always contiguous from
/// zero and unique within the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Build a table of text cells. Empty strings become [`Cell::Missing`],
    /// the same way the CSV loader treats empty fields.
    pub fn from_text_rows(columns: &[&str], rows: &[&[&str]]) -> Result<Self> {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|value| {
                        if value.is_empty() {
                            Cell::Missing
                        } else {
                            Cell::text(*value)
                        }
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(columns, rows)
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(MentionGraphError::MalformedInput(format!(
                "row {} has {} values, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row positions, `0..len`.
    pub fn index(&self) -> Range<usize> {
        0..self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| MentionGraphError::MissingField(name.to_string()))
    }

    pub fn get(&self, row: usize, field: &str) -> Result<Option<&Cell>> {
        let col = self.column_index(field)?;
        Ok(self.rows.get(row).map(|r| &r[col]))
    }

    pub fn column<'a>(&'a self, name: &str) -> Result<impl Iterator<Item = &'a Cell> + use<'a>> {
        let col = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[col]))
    }

    pub fn column_mut<'a>(
        &'a mut self,
        name: &str,
    ) -> Result<impl Iterator<Item = &'a mut Cell> + use<'a>> {
        let col = self.column_index(name)?;
        Ok(self.rows.iter_mut().map(move |row| &mut row[col]))
    }
}
