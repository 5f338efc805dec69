//! File loaders for the source tables and the graph writer.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::{MentionGraphError, Result};
use crate::models::{Cell, MentionGraph, Table};

/// Load a CSV file with a header row. Every value is text; empty fields are
/// [`Cell::Missing`].
pub fn read_csv_table(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let columns = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(columns);
    for result in reader.records() {
        let record = result?;
        table.push_row(
            record
                .iter()
                .map(|value| {
                    if value.is_empty() {
                        Cell::Missing
                    } else {
                        Cell::text(value)
                    }
                })
                .collect(),
        )?;
    }
    Ok(table)
}

/// Load a document-store file (a JSON array of objects).
pub fn read_json_table(path: &Path) -> Result<Table> {
    let contents = fs::read_to_string(path)?;
    parse_json_table(&contents)
}

/// Parse a JSON array of objects into a table. Columns are the union of all
/// keys in first-seen order; absent keys are [`Cell::Missing`].
pub fn parse_json_table(contents: &str) -> Result<Table> {
    let value: Value = serde_json::from_str(contents)?;
    let Value::Array(items) = value else {
        return Err(MentionGraphError::MalformedInput(
            "document store must be a JSON array".to_string(),
        ));
    };

    let mut objects = Vec::with_capacity(items.len());
    let mut columns: Vec<String> = Vec::new();
    for (idx, item) in items.into_iter().enumerate() {
        let Value::Object(object) = item else {
            return Err(MentionGraphError::MalformedInput(format!(
                "document {idx} is not a JSON object"
            )));
        };
        for key in object.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(object);
    }

    let mut table = Table::new(columns.clone());
    for mut object in objects {
        table.push_row(
            columns
                .iter()
                .map(|column| object.remove(column).map(json_cell).unwrap_or_default())
                .collect(),
        )?;
    }
    Ok(table)
}

fn json_cell(value: Value) -> Cell {
    match value {
        Value::Null => Cell::Missing,
        Value::String(text) if text.is_empty() => Cell::Missing,
        Value::String(text) => Cell::Text(text),
        Value::Number(number) => match number.as_i64() {
            Some(int) => Cell::Integer(int),
            None => number.as_f64().map(Cell::Float).unwrap_or_default(),
        },
        other => Cell::Text(other.to_string()),
    }
}

/// Read the ordered drug names from the `field` column of a vocabulary CSV.
/// A blank name is malformed input: every row must become a graph key.
pub fn read_vocabulary(path: &Path, field: &str) -> Result<Vec<String>> {
    let table = read_csv_table(path)?;
    table
        .column(field)?
        .enumerate()
        .map(|(row, cell)| {
            cell.as_text()
                .filter(|name| !name.trim().is_empty())
                .ok_or_else(|| {
                    MentionGraphError::MalformedInput(format!(
                        "blank {field} in {} at row {row}",
                        path.display()
                    ))
                })
        })
        .collect()
}

/// Write the graph as pretty JSON with `indent` spaces per level.
pub fn write_graph(path: &Path, graph: &MentionGraph, indent: usize) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, graph_to_json(graph, indent)?)?;
    Ok(())
}

pub fn graph_to_json(graph: &MentionGraph, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    graph.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(String::from_utf8(buf)?)
}

pub fn read_graph(path: &Path) -> Result<MentionGraph> {
    let contents = fs::read_to_string(path)?;
    let graph: MentionGraph = serde_json::from_str(&contents)?;
    Ok(graph)
}
