use tracing::debug;

use crate::error::{MentionGraphError, Result};
use crate::models::Table;

/// Concatenate two record sets describing the same corpus.
///
/// Rows of `tabular` come first, then rows of `document`, re-indexed from
/// zero. Both sides must carry the same field names; `document` rows are
/// re-ordered to the column order of `tabular`.
pub fn unify(tabular: &Table, document: &Table) -> Result<Table> {
    // An empty document array carries no columns at all.
    if document.columns().is_empty() && document.is_empty() {
        return Ok(tabular.clone());
    }

    let missing: Vec<String> = tabular
        .columns()
        .iter()
        .filter(|c| !document.has_column(c))
        .cloned()
        .collect();
    let unexpected: Vec<String> = document
        .columns()
        .iter()
        .filter(|c| !tabular.has_column(c))
        .cloned()
        .collect();
    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(MentionGraphError::ShapeMismatch {
            missing,
            unexpected,
        });
    }

    let layout = tabular
        .columns()
        .iter()
        .map(|c| document.column_index(c))
        .collect::<Result<Vec<usize>>>()?;

    let mut unified = tabular.clone();
    for row in document.rows() {
        unified.push_row(layout.iter().map(|&col| row[col].clone()).collect())?;
    }

    debug!(
        "unified {} tabular rows with {} document rows",
        tabular.len(),
        document.len()
    );
    Ok(unified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;

    #[test]
    fn test_two_plus_three_rows() {
        let csv = Table::from_text_rows(
            &["id", "title", "date", "journal"],
            &[&["1", "A", "2019-01-01", "J1"], &["2", "B", "2019-01-02", "J2"]],
        )
        .unwrap();
        let json = Table::from_text_rows(
            &["id", "title", "date", "journal"],
            &[
                &["3", "C", "2019-01-03", "J3"],
                &["4", "D", "2019-01-04", "J4"],
                &["5", "E", "2019-01-05", "J5"],
            ],
        )
        .unwrap();

        let unified = unify(&csv, &json).unwrap();
        assert_eq!(unified.len(), 5);
        assert_eq!(unified.index(), 0..5);

        let titles: Vec<String> = unified.column("title").unwrap().map(Cell::to_string).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let a = Table::from_text_rows(&["x"], &[&["1"]]).unwrap();
        let b = Table::from_text_rows(&["x"], &[&["2"]]).unwrap();
        let _ = unify(&a, &b).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_document_columns_are_reordered() {
        let csv = Table::from_text_rows(&["title", "journal"], &[&["A", "J1"]]).unwrap();
        let json = Table::from_text_rows(&["journal", "title"], &[&["J2", "B"]]).unwrap();

        let unified = unify(&csv, &json).unwrap();
        assert_eq!(unified.columns(), &["title".to_string(), "journal".to_string()]);
        assert_eq!(unified.get(1, "title").unwrap(), Some(&Cell::text("B")));
        assert_eq!(unified.get(1, "journal").unwrap(), Some(&Cell::text("J2")));
    }

    #[test]
    fn test_incompatible_columns_fail() {
        let csv = Table::from_text_rows(&["title", "date"], &[]).unwrap();
        let json = Table::from_text_rows(&["title", "journal"], &[]).unwrap();

        match unify(&csv, &json) {
            Err(MentionGraphError::ShapeMismatch {
                missing,
                unexpected,
            }) => {
                assert_eq!(missing, vec!["date"]);
                assert_eq!(unexpected, vec!["journal"]);
            }
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_document_array() {
        let csv = Table::from_text_rows(&["title"], &[&["A"]]).unwrap();
        let json = Table::default();
        assert_eq!(unify(&csv, &json).unwrap(), csv);
    }

    #[test]
    fn test_empty_document_side() {
        let csv = Table::from_text_rows(&["title"], &[&["A"]]).unwrap();
        let json = Table::new(vec!["title".to_string()]);
        assert_eq!(unify(&csv, &json).unwrap().len(), 1);
    }
}
