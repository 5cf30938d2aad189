use crate::sds::domain::{EntryValue, TransportInfoColumn, ValueEntry};
use std::collections::{BTreeSet, HashMap};

/// One display row of the pivoted transport table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRow {
    /// `default_literal` shared by every entry on this row
    pub row_key: String,
    /// Row header; empty once any column flagged the row as a sentinel
    pub label: String,
    /// One cell per column, `""` where the column has no entry
    pub cells: Vec<String>,
    /// Column indices whose cell came from a sentinel flag
    pub sentinel_cells: BTreeSet<usize>,
}

impl PivotRow {
    fn new(row_key: &str, width: usize) -> Self {
        Self {
            row_key: row_key.to_string(),
            label: row_key.to_string(),
            cells: vec![String::new(); width],
            sentinel_cells: BTreeSet::new(),
        }
    }
}

/// Row-oriented view of transport information
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PivotTable {
    pub columns: Vec<String>,
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// MatrixPivot turns column-oriented transport records into a display matrix.
///
/// Columns keep their input order (duplicates included) and rows appear in
/// the order their key is first seen while scanning columns left to right.
pub struct MatrixPivot;

impl MatrixPivot {
    pub fn transform(columns: &[TransportInfoColumn]) -> PivotTable {
        let labels: Vec<String> = columns.iter().map(|c| c.tag.clone()).collect();
        let width = labels.len();

        let mut rows: Vec<PivotRow> = Vec::new();
        let mut index_by_key: HashMap<&str, usize> = HashMap::new();

        for (column, info) in columns.iter().enumerate() {
            for entry in &info.entries {
                let row_index = *index_by_key
                    .entry(entry.default_literal.as_str())
                    .or_insert_with(|| {
                        rows.push(PivotRow::new(&entry.default_literal, width));
                        rows.len() - 1
                    });
                Self::fill_cell(&mut rows[row_index], column, entry);
            }
        }

        PivotTable {
            columns: labels,
            rows,
        }
    }

    fn fill_cell(row: &mut PivotRow, column: usize, entry: &ValueEntry) {
        let (cell, sentinel) = match (entry.sentinel(), &entry.value) {
            (Some(_), EntryValue::Flag(true)) => (entry.default_literal.clone(), true),
            (Some(_), _) => (String::new(), false),
            (None, EntryValue::Text(text)) => (text.clone(), false),
            (None, _) => (String::new(), false),
        };

        row.cells[column] = cell;
        if sentinel {
            row.sentinel_cells.insert(column);
            row.label.clear();
        } else {
            row.sentinel_cells.remove(&column);
        }
    }
}
