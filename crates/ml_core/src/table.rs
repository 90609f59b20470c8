//! Categorical table model
//!
//! Every learner in this crate reads from a [`Table`]: ordered column names
//! plus rows of string values. Tables are built from column-major literals,
//! JSON-style row records, or CSV text with a header row, and are never
//! mutated afterwards. Subsets are expressed as row-index slices so that
//! recursive learners never copy rows.

use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;

use crate::errors::{MlError, Result};

/// A single row expressed as attribute name -> value, in insertion order.
pub type Record = IndexMap<String, String>;

/// Immutable table of categorical values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from column names and row-major values.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(MlError::InvalidInput(format!(
                    "duplicate column '{name}'"
                )));
            }
        }

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(MlError::InvalidInput(format!(
                    "row {}: expected {} values, got {}",
                    idx + 1,
                    columns.len(),
                    row.len()
                )));
            }
        }

        Ok(Self { columns, rows })
    }

    /// Build a table from column-major literals, e.g. an embedded dataset.
    pub fn from_columns(columns: &[(&str, &[&str])]) -> Result<Self> {
        let height = columns.first().map(|(_, values)| values.len()).unwrap_or(0);
        if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != height) {
            return Err(MlError::InvalidInput(format!(
                "column '{name}' has {} values, expected {height}",
                values.len()
            )));
        }

        let names = columns.iter().map(|(name, _)| name.to_string()).collect();
        let rows = (0..height)
            .map(|row| {
                columns
                    .iter()
                    .map(|(_, values)| values[row].to_string())
                    .collect()
            })
            .collect();

        Self::new(names, rows)
    }

    /// Build a table from row records.
    ///
    /// Columns appear in the order they are first seen; every record must
    /// carry every column.
    pub fn from_records(records: &[Record]) -> Result<Self> {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let mut row = Vec::with_capacity(columns.len());
            for name in &columns {
                let value = record.get(name).ok_or_else(|| {
                    MlError::InvalidInput(format!("row {}: missing value for '{name}'", idx + 1))
                })?;
                row.push(value.clone());
            }
            rows.push(row);
        }

        Self::new(columns, rows)
    }

    /// Load a table from CSV text with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }

        if rows.is_empty() {
            return Err(MlError::Dataset("dataset is empty".to_string()));
        }

        Self::new(columns, rows)
    }

    /// Load a table from a CSV file with a header row.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref()).map_err(|err| {
            MlError::Dataset(format!(
                "failed to open {}: {err}",
                path.as_ref().display()
            ))
        })?;
        Self::from_csv_reader(file)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Resolve a column or fail with an `InvalidInput` naming its role.
    pub fn require_column(&self, kind: &str, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| MlError::missing_column(kind, name))
    }

    pub fn value(&self, row: usize, column: usize) -> &str {
        &self.rows[row][column]
    }

    /// Every row index, in order.
    pub fn all_rows(&self) -> Vec<usize> {
        (0..self.rows.len()).collect()
    }

    /// Values of one column restricted to `rows`.
    pub fn column_values(&self, column: usize, rows: &[usize]) -> Vec<&str> {
        rows.iter().map(|&row| self.value(row, column)).collect()
    }

    /// Rows from `rows` whose `column` equals `value`.
    pub fn filter_rows(&self, rows: &[usize], column: usize, value: &str) -> Vec<usize> {
        rows.iter()
            .copied()
            .filter(|&row| self.value(row, column) == value)
            .collect()
    }

    /// Distinct values of a column over `rows` with their counts, in
    /// lexicographic order.
    pub fn value_counts(&self, column: usize, rows: &[usize]) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for &row in rows {
            *counts.entry(self.value(row, column)).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct values of a column in first-seen order.
    pub fn distinct_values(&self, column: usize) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|row| row[column].as_str())
            .filter(|value| seen.insert(*value))
            .collect()
    }

    /// Row `row` as a record.
    pub fn record(&self, row: usize) -> Record {
        self.columns
            .iter()
            .cloned()
            .zip(self.rows[row].iter().cloned())
            .collect()
    }

    pub fn to_records(&self) -> Vec<Record> {
        (0..self.rows.len()).map(|row| self.record(row)).collect()
    }
}
