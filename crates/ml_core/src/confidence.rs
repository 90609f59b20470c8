//! Agreement between a prediction and the historical rows that resemble the
//! query.
//!
//! Rows matching every sample attribute are consulted first; when there are
//! none, rows matching any of the loose attributes are used; with no match at
//! all the confidence is [`DEFAULT_CONFIDENCE`].

use crate::errors::Result;
use crate::table::{Record, Table};

pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Share of matching rows whose `target` equals `prediction`.
pub fn confidence<S: AsRef<str>>(
    table: &Table,
    target: &str,
    sample: &Record,
    prediction: &str,
    loose_attributes: &[S],
) -> Result<f64> {
    let target = table.require_column("target", target)?;
    let exact_columns = sample
        .iter()
        .map(|(attribute, value)| {
            table
                .require_column("feature", attribute)
                .map(|column| (column, value.as_str()))
        })
        .collect::<Result<Vec<_>>>()?;
    let loose_columns = loose_attributes
        .iter()
        .map(|attribute| {
            let attribute = attribute.as_ref();
            table
                .require_column("feature", attribute)
                .map(|column| (column, sample.get(attribute).map(String::as_str)))
        })
        .collect::<Result<Vec<_>>>()?;

    let exact: Vec<usize> = (0..table.len())
        .filter(|&row| {
            exact_columns
                .iter()
                .all(|&(column, value)| table.value(row, column) == value)
        })
        .collect();
    if !exact.is_empty() {
        return Ok(agreement(table, &exact, target, prediction));
    }

    let loose: Vec<usize> = (0..table.len())
        .filter(|&row| {
            loose_columns
                .iter()
                .any(|&(column, value)| Some(table.value(row, column)) == value)
        })
        .collect();
    if !loose.is_empty() {
        return Ok(agreement(table, &loose, target, prediction));
    }

    Ok(DEFAULT_CONFIDENCE)
}

fn agreement(table: &Table, rows: &[usize], target: usize, prediction: &str) -> f64 {
    let agreeing = rows
        .iter()
        .filter(|&&row| table.value(row, target) == prediction)
        .count();
    agreeing as f64 / rows.len() as f64
}
