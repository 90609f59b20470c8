//! Entropy and information gain over categorical columns
//!
//! All results are rounded to [`DECIMALS`] decimal digits, and the weighted
//! term of the gain is computed from the already-rounded subset entropies.

use std::collections::BTreeMap;

use crate::errors::Result;
use crate::table::Table;

/// Decimal digits kept by [`entropy`] and [`information_gain`].
pub const DECIMALS: i32 = 4;

/// Round to `decimals` digits, halves to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

fn entropy_from_counts<I>(counts: I, total: usize) -> f64
where
    I: IntoIterator<Item = usize>,
{
    if total == 0 {
        return 0.0;
    }

    let mut value = 0.0;
    for count in counts {
        let p = count as f64 / total as f64;
        if p > 0.0 {
            value -= p * p.log2();
        }
    }

    // A single class yields -0.0.
    round_to(value, DECIMALS) + 0.0
}

/// Shannon entropy (base 2) of a label sequence.
pub fn entropy<S: AsRef<str>>(labels: &[S]) -> f64 {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label.as_ref()).or_insert(0) += 1;
    }
    entropy_from_counts(counts.into_values(), labels.len())
}

/// Entropy of the `target` column restricted to `rows`.
pub(crate) fn subset_entropy(table: &Table, rows: &[usize], target: usize) -> f64 {
    entropy_from_counts(table.value_counts(target, rows).into_values(), rows.len())
}

/// Information gain of splitting `rows` on `attribute`.
pub(crate) fn subset_information_gain(
    table: &Table,
    rows: &[usize],
    attribute: usize,
    target: usize,
) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }

    let total_entropy = subset_entropy(table, rows, target);
    let mut weighted_entropy = 0.0;
    for (value, count) in table.value_counts(attribute, rows) {
        let subset = table.filter_rows(rows, attribute, value);
        weighted_entropy += (count as f64 / rows.len() as f64) * subset_entropy(table, &subset, target);
    }

    let gain = round_to(total_entropy - weighted_entropy, DECIMALS);
    // Rounded subset entropies can leave a vanishing gain a hair below zero.
    if gain <= 0.0 {
        0.0
    } else {
        gain
    }
}

/// Information gain of `attribute` with respect to `target` over the whole table.
pub fn information_gain(table: &Table, attribute: &str, target: &str) -> Result<f64> {
    let target = table.require_column("target", target)?;
    let attribute = table.require_column("feature", attribute)?;
    Ok(subset_information_gain(table, &table.all_rows(), attribute, target))
}

/// Information gain of every feature, in the order given.
pub fn information_gains<S: AsRef<str>>(
    table: &Table,
    features: &[S],
    target: &str,
) -> Result<Vec<(String, f64)>> {
    features
        .iter()
        .map(|feature| {
            let feature = feature.as_ref();
            information_gain(table, feature, target).map(|gain| (feature.to_string(), gain))
        })
        .collect()
}
