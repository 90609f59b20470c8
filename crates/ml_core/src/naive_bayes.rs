//! Categorical Naive Bayes with Laplace smoothing
//!
//! Two flavours are provided. [`manual_posterior`] reproduces the worked
//! classroom computation step by step (prior, likelihood, normalized
//! posterior) over whatever attributes the test case carries.
//! [`NaiveBayesModel`] is a fitted model over a declared feature list that
//! rejects values it never saw, the way an encoder-backed classifier does.
//!
//! Every conditional estimate is `(count + 1) / (class_rows + distinct_values)`.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::errors::{MlError, Result};
use crate::table::{Record, Table};

/// Step-by-step result of [`manual_posterior`].
#[derive(Debug, Clone, Serialize)]
pub struct ManualCalculation {
    pub prior: BTreeMap<String, f64>,
    pub likelihood: BTreeMap<String, f64>,
    pub posterior: BTreeMap<String, f64>,
    pub prediction: String,
}

fn smoothed(count: usize, class_rows: usize, distinct_values: usize) -> f64 {
    (count + 1) as f64 / (class_rows + distinct_values) as f64
}

/// Rows of each class, classes in first-seen order.
fn rows_by_class(table: &Table, target: usize) -> Vec<(&str, Vec<usize>)> {
    table
        .distinct_values(target)
        .into_iter()
        .map(|class| (class, table.filter_rows(&table.all_rows(), target, class)))
        .collect()
}

/// Posterior of every class for `test_case`, computed by hand.
pub fn manual_posterior(table: &Table, test_case: &Record, target: &str) -> Result<ManualCalculation> {
    let target = table.require_column("target", target)?;
    if table.is_empty() {
        return Err(MlError::InvalidInput("training data is empty".to_string()));
    }

    let attributes = test_case
        .iter()
        .map(|(attribute, value)| {
            table
                .require_column("feature", attribute)
                .map(|column| (column, value.as_str(), table.distinct_values(column).len()))
        })
        .collect::<Result<Vec<_>>>()?;

    let classes = rows_by_class(table, target);
    let mut scored = Vec::with_capacity(classes.len());
    for (class, rows) in &classes {
        let prior = rows.len() as f64 / table.len() as f64;
        let mut likelihood = 1.0;
        for &(column, value, distinct) in &attributes {
            let count = table.filter_rows(rows, column, value).len();
            likelihood *= smoothed(count, rows.len(), distinct);
        }
        scored.push((*class, prior, likelihood, prior * likelihood));
    }

    let total: f64 = scored.iter().map(|(_, _, _, joint)| joint).sum();
    let mut prediction: Option<(&str, f64)> = None;
    let mut calculation = ManualCalculation {
        prior: BTreeMap::new(),
        likelihood: BTreeMap::new(),
        posterior: BTreeMap::new(),
        prediction: String::new(),
    };

    for (class, prior, likelihood, joint) in scored {
        let posterior = joint / total;
        if prediction.map_or(true, |(_, best)| posterior > best) {
            prediction = Some((class, posterior));
        }
        calculation.prior.insert(class.to_string(), prior);
        calculation.likelihood.insert(class.to_string(), likelihood);
        calculation.posterior.insert(class.to_string(), posterior);
    }

    calculation.prediction = prediction
        .map(|(class, _)| class.to_string())
        .unwrap_or_default();
    tracing::debug!(prediction = %calculation.prediction, "computed manual posterior");
    Ok(calculation)
}

/// `feature -> class -> value -> P(value | class)` for every non-target column.
pub fn conditional_probabilities(
    table: &Table,
    target: &str,
) -> Result<BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>> {
    let target = table.require_column("target", target)?;
    let classes = rows_by_class(table, target);

    let mut result = BTreeMap::new();
    for (column, feature) in table.columns().iter().enumerate() {
        if column == target {
            continue;
        }
        let values = table.distinct_values(column);
        let mut per_class = BTreeMap::new();
        for (class, rows) in &classes {
            let probabilities = values
                .iter()
                .map(|&value| {
                    let count = table.filter_rows(rows, column, value).len();
                    (value.to_string(), smoothed(count, rows.len(), values.len()))
                })
                .collect();
            per_class.insert(class.to_string(), probabilities);
        }
        result.insert(feature.clone(), per_class);
    }

    Ok(result)
}

/// Distinct values of every column, in first-seen order.
pub fn feature_values(table: &Table) -> BTreeMap<String, Vec<String>> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(column, name)| {
            let values = table
                .distinct_values(column)
                .into_iter()
                .map(str::to_string)
                .collect();
            (name.clone(), values)
        })
        .collect()
}

#[derive(Debug, Clone)]
struct FeatureCounts {
    name: String,
    /// category -> per-class counts, indexed like `NaiveBayesModel::classes`
    categories: BTreeMap<String, Vec<usize>>,
}

/// Categorical Naive Bayes fitted over a fixed feature list.
#[derive(Debug, Clone)]
pub struct NaiveBayesModel {
    classes: Vec<String>,
    class_counts: Vec<usize>,
    total: usize,
    features: Vec<FeatureCounts>,
}

impl NaiveBayesModel {
    pub fn fit<S: AsRef<str>>(table: &Table, features: &[S], target: &str) -> Result<Self> {
        let target = table.require_column("target", target)?;
        if table.is_empty() {
            return Err(MlError::InvalidInput("training data is empty".to_string()));
        }

        let class_index: BTreeMap<&str, usize> = table
            .value_counts(target, &table.all_rows())
            .into_keys()
            .enumerate()
            .map(|(idx, class)| (class, idx))
            .collect();
        let mut class_counts = vec![0; class_index.len()];
        for row in 0..table.len() {
            class_counts[class_index[table.value(row, target)]] += 1;
        }

        let mut fitted = Vec::with_capacity(features.len());
        for feature in features {
            let name = feature.as_ref();
            let column = table.require_column("feature", name)?;
            let mut categories: BTreeMap<String, Vec<usize>> = BTreeMap::new();
            for row in 0..table.len() {
                let counts = categories
                    .entry(table.value(row, column).to_string())
                    .or_insert_with(|| vec![0; class_index.len()]);
                counts[class_index[table.value(row, target)]] += 1;
            }
            fitted.push(FeatureCounts {
                name: name.to_string(),
                categories,
            });
        }

        Ok(Self {
            classes: class_index.into_keys().map(str::to_string).collect(),
            class_counts,
            total: table.len(),
            features: fitted,
        })
    }

    /// Class labels in sorted order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Normalized class probabilities for `test_case`.
    pub fn predict_proba(&self, test_case: &Record) -> Result<BTreeMap<String, f64>> {
        let mut log_joint: Vec<f64> = self
            .class_counts
            .iter()
            .map(|&count| (count as f64 / self.total as f64).ln())
            .collect();

        for feature in &self.features {
            let value = test_case.get(&feature.name).ok_or_else(|| {
                MlError::InvalidInput(format!("test case is missing feature '{}'", feature.name))
            })?;
            let counts = feature.categories.get(value).ok_or_else(|| {
                MlError::InvalidInput(format!(
                    "Unknown value '{value}' for feature '{}'",
                    feature.name
                ))
            })?;
            for (class, score) in log_joint.iter_mut().enumerate() {
                let p = smoothed(counts[class], self.class_counts[class], feature.categories.len());
                *score += p.ln();
            }
        }

        // log-sum-exp normalization
        let max = log_joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let norm: f64 = log_joint.iter().map(|score| (score - max).exp()).sum();
        Ok(self
            .classes
            .iter()
            .zip(log_joint)
            .map(|(class, score)| (class.clone(), (score - max).exp() / norm))
            .collect())
    }

    /// Most probable class, the smallest label on ties.
    pub fn predict(&self, test_case: &Record) -> Result<String> {
        let probabilities = self.predict_proba(test_case)?;
        let mut best: Option<(&String, f64)> = None;
        for (class, &p) in &probabilities {
            if best.map_or(true, |(_, best_p)| p > best_p) {
                best = Some((class, p));
            }
        }
        Ok(best.map(|(class, _)| class.clone()).unwrap_or_default())
    }
}
