//! Tree traversal for classification

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::errors::Result;
use crate::id3::tree::DecisionNode;
use crate::table::Table;

/// Label returned when a sample reaches a split with a value (or attribute)
/// the tree never saw at that point.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Anything that can answer "what is the value of attribute X".
pub trait Sample {
    fn attribute_value(&self, attribute: &str) -> Option<&str>;
}

impl Sample for BTreeMap<String, String> {
    fn attribute_value(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).map(String::as_str)
    }
}

impl Sample for IndexMap<String, String> {
    fn attribute_value(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).map(String::as_str)
    }
}

impl Sample for HashMap<String, String> {
    fn attribute_value(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).map(String::as_str)
    }
}

/// One row of a table viewed as a sample.
#[derive(Clone, Copy, Debug)]
pub struct TableRow<'a> {
    pub table: &'a Table,
    pub row: usize,
}

impl Sample for TableRow<'_> {
    fn attribute_value(&self, attribute: &str) -> Option<&str> {
        self.table
            .column_index(attribute)
            .map(|column| self.table.value(self.row, column))
    }
}

/// Classify `sample`, falling back to [`UNKNOWN_LABEL`] on unseen values.
pub fn predict<'t, S: Sample + ?Sized>(tree: &'t DecisionNode, sample: &S) -> &'t str {
    let mut node = tree;
    loop {
        match node {
            DecisionNode::Leaf(label) => return label,
            DecisionNode::Split {
                attribute,
                children,
            } => {
                let child = sample
                    .attribute_value(attribute)
                    .and_then(|value| children.get(value));
                match child {
                    Some(child) => node = child,
                    None => return UNKNOWN_LABEL,
                }
            }
        }
    }
}

/// Fraction of rows whose prediction matches their `target` value.
pub fn accuracy(tree: &DecisionNode, table: &Table, target: &str) -> Result<f64> {
    let target = table.require_column("target", target)?;
    if table.is_empty() {
        return Ok(0.0);
    }

    let correct = (0..table.len())
        .filter(|&row| predict(tree, &TableRow { table, row }) == table.value(row, target))
        .count();
    Ok(correct as f64 / table.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn humidity_tree() -> DecisionNode {
        DecisionNode::Split {
            attribute: "Humidity".into(),
            children: BTreeMap::from([
                ("High".to_string(), DecisionNode::leaf("No")),
                ("Normal".to_string(), DecisionNode::leaf("Yes")),
            ]),
        }
    }

    fn sample(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_leaf_predicts_label() {
        let tree = DecisionNode::leaf("Yes");
        assert_eq!(predict(&tree, &sample(&[])), "Yes");
    }

    #[test]
    fn test_walks_split() {
        let tree = humidity_tree();
        assert_eq!(predict(&tree, &sample(&[("Humidity", "High")])), "No");
        assert_eq!(predict(&tree, &sample(&[("Humidity", "Normal")])), "Yes");
    }

    #[test]
    fn test_unseen_value_is_unknown() {
        let tree = humidity_tree();
        assert_eq!(predict(&tree, &sample(&[("Humidity", "Low")])), UNKNOWN_LABEL);
        assert_eq!(predict(&tree, &sample(&[("Outlook", "Sunny")])), UNKNOWN_LABEL);
    }

    #[test]
    fn test_hash_map_sample() {
        let tree = humidity_tree();
        let mut sample = HashMap::new();
        sample.insert("Humidity".to_string(), "Normal".to_string());
        assert_eq!(predict(&tree, &sample), "Yes");
    }

    #[test]
    fn test_accuracy() {
        let humidity: &[&str] = &["High", "Normal", "Normal", "Low"];
        let play: &[&str] = &["No", "Yes", "No", "No"];
        let table = Table::from_columns(&[("Humidity", humidity), ("Play", play)]).unwrap();

        let score = accuracy(&humidity_tree(), &table, "Play").unwrap();
        assert!((score - 0.5).abs() < 1e-12);
        assert!(accuracy(&humidity_tree(), &table, "Class").is_err());
    }
}
