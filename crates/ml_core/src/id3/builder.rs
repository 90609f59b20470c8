//! ID3 tree builder
//!
//! Implements greedy top-down induction: every internal node splits on the
//! remaining feature with maximal information gain.
//!
//! Tie-breaking is fixed so trees are reproducible:
//! - between features with equal gain, the one listed first wins;
//! - between equally frequent labels, the lexicographically smallest wins;
//! - children are induced in lexicographic value order.

use std::collections::BTreeMap;

use crate::errors::{MlError, Result};
use crate::id3::entropy::subset_information_gain;
use crate::id3::tree::DecisionNode;
use crate::table::Table;

/// Induces ID3 trees over one table and target column.
pub struct Id3Builder<'a> {
    table: &'a Table,
    target: usize,
}

impl<'a> Id3Builder<'a> {
    pub fn new(table: &'a Table, target: &str) -> Result<Self> {
        let target = table.require_column("target", target)?;
        Ok(Self { table, target })
    }

    /// Every column except the target, in table order.
    pub fn all_features(&self) -> Vec<String> {
        self.table
            .columns()
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != self.target)
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Build a tree over the whole table.
    pub fn build<S: AsRef<str>>(&self, features: &[S]) -> Result<DecisionNode> {
        self.build_with_parent(features, None)
    }

    /// Build a tree over the whole table, falling back to `parent_majority`
    /// when `features` is empty.
    pub fn build_with_parent<S: AsRef<str>>(
        &self,
        features: &[S],
        parent_majority: Option<&str>,
    ) -> Result<DecisionNode> {
        let features = self.resolve_features(features)?;
        if self.table.is_empty() {
            return Err(MlError::InvalidInput(
                "cannot induce a tree from an empty table".to_string(),
            ));
        }

        let rows = self.table.all_rows();
        let tree = self.build_node(&rows, &rows, &features, parent_majority);
        tracing::debug!(
            rows = rows.len(),
            depth = tree.depth(),
            leaves = tree.leaf_count(),
            "induced ID3 tree"
        );
        Ok(tree)
    }

    fn resolve_features<S: AsRef<str>>(&self, features: &[S]) -> Result<Vec<usize>> {
        features
            .iter()
            .map(|feature| self.table.require_column("feature", feature.as_ref()))
            .collect()
    }

    /// Recursively build tree nodes.
    ///
    /// `parent_rows` are the rows of the node that produced `rows`; their
    /// majority labels an empty subset.
    fn build_node(
        &self,
        rows: &[usize],
        parent_rows: &[usize],
        features: &[usize],
        parent_majority: Option<&str>,
    ) -> DecisionNode {
        let counts = self.table.value_counts(self.target, rows);

        // Pure subset
        if counts.len() == 1 {
            if let Some(label) = counts.keys().next() {
                return DecisionNode::leaf(*label);
            }
        }

        // Empty subset
        if rows.is_empty() {
            let parent_counts = self.table.value_counts(self.target, parent_rows);
            return DecisionNode::leaf(majority(&parent_counts).unwrap_or_default());
        }

        let local_majority = majority(&counts).unwrap_or_default();

        // No features left
        if features.is_empty() {
            return DecisionNode::leaf(parent_majority.unwrap_or(local_majority));
        }

        let (best_feature, best_gain) = self.best_feature(rows, features);
        let attribute = &self.table.columns()[best_feature];
        tracing::trace!(
            attribute = attribute.as_str(),
            gain = best_gain,
            rows = rows.len(),
            "selected split"
        );

        let remaining: Vec<usize> = features
            .iter()
            .copied()
            .filter(|&f| f != best_feature)
            .collect();

        let mut children = BTreeMap::new();
        for value in self.table.value_counts(best_feature, rows).into_keys() {
            let subset = self.table.filter_rows(rows, best_feature, value);
            let child = self.build_node(&subset, rows, &remaining, Some(local_majority));
            children.insert(value.to_string(), child);
        }

        DecisionNode::Split {
            attribute: attribute.clone(),
            children,
        }
    }

    /// Feature with strictly maximal gain, first listed on ties.
    fn best_feature(&self, rows: &[usize], features: &[usize]) -> (usize, f64) {
        let mut best = (features[0], f64::NEG_INFINITY);
        for &feature in features {
            let gain = subset_information_gain(self.table, rows, feature, self.target);
            if gain > best.1 {
                best = (feature, gain);
            }
        }
        best
    }
}

/// Most frequent label, lexicographically smallest on ties.
fn majority<'t>(counts: &BTreeMap<&'t str, usize>) -> Option<&'t str> {
    let mut best: Option<(&str, usize)> = None;
    for (&label, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label)
}

/// Majority target label of a whole table.
pub fn majority_label(table: &Table, target: &str) -> Result<Option<String>> {
    let target = table.require_column("target", target)?;
    let counts = table.value_counts(target, &table.all_rows());
    Ok(majority(&counts).map(str::to_string))
}

/// ID3 induction in its textbook form.
///
/// `data` is the table to split, `original_data` labels `data` when it is
/// empty, and `parent_majority` labels the leaf when `features` is empty.
pub fn build<S: AsRef<str>>(
    data: &Table,
    original_data: &Table,
    features: &[S],
    target: &str,
    parent_majority: Option<&str>,
) -> Result<DecisionNode> {
    let builder = Id3Builder::new(data, target)?;
    if data.is_empty() {
        builder.resolve_features(features)?;
        return majority_label(original_data, target)?
            .map(DecisionNode::Leaf)
            .ok_or_else(|| {
                MlError::InvalidInput("cannot induce a tree from an empty table".to_string())
            });
    }
    builder.build_with_parent(features, parent_majority)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[(&str, &[&str])]) -> Table {
        Table::from_columns(columns).unwrap()
    }

    #[test]
    fn test_pure_table_is_leaf() {
        let a: &[&str] = &["x", "y", "z"];
        let y: &[&str] = &["Yes", "Yes", "Yes"];
        let data = table(&[("A", a), ("Y", y)]);

        let tree = Id3Builder::new(&data, "Y").unwrap().build(&["A"]).unwrap();
        assert_eq!(tree, DecisionNode::leaf("Yes"));

        let no_features: [&str; 0] = [];
        let tree = Id3Builder::new(&data, "Y").unwrap().build(&no_features).unwrap();
        assert_eq!(tree, DecisionNode::leaf("Yes"));
    }

    #[test]
    fn test_no_features_uses_parent_majority() {
        let a: &[&str] = &["x", "x", "x"];
        let y: &[&str] = &["No", "Yes", "Yes"];
        let data = table(&[("A", a), ("Y", y)]);
        let builder = Id3Builder::new(&data, "Y").unwrap();
        let no_features: [&str; 0] = [];

        let tree = builder.build_with_parent(&no_features, Some("Maybe")).unwrap();
        assert_eq!(tree, DecisionNode::leaf("Maybe"));

        // Without a parent the local majority is used.
        let tree = builder.build(&no_features).unwrap();
        assert_eq!(tree, DecisionNode::leaf("Yes"));
    }

    #[test]
    fn test_exhausted_features_fall_back_to_level_above() {
        // After splitting on A, the "x" subset is still mixed with no
        // features left, so it takes the root majority ("No").
        let a: &[&str] = &["x", "x", "y", "y", "y"];
        let y: &[&str] = &["Yes", "No", "No", "No", "No"];
        let data = table(&[("A", a), ("Y", y)]);

        let tree = Id3Builder::new(&data, "Y").unwrap().build(&["A"]).unwrap();
        let DecisionNode::Split { children, .. } = tree else {
            panic!("expected split");
        };
        assert_eq!(children["x"], DecisionNode::leaf("No"));
        assert_eq!(children["y"], DecisionNode::leaf("No"));
    }

    #[test]
    fn test_majority_tie_picks_smallest_label() {
        let counts = BTreeMap::from([("Yes", 2), ("No", 2), ("Maybe", 1)]);
        assert_eq!(majority(&counts), Some("No"));
        assert_eq!(majority(&BTreeMap::new()), None);
    }

    #[test]
    fn test_gain_tie_picks_first_feature() {
        let a: &[&str] = &["p", "q", "p", "q"];
        let b: &[&str] = &["p", "q", "p", "q"];
        let y: &[&str] = &["Yes", "No", "Yes", "No"];
        let data = table(&[("A", a), ("B", b), ("Y", y)]);
        let builder = Id3Builder::new(&data, "Y").unwrap();

        assert_eq!(builder.build(&["B", "A"]).unwrap().attribute(), Some("B"));
        assert_eq!(builder.build(&["A", "B"]).unwrap().attribute(), Some("A"));
    }

    #[test]
    fn test_children_cover_observed_values() {
        let a: &[&str] = &["c", "a", "b", "a"];
        let y: &[&str] = &["1", "2", "1", "2"];
        let data = table(&[("A", a), ("Y", y)]);

        let tree = Id3Builder::new(&data, "Y").unwrap().build(&["A"]).unwrap();
        let DecisionNode::Split { children, .. } = tree else {
            panic!("expected split");
        };
        let keys: Vec<_> = children.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_columns_rejected() {
        let a: &[&str] = &["x"];
        let y: &[&str] = &["Yes"];
        let data = table(&[("A", a), ("Y", y)]);

        assert!(matches!(
            Id3Builder::new(&data, "Class"),
            Err(MlError::InvalidInput(_))
        ));
        let err = Id3Builder::new(&data, "Y").unwrap().build(&["A", "B"]).unwrap_err();
        assert!(err.to_string().contains("feature column 'B'"));
        assert!(build(&data, &data, &["Z"], "Y", None).is_err());
    }

    #[test]
    fn test_empty_data_uses_original_majority() {
        let empty = Table::new(vec!["A".into(), "Y".into()], vec![]).unwrap();
        let a: &[&str] = &["x", "y", "z"];
        let y: &[&str] = &["No", "Yes", "Yes"];
        let original = table(&[("A", a), ("Y", y)]);

        let tree = build(&empty, &original, &["A"], "Y", None).unwrap();
        assert_eq!(tree, DecisionNode::leaf("Yes"));
        assert!(build(&empty, &empty, &["A"], "Y", None).is_err());
    }

    #[test]
    fn test_all_features_skip_target() {
        let a: &[&str] = &["x"];
        let y: &[&str] = &["Yes"];
        let b: &[&str] = &["z"];
        let data = table(&[("A", a), ("Y", y), ("B", b)]);

        let builder = Id3Builder::new(&data, "Y").unwrap();
        assert_eq!(builder.all_features(), vec!["A".to_string(), "B".to_string()]);
    }
}
