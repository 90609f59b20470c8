//! Decision tree produced by ID3 induction
//!
//! The JSON form mirrors the nested mapping the visualization frontend
//! renders: a leaf is a bare string, a split is
//! `{"<attribute>": {"<value>": <subtree>, ...}}`.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// A node of an ID3 decision tree.
///
/// Children of a split are keyed by attribute value and kept in lexicographic
/// order, which is also the order they were induced and serialized in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "NodeRepr")]
pub enum DecisionNode {
    /// Terminal node holding a class label.
    Leaf(String),
    /// Internal node splitting on `attribute`, one child per observed value.
    Split {
        attribute: String,
        children: BTreeMap<String, DecisionNode>,
    },
}

impl DecisionNode {
    pub fn leaf<S: Into<String>>(label: S) -> Self {
        DecisionNode::Leaf(label.into())
    }

    /// Split attribute, `None` for leaves.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            DecisionNode::Leaf(_) => None,
            DecisionNode::Split { attribute, .. } => Some(attribute),
        }
    }

    /// Number of split levels on the longest path (0 for a leaf).
    pub fn depth(&self) -> usize {
        match self {
            DecisionNode::Leaf(_) => 0,
            DecisionNode::Split { children, .. } => {
                1 + children.values().map(DecisionNode::depth).max().unwrap_or(0)
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            DecisionNode::Leaf(_) => 1,
            DecisionNode::Split { children, .. } => {
                children.values().map(DecisionNode::leaf_count).sum()
            }
        }
    }
}

impl Serialize for DecisionNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DecisionNode::Leaf(label) => serializer.serialize_str(label),
            DecisionNode::Split {
                attribute,
                children,
            } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(attribute, children)?;
                map.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NodeRepr {
    Leaf(String),
    Split(BTreeMap<String, BTreeMap<String, DecisionNode>>),
}

impl TryFrom<NodeRepr> for DecisionNode {
    type Error = String;

    fn try_from(repr: NodeRepr) -> Result<Self, Self::Error> {
        match repr {
            NodeRepr::Leaf(label) => Ok(DecisionNode::Leaf(label)),
            NodeRepr::Split(map) => {
                if map.len() != 1 {
                    return Err(format!(
                        "split node must have exactly one attribute, found {}",
                        map.len()
                    ));
                }
                let Some((attribute, children)) = map.into_iter().next() else {
                    return Err("split node must have exactly one attribute".to_string());
                };
                if children.is_empty() {
                    return Err(format!("split on '{attribute}' has no children"));
                }
                Ok(DecisionNode::Split {
                    attribute,
                    children,
                })
            }
        }
    }
}
