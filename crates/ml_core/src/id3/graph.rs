//! Flattens a decision tree into the node/edge lists consumed by the 3D
//! tree renderer.
//!
//! Node ids equal the number of nodes emitted before them (depth-first,
//! pre-order). The renderer keys on these ids, so the emission order is
//! part of the contract.

use serde::{Deserialize, Serialize};

use crate::id3::tree::DecisionNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A split attribute.
    Decision,
    /// A class label.
    Leaf,
    /// An attribute value leading to a further split.
    Branch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualNode {
    pub id: usize,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub depth: usize,
    /// Class label, set on leaves only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualEdge {
    pub from: usize,
    pub to: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualGraph {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
}

/// Accumulates nodes and edges while walking a tree.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: VisualGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_node(&mut self, label: &str, kind: NodeKind, depth: usize) -> usize {
        let id = self.graph.nodes.len();
        let value = (kind == NodeKind::Leaf).then(|| label.to_string());
        self.graph.nodes.push(VisualNode {
            id,
            label: label.to_string(),
            kind,
            depth,
            value,
        });
        id
    }

    fn push_edge(&mut self, from: usize, to: usize, label: Option<&str>) {
        self.graph.edges.push(VisualEdge {
            from,
            to,
            label: label.map(str::to_string),
        });
    }

    /// Append `tree` below `parent` with its root at `depth`.
    pub fn append(&mut self, tree: &DecisionNode, parent: Option<usize>, depth: usize) {
        match tree {
            DecisionNode::Leaf(label) => {
                let leaf = self.push_node(label, NodeKind::Leaf, depth);
                if let Some(parent) = parent {
                    self.push_edge(parent, leaf, None);
                }
            }
            DecisionNode::Split {
                attribute,
                children,
            } => {
                let current = self.push_node(attribute, NodeKind::Decision, depth);
                if let Some(parent) = parent {
                    self.push_edge(parent, current, None);
                }

                for (value, child) in children {
                    if let DecisionNode::Leaf(label) = child {
                        let leaf = self.push_node(label, NodeKind::Leaf, depth + 1);
                        self.push_edge(current, leaf, Some(value));
                    } else {
                        let branch = self.push_node(value, NodeKind::Branch, depth + 1);
                        self.push_edge(current, branch, Some(value));
                        self.append(child, Some(branch), depth + 2);
                    }
                }
            }
        }
    }

    pub fn finish(self) -> VisualGraph {
        self.graph
    }
}

/// Serialize a tree into its visualization graph.
pub fn serialize(tree: &DecisionNode) -> VisualGraph {
    let mut builder = GraphBuilder::new();
    builder.append(tree, None, 0);
    builder.finish()
}
