//! ID3 decision trees over categorical tables
//!
//! - [`entropy`]: entropy and information gain
//! - [`builder`]: recursive induction
//! - [`graph`]: node/edge flattening for the tree renderer
//! - [`predict`]: classification of new samples

pub mod builder;
pub mod entropy;
pub mod graph;
pub mod predict;
pub mod tree;

pub use builder::{build, majority_label, Id3Builder};
pub use entropy::{entropy, information_gain, information_gains};
pub use graph::{serialize, GraphBuilder, NodeKind, VisualEdge, VisualGraph, VisualNode};
pub use predict::{accuracy, predict, Sample, TableRow, UNKNOWN_LABEL};
pub use tree::DecisionNode;
