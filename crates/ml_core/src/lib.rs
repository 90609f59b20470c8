//! VisKom ML core - categorical learners for the teaching frontend
//!
//! Provides ID3 decision-tree induction with its visualization graph, a
//! manual and a fitted categorical Naive Bayes, and the small table model
//! they share. Everything runs synchronously over in-memory tables.

pub mod confidence;
pub mod datasets;
pub mod errors;
pub mod id3;
pub mod naive_bayes;
pub mod table;

pub use confidence::{confidence, DEFAULT_CONFIDENCE};
pub use errors::{MlError, Result};
pub use id3::{DecisionNode, Id3Builder, VisualGraph, UNKNOWN_LABEL};
pub use naive_bayes::{ManualCalculation, NaiveBayesModel};
pub use table::{Record, Table};
