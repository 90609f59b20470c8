use std::collections::BTreeMap;

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use viskom_ml_core::datasets::{golf_table, GOLF_FEATURES, GOLF_TARGET};
use viskom_ml_core::id3::entropy::round_to;
use viskom_ml_core::id3::{self, information_gains, Id3Builder, VisualEdge, VisualNode};
use viskom_ml_core::{confidence, DecisionNode, Record, Table};

use crate::errors::{ApiError, ApiJson};

/// Attributes that count towards the loose confidence fallback.
const LOOSE_ATTRIBUTES: &[&str] = &["Outlook", "Temperature"];

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub tree_structure: DecisionNode,
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
    pub feature_importance: BTreeMap<String, f64>,
    pub accuracy: f64,
    pub dataset_size: usize,
}

#[derive(Debug, Deserialize)]
pub struct TrainRequest {
    pub data: Vec<Record>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    pub target: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GolfSample {
    pub outlook: String,
    pub temperature: String,
    pub humidity: String,
    pub windy: String,
}

impl GolfSample {
    fn into_record(self) -> Record {
        [
            ("Outlook", self.outlook),
            ("Temperature", self.temperature),
            ("Humidity", self.humidity),
            ("Windy", self.windy),
        ]
        .into_iter()
        .map(|(attribute, value)| (attribute.to_string(), value))
        .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub confidence: f64,
    pub input_features: Record,
}

fn train_table<S: AsRef<str>>(
    table: &Table,
    features: &[S],
    target: &str,
) -> Result<TrainResponse, ApiError> {
    let tree = Id3Builder::new(table, target)?.build(features)?;
    let graph = id3::serialize(&tree);
    let feature_importance = information_gains(table, features, target)?
        .into_iter()
        .collect();
    let accuracy = id3::accuracy(&tree, table, target)?;

    info!(
        rows = table.len(),
        nodes = graph.nodes.len(),
        root = tree.attribute().unwrap_or("<leaf>"),
        "trained decision tree"
    );

    Ok(TrainResponse {
        tree_structure: tree,
        nodes: graph.nodes,
        edges: graph.edges,
        feature_importance,
        accuracy,
        dataset_size: table.len(),
    })
}

pub async fn handle_train_golf() -> Result<Json<TrainResponse>, ApiError> {
    let table = golf_table();
    train_table(&table, GOLF_FEATURES, GOLF_TARGET).map(Json)
}

pub async fn handle_train(
    ApiJson(request): ApiJson<TrainRequest>,
) -> Result<Json<TrainResponse>, ApiError> {
    let table = Table::from_records(&request.data)?;
    let features = match request.features {
        Some(features) => features,
        None => Id3Builder::new(&table, &request.target)?.all_features(),
    };
    train_table(&table, &features, &request.target).map(Json)
}

pub async fn handle_predict(
    ApiJson(sample): ApiJson<GolfSample>,
) -> Result<Json<PredictResponse>, ApiError> {
    let table = golf_table();
    let tree = Id3Builder::new(&table, GOLF_TARGET)?.build(GOLF_FEATURES)?;
    let sample = sample.into_record();

    let prediction = id3::predict(&tree, &sample).to_string();
    let confidence = confidence(&table, GOLF_TARGET, &sample, &prediction, LOOSE_ATTRIBUTES)?;

    Ok(Json(PredictResponse {
        prediction,
        confidence: round_to(confidence, 2),
        input_features: sample,
    }))
}
