use std::collections::BTreeMap;

use axum::Json;
use serde::{Deserialize, Serialize};
use viskom_ml_core::datasets::{
    naive_bayes_default_test, naive_bayes_table, NAIVE_BAYES_FEATURES, NAIVE_BAYES_TARGET,
};
use viskom_ml_core::naive_bayes::{conditional_probabilities, feature_values, manual_posterior};
use viskom_ml_core::{NaiveBayesModel, Record, Table};

use crate::errors::{ApiError, ApiJson};

#[derive(Debug, Deserialize)]
pub struct TrainPredictRequest {
    pub training_data: Vec<Record>,
    pub features: Vec<String>,
    pub target: String,
    pub test_case: Record,
}

#[derive(Debug, Serialize)]
pub struct ManualSummary {
    pub prior: BTreeMap<String, f64>,
    pub posterior: BTreeMap<String, f64>,
    pub prediction: String,
}

#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub probabilities: BTreeMap<String, f64>,
    pub prediction: String,
}

#[derive(Debug, Serialize)]
pub struct TrainPredictResponse {
    pub conditional_probabilities: BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>,
    pub dataset: Vec<Record>,
    pub test_case: Record,
    pub manual_calculation: ManualSummary,
    pub sklearn_calculation: ModelSummary,
    pub feature_values: BTreeMap<String, Vec<String>>,
    pub num_samples: usize,
}

#[derive(Debug, Serialize)]
pub struct DefaultDatasetResponse {
    pub data: Vec<Record>,
    pub features: Vec<String>,
    pub target: String,
    pub default_test: Record,
}

pub async fn handle_train_predict(
    ApiJson(request): ApiJson<TrainPredictRequest>,
) -> Result<Json<TrainPredictResponse>, ApiError> {
    let table = Table::from_records(&request.training_data)?;
    table.require_column("target", &request.target)?;
    for feature in &request.features {
        table.require_column("feature", feature)?;
    }

    let manual = manual_posterior(&table, &request.test_case, &request.target)?;
    let model = NaiveBayesModel::fit(&table, &request.features, &request.target)?;
    let probabilities = model.predict_proba(&request.test_case)?;
    let prediction = model.predict(&request.test_case)?;

    tracing::info!(
        rows = table.len(),
        manual = %manual.prediction,
        model = %prediction,
        "naive bayes prediction"
    );

    Ok(Json(TrainPredictResponse {
        conditional_probabilities: conditional_probabilities(&table, &request.target)?,
        feature_values: feature_values(&table),
        num_samples: table.len(),
        manual_calculation: ManualSummary {
            prior: manual.prior,
            posterior: manual.posterior,
            prediction: manual.prediction,
        },
        sklearn_calculation: ModelSummary {
            probabilities,
            prediction,
        },
        dataset: request.training_data,
        test_case: request.test_case,
    }))
}

pub async fn handle_default_dataset() -> Json<DefaultDatasetResponse> {
    Json(DefaultDatasetResponse {
        data: naive_bayes_table().to_records(),
        features: NAIVE_BAYES_FEATURES.iter().map(|f| f.to_string()).collect(),
        target: NAIVE_BAYES_TARGET.to_string(),
        default_test: naive_bayes_default_test(),
    })
}
