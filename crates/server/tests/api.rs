//! Router-level tests for the VisKom HTTP API

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use viskom_server::{build_router, AppState, ServerConfig};

fn app() -> Router {
    build_router(Arc::new(AppState::new(ServerConfig::default())))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|body| body.to_string())).await
}

/// Like [`send`], with the body passed through verbatim so key order survives.
async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(), Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "viskom-server");
}

#[tokio::test]
async fn test_train_golf() {
    let (status, body) = send(app(), Method::POST, "/decision-tree/train-golf", None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["tree_structure"]["Outlook"]["Overcast"], "Yes");
    assert_eq!(body["nodes"].as_array().unwrap().len(), 10);
    assert_eq!(body["edges"].as_array().unwrap().len(), 9);
    assert_eq!(body["nodes"][0]["type"], "decision");
    assert_eq!(body["nodes"][2]["type"], "branch");
    assert_eq!(body["feature_importance"]["Outlook"], 0.2467);
    assert_eq!(body["accuracy"], 1.0);
    assert_eq!(body["dataset_size"], 14);
}

#[tokio::test]
async fn test_predict_overcast() {
    let query = json!({
        "Outlook": "Overcast",
        "Temperature": "Hot",
        "Humidity": "High",
        "Windy": "False"
    });
    let (status, body) = send(app(), Method::POST, "/decision-tree/predict", Some(query.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "Yes");
    assert_eq!(body["confidence"], 0.67);
    assert_eq!(body["input_features"], query);
}

#[tokio::test]
async fn test_predict_confidence_rounds_half_to_even() {
    // No exact row; 5 of the 8 Rainy-or-Mild rows play.
    let query = json!({
        "Outlook": "Rainy",
        "Temperature": "Mild",
        "Humidity": "Low",
        "Windy": "False"
    });
    let (status, body) = send(app(), Method::POST, "/decision-tree/predict", Some(query)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "Yes");
    assert_eq!(body["confidence"], 0.62);
}

#[tokio::test]
async fn test_predict_unseen_value() {
    let query = json!({
        "Outlook": "Foggy",
        "Temperature": "Arctic",
        "Humidity": "High",
        "Windy": "True"
    });
    let (status, body) = send(app(), Method::POST, "/decision-tree/predict", Some(query)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "Unknown");
    // No row shares Outlook or Temperature.
    assert_eq!(body["confidence"], 0.5);
}

#[tokio::test]
async fn test_predict_missing_field_is_500() {
    let query = json!({"Outlook": "Sunny"});
    let (status, body) = send(app(), Method::POST, "/decision-tree/predict", Some(query)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("Temperature"));
}

#[tokio::test]
async fn test_train_generic_dataset() {
    let request = json!({
        "data": [
            {"Sky": "Sunny", "Wind": "Weak", "Go": "Yes"},
            {"Sky": "Sunny", "Wind": "Strong", "Go": "Yes"},
            {"Sky": "Rainy", "Wind": "Weak", "Go": "No"},
            {"Sky": "Rainy", "Wind": "Strong", "Go": "No"}
        ],
        "target": "Go"
    });
    let (status, body) = send(app(), Method::POST, "/decision-tree/train", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["tree_structure"],
        json!({"Sky": {"Rainy": "No", "Sunny": "Yes"}})
    );
    assert_eq!(body["feature_importance"]["Sky"], 1.0);
    assert_eq!(body["feature_importance"]["Wind"], 0.0);
    assert_eq!(body["dataset_size"], 4);
}

#[tokio::test]
async fn test_train_gain_tie_follows_column_order() {
    // Both features split perfectly; the first column wins.
    let request = r#"{
        "data": [
            {"Zeta": "p", "Alpha": "p", "Go": "Yes"},
            {"Zeta": "q", "Alpha": "q", "Go": "No"}
        ],
        "target": "Go"
    }"#;
    let (status, body) = send_raw(
        app(),
        Method::POST,
        "/decision-tree/train",
        Some(request.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["tree_structure"],
        json!({"Zeta": {"p": "Yes", "q": "No"}})
    );
}

#[tokio::test]
async fn test_train_missing_target_is_500() {
    let request = json!({
        "data": [{"Sky": "Sunny", "Go": "Yes"}],
        "target": "Play"
    });
    let (status, body) = send(app(), Method::POST, "/decision-tree/train", Some(request)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("'Play'"));
}

#[tokio::test]
async fn test_malformed_body_is_500() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/naive-bayes/train-predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["detail"].is_string());
}

async fn default_dataset() -> Value {
    let (status, body) = send(app(), Method::GET, "/api/naive-bayes/default-dataset", None).await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_default_dataset() {
    let body = default_dataset().await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["target"], "Beli");
    assert_eq!(body["features"], json!(["Penghasilan", "Pekerjaan", "Promo"]));
    assert_eq!(body["default_test"]["Pekerjaan"], "PNS");
}

#[tokio::test]
async fn test_naive_bayes_train_predict() {
    let dataset = default_dataset().await;
    let request = json!({
        "training_data": dataset["data"],
        "features": dataset["features"],
        "target": dataset["target"],
        "test_case": dataset["default_test"]
    });

    let (status, body) = send(app(), Method::POST, "/api/naive-bayes/train-predict", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["manual_calculation"]["prediction"], "Ya");
    assert_eq!(body["sklearn_calculation"]["prediction"], "Ya");
    assert_eq!(body["num_samples"], 10);
    assert_eq!(
        body["feature_values"]["Penghasilan"],
        json!(["Tinggi", "Sedang", "Rendah"])
    );

    let posterior = body["manual_calculation"]["posterior"]["Ya"].as_f64().unwrap();
    let model = body["sklearn_calculation"]["probabilities"]["Ya"].as_f64().unwrap();
    assert!((posterior - model).abs() < 1e-9);
    assert!((posterior - 0.8265).abs() < 1e-4);
    assert_eq!(body["conditional_probabilities"]["Promo"]["Ya"]["Tidak"], 0.125);
}

#[tokio::test]
async fn test_naive_bayes_unknown_value_is_500() {
    let dataset = default_dataset().await;
    let request = json!({
        "training_data": dataset["data"],
        "features": dataset["features"],
        "target": "Beli",
        "test_case": {"Penghasilan": "Sedang", "Pekerjaan": "Petani", "Promo": "Ada"}
    });

    let (status, body) = send(app(), Method::POST, "/api/naive-bayes/train-predict", Some(request)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["detail"],
        "invalid input: Unknown value 'Petani' for feature 'Pekerjaan'"
    );
}

#[tokio::test]
async fn test_frontend_fallback() {
    let dist = tempfile::tempdir().unwrap();
    std::fs::write(dist.path().join("index.html"), "<html>viskom</html>").unwrap();

    let config = ServerConfig {
        frontend_dist: Some(dist.path().to_path_buf()),
        ..ServerConfig::default()
    };
    let app = build_router(Arc::new(AppState::new(config)));

    let request = Request::builder()
        .uri("/naive-bayes")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<html>viskom</html>");

    // API routes still win over the fallback.
    let (status, body) = send(app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
