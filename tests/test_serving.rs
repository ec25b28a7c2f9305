//! Integration test: serving the shipped artifact pairs end to end
//! Tests: load artifacts → router → predict, plus startup failures

use housing_predict::artifacts::{ArtifactConfig, ArtifactStore, ArtifactSummary};
use housing_predict::inference::InferencePipeline;
use housing_predict::models::{DecisionTree, Estimator, ModelArtifact, RandomForest, TreeNode};
use housing_predict::preprocessing::Scaler;
use housing_predict::server::{create_router, run_server, AppState, ServerConfig};
use housing_predict::ArtifactError;
use std::path::PathBuf;
use std::sync::Arc;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

fn models_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models")
}

fn linear_config() -> ArtifactConfig {
    ArtifactConfig::new(models_dir().join("linear/model.json"))
}

fn scaled_config() -> ArtifactConfig {
    ArtifactConfig::new(models_dir().join("scaled/model.json"))
        .with_scaler(models_dir().join("scaled/scaler.json"))
}

fn reference_payload() -> Value {
    json!({
        "MedInc": 8.3252,
        "HouseAge": 41.0,
        "AveRooms": 6.984126984,
        "AveBedrms": 1.023809524,
        "Population": 322.0,
        "AveOccup": 2.555555556,
        "Latitude": 37.88,
        "Longitude": -122.23
    })
}

async fn predict_over_http(config: &ArtifactConfig, payload: Value) -> (StatusCode, Value) {
    let state = Arc::new(AppState::load(config).unwrap());
    let app = create_router(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 64).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// Shipped artifact pairs
// ============================================================================

#[tokio::test]
async fn test_linear_model_reference_prediction() {
    let (status, json) = predict_over_http(&linear_config(), reference_payload()).await;
    assert_eq!(status, StatusCode::OK);

    let prediction = json["prediction"].as_f64().expect("numeric prediction");
    assert!(prediction.is_finite());
    // Bay Area district with high income: roughly $413k
    assert!((prediction - 4.1316).abs() < 1e-3, "prediction = {}", prediction);
}

#[tokio::test]
async fn test_scaled_pair_reference_prediction() {
    let (status, json) = predict_over_http(&scaled_config(), reference_payload()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["prediction"].as_f64().unwrap().is_finite());
}

#[test]
fn test_scaled_and_raw_pairs_agree() {
    // The scaled pair is the raw model re-expressed on standardized inputs
    let fields = reference_payload().as_object().cloned().unwrap();
    let raw = ArtifactStore::open(&linear_config()).unwrap().pipeline();
    let scaled = ArtifactStore::open(&scaled_config()).unwrap().pipeline();

    let a = raw.predict(&fields).unwrap();
    let b = scaled.predict(&fields).unwrap();
    assert!((a - b).abs() < 1e-6, "raw {} vs scaled {}", a, b);
}

#[tokio::test]
async fn test_missing_field_with_real_model() {
    let mut payload = reference_payload();
    payload.as_object_mut().unwrap().remove("Longitude");

    let (status, json) = predict_over_http(&linear_config(), payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing required features: Longitude");
}

#[test]
fn test_predictions_are_deterministic() {
    let fields = reference_payload().as_object().cloned().unwrap();
    let pipeline = ArtifactStore::open(&scaled_config()).unwrap().pipeline();
    let first = pipeline.predict(&fields).unwrap();
    for _ in 0..100 {
        assert_eq!(pipeline.predict(&fields).unwrap(), first);
    }
}

// ============================================================================
// Forest artifacts written by a training job
// ============================================================================

#[tokio::test]
async fn test_random_forest_pair_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    let scaler_path = dir.path().join("scaler.json");

    // Split on standardized MedInc: above-average income districts are pricier
    let forest = RandomForest::new(vec![
        DecisionTree::new(TreeNode::split(0, 0.0, TreeNode::leaf(1.5), TreeNode::leaf(3.5))),
        DecisionTree::new(TreeNode::split(0, 1.0, TreeNode::leaf(2.0), TreeNode::leaf(4.5))),
    ]);
    ModelArtifact::new(Estimator::RandomForest(forest))
        .scaled()
        .save(&model_path)
        .unwrap();
    Scaler::load(models_dir().join("scaled/scaler.json"))
        .unwrap()
        .save(&scaler_path)
        .unwrap();

    let config = ArtifactConfig::new(&model_path).with_scaler(&scaler_path);
    let (status, json) = predict_over_http(&config, reference_payload()).await;
    assert_eq!(status, StatusCode::OK);
    // MedInc 8.3252 standardizes to ~2.34, right branch in both trees
    assert_eq!(json["prediction"].as_f64(), Some(4.0));
}

#[tokio::test]
async fn test_tree_split_beyond_input_returns_500() {
    // Bypasses the store, so nothing has checked the split index
    let forest = RandomForest::new(vec![DecisionTree::new(TreeNode::split(
        12,
        0.0,
        TreeNode::leaf(1.0),
        TreeNode::leaf(2.0),
    ))]);
    let model = Arc::new(ModelArtifact::new(Estimator::RandomForest(forest)));
    let summary = ArtifactSummary {
        model: model.kind().to_string(),
        expects_scaled_input: false,
        scaling: "identity".to_string(),
    };
    let state = Arc::new(AppState::new(InferencePipeline::new(model), summary));

    let response = create_router(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(Body::from(reference_payload().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 64).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("An internal error occurred"));
}

#[test]
fn test_from_parts_rejects_invalid_forest() {
    let forest = RandomForest::new(vec![DecisionTree::new(TreeNode::split(
        12,
        0.0,
        TreeNode::leaf(1.0),
        TreeNode::leaf(2.0),
    ))]);
    let mut model = ModelArtifact::new(Estimator::RandomForest(forest));
    model.feature_names.reverse();
    assert!(ArtifactStore::from_parts(model, None).is_err());
}

// ============================================================================
// Startup failures
// ============================================================================

#[test]
fn test_missing_model_file_fails_startup() {
    let config = ArtifactConfig::new("/nonexistent/model.json");
    assert!(matches!(AppState::load(&config), Err(ArtifactError::Io { .. })));
}

#[test]
fn test_corrupt_model_file_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, "{\"feature_names\": [\"MedInc\"").unwrap();

    let config = ArtifactConfig::new(&path);
    assert!(matches!(AppState::load(&config), Err(ArtifactError::Format { .. })));
}

#[test]
fn test_scaled_model_without_scaler_fails_startup() {
    let config = ArtifactConfig::new(models_dir().join("scaled/model.json"));
    assert!(matches!(
        AppState::load(&config),
        Err(ArtifactError::ScalingMismatch(_))
    ));
}

#[test]
fn test_raw_model_with_scaler_fails_startup() {
    let config = linear_config().with_scaler(models_dir().join("scaled/scaler.json"));
    assert!(matches!(
        AppState::load(&config),
        Err(ArtifactError::ScalingMismatch(_))
    ));
}

#[tokio::test]
async fn test_run_server_refuses_to_start_without_artifacts() {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        artifacts: ArtifactConfig::new("/nonexistent/model.json"),
    };

    // Must return instead of serving forever
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), run_server(config))
        .await
        .expect("run_server should fail fast when artifacts are missing");
    let err = result.unwrap_err();
    assert!(err.downcast_ref::<ArtifactError>().is_some());
}
