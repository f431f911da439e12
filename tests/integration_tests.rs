// Integration tests for the prediction pipeline

use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use study_technique::core::{CategoryLexicon, Predictor};
use study_technique::models::{ApiResponse, ErrorClass, ExplanationPrompt, FeatureVector, PredictRequest, TechniqueCode};
use study_technique::routes::{self, AppState};
use study_technique::services::{
    ClassifierError, ExplanationError, ExplanationService, KnnClassifier, TechniqueClassifier, TrainingSample,
};

/// Classifier double returning a fixed code and counting calls
struct StubClassifier {
    code: u32,
    calls: AtomicUsize,
    last_features: Mutex<Option<Vec<u32>>>,
}

impl StubClassifier {
    fn returning(code: u32) -> Arc<Self> {
        Arc::new(Self {
            code,
            calls: AtomicUsize::new(0),
            last_features: Mutex::new(None),
        })
    }
}

impl TechniqueClassifier for StubClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<TechniqueCode, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_features.lock().unwrap() = Some(features.as_slice().to_vec());
        Ok(TechniqueCode(self.code))
    }
}

struct FailingClassifier;

impl TechniqueClassifier for FailingClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<TechniqueCode, ClassifierError> {
        Err(ClassifierError::DimensionMismatch {
            expected: 8,
            actual: features.len(),
        })
    }
}

/// Explanation double recording prompts, optionally failing
struct StubExplainer {
    fail: bool,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubExplainer {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ExplanationService for StubExplainer {
    async fn generate(&self, prompt: &ExplanationPrompt) -> Result<String, ExplanationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.as_str().to_string());
        if self.fail {
            return Err(ExplanationError::ApiError {
                status: 503,
                message: "model overloaded".to_string(),
            });
        }
        Ok("Pomodoro membagi waktu belajar menjadi sesi pendek.".to_string())
    }
}

fn ana_payload() -> Value {
    json!({
        "nama": "Ana",
        "email": "a@x.com",
        "GayaBelajar": 2,
        "Suasana": 0,
        "Durasi": 1,
        "Interval": 0,
        "Tujuan": 1,
        "Kesulitan": 2,
        "Pemahaman": 1
    })
}

fn request(payload: Value) -> PredictRequest {
    serde_json::from_value(payload).unwrap()
}

fn predictor(classifier: Arc<dyn TechniqueClassifier>, explainer: Arc<dyn ExplanationService>) -> Predictor {
    Predictor::new(Arc::new(CategoryLexicon::standard()), classifier, explainer)
}

#[tokio::test]
async fn test_end_to_end_pomodoro() {
    let classifier = StubClassifier::returning(3);
    let explainer = StubExplainer::ok();
    let predictor = predictor(classifier.clone(), explainer.clone());

    let resp = predictor.handle(&request(ana_payload())).await;

    assert_eq!(resp.status_code(), 200);
    let json = resp.to_json();
    assert_eq!(json["MetodeBelajar"], "Pomodoro");
    assert!(!json["Alasan"].as_str().unwrap().is_empty());

    assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        classifier.last_features.lock().unwrap().clone(),
        Some(vec![2, 0, 1, 0, 1, 2, 1])
    );

    assert_eq!(explainer.calls.load(Ordering::SeqCst), 1);
    let prompts = explainer.prompts.lock().unwrap();
    let prompt = &prompts[0];
    for expected in [
        "Visual",
        "Individual",
        "Sedang (40 - 50 Menit)",
        "Ya",
        "Jangka Pendek (Ujian)",
        "Sedang",
        "Tinggi",
        "Pomodoro",
        "Ana",
        "a@x.com",
    ] {
        assert!(prompt.contains(expected), "prompt missing {:?}", expected);
    }
}

#[tokio::test]
async fn test_every_valid_payload_succeeds() {
    let predictor = predictor(StubClassifier::returning(0), StubExplainer::ok());

    for gaya in 0..3 {
        for durasi in 0..3 {
            for tujuan in 0..4 {
                let mut payload = ana_payload();
                payload["GayaBelajar"] = json!(gaya);
                payload["Durasi"] = json!(durasi.to_string());
                payload["Tujuan"] = json!(tujuan);

                match predictor.handle(&request(payload)).await {
                    ApiResponse::Success(resp) => {
                        assert!(!resp.technique_name.is_empty());
                        assert!(!resp.explanation.is_empty());
                    }
                    other => panic!("expected success, got {:?}", other),
                }
            }
        }
    }
}

#[tokio::test]
async fn test_missing_email_makes_no_external_calls() {
    let classifier = StubClassifier::returning(3);
    let explainer = StubExplainer::ok();
    let predictor = predictor(classifier.clone(), explainer.clone());

    let mut payload = ana_payload();
    payload.as_object_mut().unwrap().remove("email");

    let resp = predictor.handle(&request(payload)).await;

    match &resp {
        ApiResponse::Failure { class, body } => {
            assert_eq!(*class, ErrorClass::Client);
            assert!(body.error.contains("email"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(resp.status_code(), 400);
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    assert_eq!(explainer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_any_missing_field_is_client_error() {
    let classifier = StubClassifier::returning(3);
    let explainer = StubExplainer::ok();
    let predictor = predictor(classifier.clone(), explainer.clone());

    for key in study_technique::models::REQUIRED_FIELDS {
        let mut payload = ana_payload();
        payload.as_object_mut().unwrap().remove(key);

        let resp = predictor.handle(&request(payload)).await;
        assert_eq!(resp.status_code(), 400, "removing {} should be a client error", key);
    }

    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    assert_eq!(explainer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_out_of_range_code_identifies_field() {
    let classifier = StubClassifier::returning(3);
    let predictor = predictor(classifier.clone(), StubExplainer::ok());

    let mut payload = ana_payload();
    payload["GayaBelajar"] = json!(7);

    let resp = predictor.handle(&request(payload)).await;

    assert_eq!(resp.status_code(), 400);
    assert!(resp.to_json()["error"].as_str().unwrap().contains("GayaBelajar"));
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_explanation_failure_is_server_error() {
    let classifier = StubClassifier::returning(3);
    let explainer = StubExplainer::failing();
    let predictor = predictor(classifier.clone(), explainer.clone());

    let resp = predictor.handle(&request(ana_payload())).await;

    assert_eq!(resp.status_code(), 500);
    let json = resp.to_json();
    assert!(json.get("MetodeBelajar").is_none());
    assert!(json.get("Alasan").is_none());
    assert!(json["error"].as_str().unwrap().contains("model overloaded"));
    assert_eq!(explainer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_classifier_failure_is_server_error() {
    let explainer = StubExplainer::ok();
    let predictor = predictor(Arc::new(FailingClassifier), explainer.clone());

    let resp = predictor.handle(&request(ana_payload())).await;

    assert_eq!(resp.status_code(), 500);
    assert_eq!(explainer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_knn_pipeline() {
    let samples = vec![
        TrainingSample { features: vec![2, 0, 1, 0, 1, 2, 1], label: 3 },
        TrainingSample { features: vec![0, 1, 0, 1, 3, 0, 2], label: 5 },
    ];
    let knn = KnnClassifier::new(1, samples).unwrap();
    let predictor = predictor(Arc::new(knn), StubExplainer::ok());

    let resp = predictor.handle(&request(ana_payload())).await;

    assert_eq!(resp.to_json()["MetodeBelajar"], "Pomodoro");
}

fn app_state(classifier: Arc<dyn TechniqueClassifier>, explainer: Arc<dyn ExplanationService>) -> AppState {
    AppState {
        predictor: predictor(classifier, explainer),
    }
}

#[actix_web::test]
async fn test_http_predict_success() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(StubClassifier::returning(3), StubExplainer::ok())))
            .app_data(routes::json_config())
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post().uri("/predict").set_json(ana_payload()).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["MetodeBelajar"], "Pomodoro");
    assert!(body["Alasan"].is_string());
}

#[actix_web::test]
async fn test_http_errors() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(StubClassifier::returning(3), StubExplainer::failing())))
            .app_data(routes::json_config())
            .configure(routes::configure_routes),
    )
    .await;

    let mut missing = ana_payload();
    missing.as_object_mut().unwrap().remove("Pemahaman");
    let req = test::TestRequest::post().uri("/predict").set_json(missing).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("Pemahaman"));

    let req = test::TestRequest::post().uri("/predict").set_json(ana_payload()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let req = test::TestRequest::post()
        .uri("/predict")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
}

#[actix_web::test]
async fn test_http_index_and_health() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(StubClassifier::returning(0), StubExplainer::ok())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "<h1>Learning Technique Prediction API</h1>");

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_http_array_body_rejected() {
    let classifier = StubClassifier::returning(3);
    let explainer = StubExplainer::ok();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(classifier.clone(), explainer.clone())))
            .app_data(routes::json_config())
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!(["Ana", "a@x.com", 2, 0, 1, 0, 1, 2, 1]))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
    assert!(body.get("MetodeBelajar").is_none());
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    assert_eq!(explainer.calls.load(Ordering::SeqCst), 0);
}
