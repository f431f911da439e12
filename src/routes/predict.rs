use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use tracing::Instrument;

use crate::core::Predictor;
use crate::models::{ApiResponse, HealthResponse, PredictRequest};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub predictor: Predictor,
}

/// Configure prediction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/predict", web::post().to(predict));
}

async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("<h1>Learning Technique Prediction API</h1>")
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Predict a study technique and explain it
///
/// POST /predict
///
/// Request body:
/// ```json
/// {
///   "nama": "string",
///   "email": "string",
///   "GayaBelajar": 2,
///   "Suasana": 0,
///   "Durasi": 1,
///   "Interval": 0,
///   "Tujuan": 1,
///   "Kesulitan": 2,
///   "Pemahaman": 1
/// }
/// ```
async fn predict(state: web::Data<AppState>, req: web::Json<PredictRequest>) -> impl Responder {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id);

    let resp = async {
        tracing::debug!("Received prediction request");
        state.predictor.handle(&req).await
    }
    .instrument(span)
    .await;

    into_http(resp)
}

/// Convert a pipeline outcome into an HTTP response
pub fn into_http(resp: ApiResponse) -> HttpResponse {
    let status = StatusCode::from_u16(resp.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match resp {
        ApiResponse::Success(body) => HttpResponse::build(status).json(body),
        ApiResponse::Failure { body, .. } => HttpResponse::build(status).json(body),
    }
}
