use serde::{Deserialize, Serialize};

/// Successful prediction response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "MetodeBelajar")]
    pub technique_name: String,
    #[serde(rename = "Alasan")]
    pub explanation: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Which side of the exchange a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Client,
    Server,
}

impl ErrorClass {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorClass::Client => 400,
            ErrorClass::Server => 500,
        }
    }
}

/// Outcome of a single prediction request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    Success(PredictResponse),
    Failure {
        class: ErrorClass,
        body: ErrorResponse,
    },
}

impl ApiResponse {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiResponse::Success(_) => 200,
            ApiResponse::Failure { class, .. } => class.status_code(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    /// JSON body as sent on the wire
    pub fn to_json(&self) -> serde_json::Value {
        let body = match self {
            ApiResponse::Success(resp) => serde_json::to_value(resp),
            ApiResponse::Failure { body, .. } => serde_json::to_value(body),
        };
        body.unwrap_or(serde_json::Value::Null)
    }
}
