use thiserror::Error;

use crate::models::{ApiResponse, Attribute, ErrorClass, ErrorResponse, PredictResponse, TechniqueCode};
use crate::services::{ClassifierError, ExplanationError};

/// Failure of one stage of the prediction pipeline
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingField { fields: Vec<&'static str> },

    #[error("Invalid value for {attribute}: {value}")]
    UnknownCategory { attribute: Attribute, value: String },

    #[error("Classification failed: {0}")]
    Classification(#[from] ClassifierError),

    #[error("Classifier returned unknown technique code {code}")]
    TechniqueIntegrity { code: TechniqueCode },

    #[error("Explanation service failed: {0}")]
    ExplanationService(#[from] ExplanationError),
}

impl PredictError {
    pub fn class(&self) -> ErrorClass {
        match self {
            PredictError::MissingField { .. } | PredictError::UnknownCategory { .. } => ErrorClass::Client,
            PredictError::Classification(_)
            | PredictError::TechniqueIntegrity { .. }
            | PredictError::ExplanationService(_) => ErrorClass::Server,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.class().status_code()
    }
}

impl From<PredictError> for ApiResponse {
    fn from(err: PredictError) -> Self {
        ApiResponse::Failure {
            class: err.class(),
            body: ErrorResponse { error: err.to_string() },
        }
    }
}

impl From<Result<PredictResponse, PredictError>> for ApiResponse {
    fn from(result: Result<PredictResponse, PredictError>) -> Self {
        match result {
            Ok(resp) => ApiResponse::Success(resp),
            Err(err) => err.into(),
        }
    }
}
