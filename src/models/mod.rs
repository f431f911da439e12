// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Attribute, CategoryValue, ExplanationPrompt, FeatureVector, LearningProfile, PredictionResult, TechniqueCode};
pub use requests::{missing_fields, PredictRequest, REQUIRED_FIELDS};
pub use responses::{ApiResponse, ErrorClass, ErrorResponse, HealthResponse, PredictResponse};
