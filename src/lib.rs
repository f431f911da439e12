//! Study technique prediction service
//!
//! Classifies a learner's self-reported attributes into one of seven study
//! techniques with a nearest-neighbor model, then asks a text-generation
//! provider to explain the recommendation.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CategoryLexicon, PredictError, Predictor};
pub use crate::models::{ApiResponse, LearningProfile, PredictRequest, PredictResponse, TechniqueCode};
pub use crate::services::{ExplanationService, GeminiClient, KnnClassifier, TechniqueClassifier};
