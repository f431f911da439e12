use std::sync::Arc;

use crate::core::decoder::{decode, validate};
use crate::core::error::PredictError;
use crate::core::lexicon::CategoryLexicon;
use crate::core::prompt::compose;
use crate::models::{ApiResponse, ErrorClass, PredictRequest, PredictResponse, PredictionResult};
use crate::services::{ExplanationService, TechniqueClassifier};

/// Prediction pipeline orchestrator
///
/// # Pipeline Stages
/// 1. Validate required fields
/// 2. Decode categorical codes against the lexicon
/// 3. Classify the feature vector
/// 4. Resolve the technique name
/// 5. Compose the explanation prompt
/// 6. Generate the explanation
///
/// Each stage short-circuits on failure; nothing is retried. All
/// collaborators are read-only and shared across requests.
#[derive(Clone)]
pub struct Predictor {
    lexicon: Arc<CategoryLexicon>,
    classifier: Arc<dyn TechniqueClassifier>,
    explainer: Arc<dyn ExplanationService>,
}

impl Predictor {
    pub fn new(
        lexicon: Arc<CategoryLexicon>,
        classifier: Arc<dyn TechniqueClassifier>,
        explainer: Arc<dyn ExplanationService>,
    ) -> Self {
        Self {
            lexicon,
            classifier,
            explainer,
        }
    }

    pub fn lexicon(&self) -> &CategoryLexicon {
        &self.lexicon
    }

    /// Run the full pipeline for one request
    pub async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, PredictError> {
        validate(request)?;

        let profile = decode(request, &self.lexicon)?;
        let features = profile.feature_vector();
        tracing::debug!("Decoded profile, features: {:?}", features.as_slice());

        let code = self.classifier.predict(&features)?;

        let name = match self.lexicon.resolve_technique(code) {
            Ok(name) => name.to_string(),
            Err(e) => {
                tracing::error!("Classifier integrity violation: {}", e);
                return Err(PredictError::TechniqueIntegrity { code });
            }
        };
        let prediction = PredictionResult { code, name };
        tracing::debug!("Classified as {} ({})", prediction.name, prediction.code);

        let prompt = compose(&profile, &prediction);
        let explanation = self.explainer.generate(&prompt).await?;

        Ok(PredictResponse {
            technique_name: prediction.name,
            explanation,
        })
    }

    /// Run the pipeline and convert the outcome to a response
    pub async fn handle(&self, request: &PredictRequest) -> ApiResponse {
        let result = self.predict(request).await;

        match &result {
            Ok(resp) => tracing::info!("Recommended {}", resp.technique_name),
            Err(e) if e.class() == ErrorClass::Client => tracing::info!("Rejected prediction request: {}", e),
            Err(e) => tracing::error!("Prediction failed: {}", e),
        }

        result.into()
    }
}
