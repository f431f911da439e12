// Service exports
pub mod classifier;
pub mod explanation;
pub mod gemini;

pub use classifier::{ClassifierError, KnnClassifier, TechniqueClassifier, TrainingSample};
pub use explanation::{ExplanationError, ExplanationService};
pub use gemini::{GeminiClient, GenerationConfig};
