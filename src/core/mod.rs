// Core pipeline exports
pub mod decoder;
pub mod error;
pub mod lexicon;
pub mod predictor;
pub mod prompt;

pub use decoder::{decode, parse_code, validate};
pub use error::PredictError;
pub use lexicon::{CategoryLexicon, Lexicon, LexiconError};
pub use predictor::Predictor;
pub use prompt::compose;
