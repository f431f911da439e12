use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical attributes of a learning profile
///
/// Declaration order is the classifier's feature column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    LearningStyle,
    SocialSetting,
    Duration,
    SpacedInterval,
    Objective,
    Difficulty,
    Comprehension,
}

impl Attribute {
    /// All attributes in feature column order
    pub const ALL: [Attribute; 7] = [
        Attribute::LearningStyle,
        Attribute::SocialSetting,
        Attribute::Duration,
        Attribute::SpacedInterval,
        Attribute::Objective,
        Attribute::Difficulty,
        Attribute::Comprehension,
    ];

    /// JSON key used for this attribute in the request payload
    pub fn wire_key(self) -> &'static str {
        match self {
            Attribute::LearningStyle => "GayaBelajar",
            Attribute::SocialSetting => "Suasana",
            Attribute::Duration => "Durasi",
            Attribute::SpacedInterval => "Interval",
            Attribute::Objective => "Tujuan",
            Attribute::Difficulty => "Kesulitan",
            Attribute::Comprehension => "Pemahaman",
        }
    }

    /// Label used when listing the attribute in an explanation prompt
    pub fn prompt_label(self) -> &'static str {
        match self {
            Attribute::LearningStyle => "Gaya Belajar",
            Attribute::SocialSetting => "Suasana",
            Attribute::Duration => "Durasi Belajar",
            Attribute::SpacedInterval => "Interval Belajar",
            Attribute::Objective => "Tujuan Belajar",
            Attribute::Difficulty => "Kesulitan yang Dihadapi",
            Attribute::Comprehension => "Tingkat Pemahaman",
        }
    }

    /// Position of the attribute in the feature vector
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_key())
    }
}

/// A categorical attribute resolved against its lexicon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryValue {
    pub attribute: Attribute,
    pub code: u32,
    pub label: String,
}

/// Validated and decoded prediction request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningProfile {
    pub name: String,
    pub email: String,
    /// Decoded attributes, indexed by `Attribute::index`
    pub attributes: [CategoryValue; 7],
}

impl LearningProfile {
    /// Look up the decoded value for an attribute
    pub fn get(&self, attribute: Attribute) -> &CategoryValue {
        &self.attributes[attribute.index()]
    }

    /// Raw codes in classifier column order
    pub fn feature_vector(&self) -> FeatureVector {
        FeatureVector(self.attributes.iter().map(|a| a.code).collect())
    }
}

/// Classifier input: one code per attribute, in `Attribute::ALL` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector(pub Vec<u32>);

impl FeatureVector {
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TechniqueCode(pub u32);

impl fmt::Display for TechniqueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recommended technique with its display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    pub code: TechniqueCode,
    pub name: String,
}

/// Prompt text sent to the explanation provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationPrompt(String);

impl ExplanationPrompt {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ExplanationPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
