use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::convert::Infallible;
use validator::{Validate, ValidationErrors};

use crate::models::domain::Attribute;

/// Wire keys every prediction request must carry, in canonical order
pub const REQUIRED_FIELDS: [&str; 9] = [
    "nama",
    "email",
    "GayaBelajar",
    "Suasana",
    "Durasi",
    "Interval",
    "Tujuan",
    "Kesulitan",
    "Pemahaman",
];

/// Struct field name paired with its wire key, in `REQUIRED_FIELDS` order
const FIELD_KEYS: [(&str, &str); 9] = [
    ("name", "nama"),
    ("email", "email"),
    ("learning_style", "GayaBelajar"),
    ("social_setting", "Suasana"),
    ("duration", "Durasi"),
    ("spaced_interval", "Interval"),
    ("objective", "Tujuan"),
    ("difficulty", "Kesulitan"),
    ("comprehension", "Pemahaman"),
];

/// Request to predict a study technique
///
/// Fields stay as raw JSON values so that codes sent as numbers or as
/// strings are both accepted; decoding happens in `core::decoder`.
/// Only JSON objects deserialize into a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(try_from = "Map<String, Value>")]
pub struct PredictRequest {
    #[validate(required)]
    #[serde(rename = "nama")]
    pub name: Option<Value>,
    #[validate(required)]
    #[serde(rename = "email")]
    pub email: Option<Value>,
    #[validate(required)]
    #[serde(rename = "GayaBelajar")]
    pub learning_style: Option<Value>,
    #[validate(required)]
    #[serde(rename = "Suasana")]
    pub social_setting: Option<Value>,
    #[validate(required)]
    #[serde(rename = "Durasi")]
    pub duration: Option<Value>,
    #[validate(required)]
    #[serde(rename = "Interval")]
    pub spaced_interval: Option<Value>,
    #[validate(required)]
    #[serde(rename = "Tujuan")]
    pub objective: Option<Value>,
    #[validate(required)]
    #[serde(rename = "Kesulitan")]
    pub difficulty: Option<Value>,
    #[validate(required)]
    #[serde(rename = "Pemahaman")]
    pub comprehension: Option<Value>,
}

impl TryFrom<Map<String, Value>> for PredictRequest {
    type Error = Infallible;

    fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
        // Explicit nulls count as absent
        let mut take = |key: &str| map.remove(key).filter(|v| !v.is_null());

        Ok(Self {
            name: take("nama"),
            email: take("email"),
            learning_style: take("GayaBelajar"),
            social_setting: take("Suasana"),
            duration: take("Durasi"),
            spaced_interval: take("Interval"),
            objective: take("Tujuan"),
            difficulty: take("Kesulitan"),
            comprehension: take("Pemahaman"),
        })
    }
}

impl PredictRequest {
    /// Raw value supplied for a categorical attribute
    pub fn categorical(&self, attribute: Attribute) -> Option<&Value> {
        match attribute {
            Attribute::LearningStyle => self.learning_style.as_ref(),
            Attribute::SocialSetting => self.social_setting.as_ref(),
            Attribute::Duration => self.duration.as_ref(),
            Attribute::SpacedInterval => self.spaced_interval.as_ref(),
            Attribute::Objective => self.objective.as_ref(),
            Attribute::Difficulty => self.difficulty.as_ref(),
            Attribute::Comprehension => self.comprehension.as_ref(),
        }
    }
}

/// Wire keys of the fields that failed validation, in `REQUIRED_FIELDS` order
pub fn missing_fields(errors: &ValidationErrors) -> Vec<&'static str> {
    let failed: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();

    FIELD_KEYS
        .into_iter()
        .filter(|&(field, wire)| failed.iter().any(|f| f == field || f == wire))
        .map(|(_, wire)| wire)
        .collect()
}
