use serde_json::Value;
use validator::Validate;

use crate::core::error::PredictError;
use crate::core::lexicon::CategoryLexicon;
use crate::models::requests::missing_fields;
use crate::models::{Attribute, CategoryValue, LearningProfile, PredictRequest};

/// Check that every required field is present
///
/// Code ranges are not checked here; see [`decode`].
pub fn validate(request: &PredictRequest) -> Result<(), PredictError> {
    if let Err(errors) = request.validate() {
        tracing::debug!("Request validation failed: {}", errors);
        return Err(PredictError::MissingField {
            fields: missing_fields(&errors),
        });
    }
    Ok(())
}

/// Decode a validated request into a typed profile
///
/// Every categorical value must be an integer code (number or numeric
/// string) present in its lexicon table.
pub fn decode(request: &PredictRequest, lexicon: &CategoryLexicon) -> Result<LearningProfile, PredictError> {
    let name = free_text(request.name.as_ref(), "nama")?;
    let email = free_text(request.email.as_ref(), "email")?;

    let [a, b, c, d, e, f, g] = Attribute::ALL.map(|attribute| decode_attribute(request, lexicon, attribute));

    Ok(LearningProfile {
        name,
        email,
        attributes: [a?, b?, c?, d?, e?, f?, g?],
    })
}

fn free_text(value: Option<&Value>, field: &'static str) -> Result<String, PredictError> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(PredictError::MissingField { fields: vec![field] }),
    }
}

fn decode_attribute(
    request: &PredictRequest,
    lexicon: &CategoryLexicon,
    attribute: Attribute,
) -> Result<CategoryValue, PredictError> {
    let raw = request.categorical(attribute).ok_or(PredictError::MissingField {
        fields: vec![attribute.wire_key()],
    })?;

    let unknown = || PredictError::UnknownCategory {
        attribute,
        value: display_value(raw),
    };

    let code = parse_code(raw).ok_or_else(unknown)?;
    let label = lexicon.attribute(attribute).resolve(code).map_err(|_| unknown())?;

    Ok(CategoryValue {
        attribute,
        code,
        label: label.to_string(),
    })
}

/// Interpret a JSON value as a non-negative integer code
pub fn parse_code(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(code) => u32::try_from(code).ok(),
            None => n.as_f64().and_then(integral),
        },
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>().ok().or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

fn integral(x: f64) -> Option<u32> {
    if x.is_finite() && x >= 0.0 && x.fract() == 0.0 && x <= u32::MAX as f64 {
        Some(x as u32)
    } else {
        None
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
