//! Recommendation normalizer: coerces an extracted JSON value into typed
//! `CareerRecommendation`s. Malformed elements are defaulted field by field,
//! never rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::interpret::extractor::ExtractionError;

/// One suggested career path, always fully populated after normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub title: String,
    pub description: String,
    pub key_skills: Vec<String>,
}

impl CareerRecommendation {
    /// Builds a recommendation from any JSON value. Non-objects yield defaults.
    pub fn from_value(item: &Value) -> Self {
        Self {
            title: text_field(item, "title"),
            description: text_field(item, "description"),
            key_skills: skills_field(item),
        }
    }
}

/// Maps a JSON array into recommendations, one per element.
pub fn normalize(value: &Value) -> Result<Vec<CareerRecommendation>, ExtractionError> {
    let items = value.as_array().ok_or_else(|| {
        ExtractionError::InvalidShape(format!("expected an array, got {}", json_kind(value)))
    })?;
    Ok(items.iter().map(CareerRecommendation::from_value).collect())
}

/// Like `normalize`, but an empty array is also an invalid shape.
pub fn normalize_non_empty(value: &Value) -> Result<Vec<CareerRecommendation>, ExtractionError> {
    let recommendations = normalize(value)?;
    if recommendations.is_empty() {
        return Err(ExtractionError::InvalidShape(
            "array contained no recommendations".to_string(),
        ));
    }
    Ok(recommendations)
}

fn text_field(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn skills_field(item: &Value) -> Vec<String> {
    match item.get("key_skills") {
        Some(Value::Array(skills)) => skills
            .iter()
            .map(|skill| match skill {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_well_formed() {
        let value = json!([{"title": "A", "description": "B", "key_skills": ["x", "y"]}]);
        let recs = normalize(&value).unwrap();
        assert_eq!(
            recs,
            vec![CareerRecommendation {
                title: "A".to_string(),
                description: "B".to_string(),
                key_skills: vec!["x".to_string(), "y".to_string()],
            }]
        );
    }

    #[test]
    fn test_normalize_defaults_malformed_element() {
        let value = json!([{"description": 5, "key_skills": "not-an-array"}]);
        let recs = normalize(&value).unwrap();
        assert_eq!(
            recs,
            vec![CareerRecommendation {
                title: String::new(),
                description: "5".to_string(),
                key_skills: vec![],
            }]
        );
    }

    #[test]
    fn test_normalize_coerces_skill_elements() {
        let value = json!([{"title": "Data", "key_skills": ["SQL", 3, true, null, {"k": 1}]}]);
        let recs = normalize(&value).unwrap();
        assert_eq!(
            recs[0].key_skills,
            vec!["SQL", "3", "true", "null", r#"{"k":1}"#]
        );
    }

    #[test]
    fn test_normalize_non_object_elements_become_defaults() {
        let value = json!(["just a string", 42, null]);
        let recs = normalize(&value).unwrap();
        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|r| *r == CareerRecommendation::default()));
    }

    #[test]
    fn test_normalize_wrong_typed_text_fields_default_to_empty() {
        let value = json!([{"title": ["A"], "description": {"text": "B"}}]);
        let recs = normalize(&value).unwrap();
        assert_eq!(recs[0].title, "");
        assert_eq!(recs[0].description, "");
    }

    #[test]
    fn test_normalize_rejects_non_array() {
        let err = normalize(&json!({"title": "A"})).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::InvalidShape("expected an array, got an object".to_string())
        );
    }

    #[test]
    fn test_normalize_non_empty_rejects_empty_array() {
        assert!(normalize(&json!([])).unwrap().is_empty());
        assert!(matches!(
            normalize_non_empty(&json!([])),
            Err(ExtractionError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_malformed_element_does_not_abort_batch() {
        let value = json!([
            {"title": "Good", "description": "Fine", "key_skills": ["a"]},
            "garbage",
            {"title": "Also good", "description": "Ok", "key_skills": []}
        ]);
        let recs = normalize_non_empty(&value).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].title, "Good");
        assert_eq!(recs[2].title, "Also good");
    }
}
