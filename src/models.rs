// src/models.rs
// HTTP request/response bodies

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::simplify::{MAX_GRADE, MIN_GRADE};

/// Checks a raw grade against the accepted range.
pub fn validate_grade(grade: i64) -> Result<u8, ValidationError> {
    if (MIN_GRADE as i64..=MAX_GRADE as i64).contains(&grade) {
        Ok(grade as u8)
    } else {
        Err(ValidationError::GradeOutOfRange {
            got: grade,
            min: MIN_GRADE,
            max: MAX_GRADE,
        })
    }
}

/// Accepts integer grades and whole-valued floats such as `5.0`.
fn deserialize_grade<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(grade) = number.as_i64() {
        return Ok(grade);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => Ok(f as i64),
        _ => Err(serde::de::Error::custom(format!(
            "grade must be a whole number, got {}",
            number
        ))),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimplifyRequest {
    pub text: String,
    #[serde(deserialize_with = "deserialize_grade")]
    pub grade: i64,
    #[serde(rename = "pageId", default)]
    pub page_id: Option<String>,
}

impl SimplifyRequest {
    /// Returns the validated grade.
    pub fn validate(&self) -> Result<u8, ValidationError> {
        if self.text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        validate_grade(self.grade)
    }
}

/// One member of a batch; `id` only needs to be unique within the batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchItem {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimplifyBatchRequest {
    pub batch: Vec<BatchItem>,
    #[serde(deserialize_with = "deserialize_grade")]
    pub grade: i64,
    #[serde(rename = "pageId", default)]
    pub page_id: Option<String>,
}

impl SimplifyBatchRequest {
    pub fn validate(&self) -> Result<u8, ValidationError> {
        validate_grade(self.grade)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyResponse {
    pub success: bool,
    pub simplified_text: String,
    pub grade: u8,
    pub from_cache: bool,
    pub latency: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchResultItem {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimplifyBatchResponse {
    pub success: bool,
    pub results: Vec<BatchResultItem>,
    pub grade: u8,
    pub latency: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub gemini_enabled: bool,
    pub cache_size: usize,
}
