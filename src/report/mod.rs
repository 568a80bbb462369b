use serde::Serialize;

use crate::{detection::DetectionResult, metrics::MetricSet};

/// Serializable form of a [`DetectionResult`]. `metrics` is omitted outside
/// verbose mode.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub is_screenshot: bool,
    pub score: u8,
    pub confidence: f64,
    pub reasons: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<&'a MetricSet>,
}

impl<'a> From<&'a DetectionResult> for JsonReport<'a> {
    fn from(result: &'a DetectionResult) -> Self {
        Self {
            is_screenshot: result.is_screenshot,
            score: result.score,
            confidence: result.confidence,
            reasons: &result.reasons,
            metrics: result.metrics.as_ref(),
        }
    }
}

impl JsonReport<'_> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
