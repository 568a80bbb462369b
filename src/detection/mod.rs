use log::debug;

use crate::metrics::{MAX_SCORE, MetricResult, MetricSet};

/// Outcome of one evaluation.
///
/// `score` counts positive votes, `confidence` is `100 * score / 13`, and
/// `reasons` holds one line per positive vote in fixed metric order.
/// `metrics` is only populated in verbose mode.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub is_screenshot: bool,
    pub score: u8,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub metrics: Option<MetricSet>,
}

impl DetectionResult {
    /// Folds the per-metric votes into a classification. Every vote weighs
    /// one point; a repeated metric name only counts once.
    pub(crate) fn from_votes(mut results: Vec<MetricResult>, threshold: u8, verbose: bool) -> Self {
        results.sort_by_key(|m| m.name.position());
        results.dedup_by_key(|m| m.name);

        let positive = results.iter().filter(|m| m.vote).collect::<Vec<_>>();
        let score = positive.len().min(MAX_SCORE as usize) as u8;
        let reasons = positive
            .iter()
            .map(|m| m.reason.clone().unwrap_or_else(|| m.name.to_string()))
            .collect::<Vec<_>>();

        let is_screenshot = score >= threshold;
        let confidence = Self::confidence_for(score);

        debug!(
            "score {}/{} (threshold {}): screenshot = {}",
            score, MAX_SCORE, threshold, is_screenshot
        );

        Self {
            is_screenshot,
            score,
            confidence,
            reasons,
            metrics: verbose.then(|| MetricSet::new(results)),
        }
    }

    /// Percentage of the thirteen heuristics that voted for a screenshot.
    /// Unavailable metrics still count in the denominator.
    pub fn confidence_for(score: u8) -> f64 {
        score as f64 * 100.0 / MAX_SCORE as f64
    }

    pub fn summary(&self) -> String {
        format!(
            "{} (score {}/{}, {:.1}% confidence)",
            if self.is_screenshot { "Screenshot" } else { "Not a screenshot" },
            self.score,
            MAX_SCORE,
            self.confidence
        )
    }
}
