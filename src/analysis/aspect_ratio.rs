use log::debug;

use crate::{
    metrics::{MetricName, MetricResult, MetricValue},
    sample::ImageSample,
};

/// Long side over short side of common displays.
const CANONICAL_RATIOS: [(&str, f64); 6] = [
    ("4:3", 4.0 / 3.0),
    ("3:2", 3.0 / 2.0),
    ("16:10", 16.0 / 10.0),
    ("16:9", 16.0 / 9.0),
    ("2:1", 2.0),
    ("19.5:9", 19.5 / 9.0),
];

const TOLERANCE: f64 = 0.02;

pub fn measure(sample: &ImageSample) -> MetricResult {
    let (width, height) = sample.dimensions();
    let ratio = width as f64 / height as f64;
    let rounded = (ratio * 100.0).round() / 100.0;

    let matched = canonical_match(width, height);
    if let Some(label) = matched {
        debug!("{}x{} matches {}", width, height, label);
    }

    MetricResult::new(
        MetricName::AspectRatio,
        MetricValue::Scalar(rounded),
        matched.is_some(),
        || format!("Common aspect ratio: {:.2}", rounded),
    )
}

/// Orientation-independent: portrait phone captures match the same table.
pub fn canonical_match(width: u32, height: u32) -> Option<&'static str> {
    let long = width.max(height) as f64;
    let short = width.min(height) as f64;
    let ratio = long / short;

    CANONICAL_RATIOS
        .iter()
        .find(|(_, canonical)| (ratio - canonical).abs() <= TOLERANCE)
        .map(|(label, _)| *label)
}
