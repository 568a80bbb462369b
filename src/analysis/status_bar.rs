use crate::{
    image_utils::region_variance,
    metrics::{MetricName, MetricResult, MetricValue},
    sample::ImageSample,
};

const STRIP_FRACTION: f64 = 0.08;
const MAX_STRIP: u32 = 100;
const MIN_STRIP: u32 = 20;
const UNIFORM_VARIANCE: f64 = 500.0;

pub fn measure(sample: &ImageSample) -> MetricResult {
    let Some(variance) = top_strip_variance(sample) else {
        return MetricResult::unavailable(MetricName::StatusBar);
    };

    let detected = variance < UNIFORM_VARIANCE;

    MetricResult::new(
        MetricName::StatusBar,
        MetricValue::Flag(detected),
        detected,
        || "Status bar detected".into(),
    )
}

/// Luminance variance of the top strip, or `None` when the strip would be
/// shorter than a status bar can be.
pub fn top_strip_variance(sample: &ImageSample) -> Option<f64> {
    let (width, height) = sample.dimensions();
    let strip = ((height as f64 * STRIP_FRACTION).round() as u32).min(MAX_STRIP);

    if strip < MIN_STRIP {
        return None;
    }

    Some(region_variance(sample.gray(), 0, 0, width, strip))
}
