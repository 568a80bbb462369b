use statrs::statistics::Statistics;

use crate::{
    image_utils::laplacian,
    metrics::{MetricName, MetricResult, MetricValue},
    sample::ImageSample,
};

const HIGH_SHARPNESS: f64 = 100.0;

pub fn measure(sample: &ImageSample) -> MetricResult {
    let response = laplacian(sample.gray());
    if response.is_empty() {
        return MetricResult::unavailable(MetricName::Sharpness);
    }

    let sharpness = response.iter().population_variance();

    MetricResult::new(
        MetricName::Sharpness,
        MetricValue::Scalar(sharpness),
        sharpness > HIGH_SHARPNESS,
        || format!("High sharpness: {:.2}", sharpness),
    )
}
