use image::GrayImage;
use statrs::statistics::Statistics;

use crate::{
    metrics::{MetricName, MetricResult, MetricValue},
    sample::ImageSample,
};

const HIGH_SYMMETRY: f64 = 0.8;
const FLAT: f64 = 1e-9;

pub fn measure(sample: &ImageSample) -> MetricResult {
    let Some(symmetry) = mirror_correlation(sample.gray()) else {
        return MetricResult::unavailable(MetricName::VertSymmetry);
    };

    MetricResult::new(
        MetricName::VertSymmetry,
        MetricValue::Scalar(symmetry),
        symmetry > HIGH_SYMMETRY,
        || format!("High vertical symmetry: {:.2}", symmetry),
    )
}

/// Pearson correlation between the left half and the mirrored right half,
/// floored at zero. The middle column of odd widths is skipped.
pub fn mirror_correlation(gray: &GrayImage) -> Option<f64> {
    let (width, height) = gray.dimensions();
    let half = width / 2;

    if half == 0 {
        return None;
    }

    let left = (0..height)
        .flat_map(|y| (0..half).map(move |x| gray.get_pixel(x, y)[0] as f64))
        .collect::<Vec<_>>();
    let right = (0..height)
        .flat_map(|y| (0..half).map(move |x| gray.get_pixel(width - 1 - x, y)[0] as f64))
        .collect::<Vec<_>>();

    let std_left = left.iter().population_std_dev();
    let std_right = right.iter().population_std_dev();

    if std_left < FLAT || std_right < FLAT {
        let same = std_left < FLAT
            && std_right < FLAT
            && (left.iter().mean() - right.iter().mean()).abs() < FLAT;
        return Some(if same { 1.0 } else { 0.0 });
    }

    let covariance = left.iter().population_covariance(right.iter());

    Some((covariance / (std_left * std_right)).clamp(0.0, 1.0))
}
