use statrs::statistics::Statistics;

use crate::{
    image_utils::region_variance,
    metrics::{MetricName, MetricResult, MetricValue},
    sample::ImageSample,
};

const MAX_BAND: u32 = 20;
const UNIFORM_VARIANCE: f64 = 100.0;

pub fn measure(sample: &ImageSample) -> MetricResult {
    let Some((top, sides)) = border_variances(sample) else {
        return MetricResult::unavailable(MetricName::BorderVars);
    };

    MetricResult::new(
        MetricName::BorderVars,
        MetricValue::Pair(top, sides),
        top < UNIFORM_VARIANCE && sides < UNIFORM_VARIANCE,
        || format!("Low border variance: ({:.2}, {:.2})", top, sides),
    )
}

/// Luminance variance of the top band and of the left and right bands taken
/// together. The band is 5% of the short side, capped at 20 px.
pub fn border_variances(sample: &ImageSample) -> Option<(f64, f64)> {
    let gray = sample.gray();
    let (width, height) = gray.dimensions();
    let band = MAX_BAND.min(height / 20).min(width / 20);

    if band == 0 {
        return None;
    }

    let top = region_variance(gray, 0, 0, width, band);
    let sides = (0..height)
        .flat_map(|y| {
            (0..band)
                .chain(width - band..width)
                .map(move |x| gray.get_pixel(x, y)[0] as f64)
        })
        .population_variance();

    Some((top, sides))
}
