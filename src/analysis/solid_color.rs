use image::RgbImage;

use crate::{
    metrics::{MetricName, MetricResult, MetricValue},
    sample::ImageSample,
};

const BUCKET_BITS: u32 = 4;
const DOMINANT_SHARE: f64 = 0.5;

pub fn measure(sample: &ImageSample) -> MetricResult {
    let share = dominant_bucket_share(&sample.rgb());

    MetricResult::new(
        MetricName::SolidColorRatio,
        MetricValue::Scalar(share),
        share > DOMINANT_SHARE,
        || format!("High solid color: {:.2}", share),
    )
}

/// Fraction of pixels falling into the most common colour after keeping the
/// top four bits of each channel.
pub fn dominant_bucket_share(image: &RgbImage) -> f64 {
    let shift = 8 - BUCKET_BITS;
    let mut buckets = vec![0u32; 1 << (3 * BUCKET_BITS)];

    for pixel in image.pixels() {
        let r = (pixel[0] >> shift) as usize;
        let g = (pixel[1] >> shift) as usize;
        let b = (pixel[2] >> shift) as usize;
        buckets[(r << (2 * BUCKET_BITS)) | (g << BUCKET_BITS) | b] += 1;
    }

    let total = image.width() as u64 * image.height() as u64;
    if total == 0 {
        return 0.0;
    }

    let top = buckets.iter().copied().max().unwrap_or(0);
    top as f64 / total as f64
}
