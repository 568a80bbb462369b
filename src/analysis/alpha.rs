use image::DynamicImage;

use crate::{
    metrics::{MetricName, MetricResult, MetricValue},
    sample::ImageSample,
};

pub fn measure(sample: &ImageSample) -> MetricResult {
    let translucent = sample.has_alpha() && has_translucent_pixel(sample.image());

    MetricResult::new(
        MetricName::Alpha,
        MetricValue::Flag(translucent),
        translucent,
        || "Has alpha channel".into(),
    )
}

/// An alpha channel that is opaque everywhere carries no information.
fn has_translucent_pixel(image: &DynamicImage) -> bool {
    match image {
        DynamicImage::ImageRgba8(buffer) => buffer.pixels().any(|p| p[3] < u8::MAX),
        DynamicImage::ImageLumaA8(buffer) => buffer.pixels().any(|p| p[1] < u8::MAX),
        other => other.to_rgba8().pixels().any(|p| p[3] < u8::MAX),
    }
}
