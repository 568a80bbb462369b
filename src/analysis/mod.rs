//! The thirteen heuristics. Each module exposes a `measure` function that
//! reads an [`ImageSample`] and never fails: metrics whose preconditions do not
//! hold on a given image report [`MetricValue::Unavailable`] and vote `false`.
//!
//! [`MetricValue::Unavailable`]: crate::metrics::MetricValue::Unavailable

pub mod alpha;
pub mod aspect_ratio;
pub mod border;
pub mod capture_metadata;
pub mod edges;
pub mod ela;
pub mod moire;
pub mod noise;
pub mod sharpness;
pub mod solid_color;
pub mod status_bar;
pub mod symmetry;
pub mod text_confidence;

use std::{sync::Arc, time::Duration};

use log::debug;

use crate::{
    metrics::{MetricName, MetricResult},
    ocr::TextRecognizer,
    sample::ImageSample,
};

/// Collaborators shared by every extractor of one evaluation.
#[derive(Clone, Copy, Default)]
pub struct ScanContext<'a> {
    pub recognizer: Option<&'a Arc<dyn TextRecognizer>>,
    pub ocr_timeout: Option<Duration>,
}

pub fn measure(name: MetricName, sample: &ImageSample, ctx: &ScanContext<'_>) -> MetricResult {
    let result = match name {
        MetricName::Alpha => alpha::measure(sample),
        MetricName::AspectRatio => aspect_ratio::measure(sample),
        MetricName::BorderVars => border::measure(sample),
        MetricName::ElaStd => ela::measure(sample),
        MetricName::ExifLevel => capture_metadata::measure(sample),
        MetricName::HorizEdgeRatio => edges::measure(sample),
        MetricName::MoireScore => moire::measure(sample),
        MetricName::NoiseMedianVar => noise::measure(sample),
        MetricName::Sharpness => sharpness::measure(sample),
        MetricName::SolidColorRatio => solid_color::measure(sample),
        MetricName::StatusBar => status_bar::measure(sample),
        MetricName::TextConf => text_confidence::measure(sample, ctx.recognizer, ctx.ocr_timeout),
        MetricName::VertSymmetry => symmetry::measure(sample),
    };

    debug!("{} = {} (vote: {})", name, result.value, result.vote);
    result
}

#[cfg(test)]
mod tests {
    use image::DynamicImage;

    use super::*;

    #[test]
    fn test_every_metric_reports_its_own_name() {
        let sample = ImageSample::from_image(DynamicImage::new_rgb8(32, 32)).unwrap();
        let ctx = ScanContext::default();
        for name in MetricName::ALL {
            assert_eq!(measure(name, &sample, &ctx).name, name);
        }
    }
}
