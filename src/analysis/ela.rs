use std::io::Cursor;

use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, RgbImage,
    codecs::jpeg::JpegEncoder,
    error::{ImageError, ParameterError, ParameterErrorKind},
};
use log::warn;
use statrs::statistics::Statistics;

use crate::{
    error::Result,
    metrics::{MetricName, MetricResult, MetricValue},
    sample::ImageSample,
};

pub const ELA_QUALITY: u8 = 90;
const LOW_ELA_STD: f64 = 50.0;

pub fn measure(sample: &ImageSample) -> MetricResult {
    match ElaAnalyzer::new(ELA_QUALITY).std_deviation(sample.image()) {
        Ok(std) => MetricResult::new(
            MetricName::ElaStd,
            MetricValue::Scalar(std),
            std < LOW_ELA_STD,
            || format!("Low ELA: {:.2}", std),
        ),
        Err(e) => {
            warn!("error level analysis skipped: {}", e);
            MetricResult::unavailable(MetricName::ElaStd)
        }
    }
}

pub struct ElaAnalyzer {
    quality: u8,
}

impl ElaAnalyzer {
    pub fn new(quality: u8) -> Self {
        Self { quality }
    }

    /// Standard deviation of the per-channel absolute difference between the
    /// image and its JPEG round trip at `quality`.
    pub fn std_deviation(&self, image: &DynamicImage) -> Result<f64> {
        let rgb_image = image.to_rgb8();
        let recompressed = self.recompress_jpeg(&rgb_image)?.to_rgb8();

        if recompressed.dimensions() != rgb_image.dimensions() {
            return Err(ImageError::Parameter(ParameterError::from_kind(
                ParameterErrorKind::DimensionMismatch,
            ))
            .into());
        }

        let std_deviation = rgb_image
            .as_raw()
            .iter()
            .zip(recompressed.as_raw())
            .map(|(&orig, &recomp)| (orig as f64 - recomp as f64).abs())
            .population_std_dev();

        Ok(std_deviation)
    }

    fn recompress_jpeg(&self, image: &RgbImage) -> Result<DynamicImage> {
        let mut buffer = Cursor::new(Vec::new());

        let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
        encoder.write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )?;

        let recompressed = image::load_from_memory_with_format(buffer.get_ref(), ImageFormat::Jpeg)?;

        Ok(recompressed)
    }
}
