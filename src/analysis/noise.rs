use image::GrayImage;
use imageproc::filter::median_filter;
use statrs::statistics::{Data, Median, Statistics};

use crate::{
    metrics::{MetricName, MetricResult, MetricValue},
    sample::ImageSample,
};

const LOW_NOISE: f64 = 10.0;

pub fn measure(sample: &ImageSample) -> MetricResult {
    let Some(noise) = NoiseAnalyzer::new().median_block_variance(sample.gray()) else {
        return MetricResult::unavailable(MetricName::NoiseMedianVar);
    };

    MetricResult::new(
        MetricName::NoiseMedianVar,
        MetricValue::Scalar(noise),
        noise < LOW_NOISE,
        || format!("Low noise: {:.2}", noise),
    )
}

pub struct NoiseAnalyzer {
    block_size: u32,
    median_radius: u32,
}

impl NoiseAnalyzer {
    pub fn new() -> Self {
        Self {
            block_size: 16,
            median_radius: 2,
        }
    }

    pub fn with_block_size(mut self, size: u32) -> Self {
        self.block_size = size.max(2);
        self
    }

    /// Sensor noise estimate: the residual against a 5x5 median is measured
    /// per block, and the median block variance is reported so that edges and
    /// text, which only occupy a minority of blocks, do not dominate.
    pub fn median_block_variance(&self, gray: &GrayImage) -> Option<f64> {
        let (width, height) = gray.dimensions();
        let size = self.block_size;

        if width < size || height < size {
            return None;
        }

        let smoothed = median_filter(gray, self.median_radius, self.median_radius);
        let smoothed = &smoothed;

        let mut variances = Vec::new();

        for by in (0..=height - size).step_by(size as usize) {
            for bx in (0..=width - size).step_by(size as usize) {
                let residuals = (by..by + size).flat_map(|y| {
                    (bx..bx + size).map(move |x| {
                        gray.get_pixel(x, y)[0] as f64 - smoothed.get_pixel(x, y)[0] as f64
                    })
                });
                variances.push(residuals.population_variance());
            }
        }

        Some(Data::new(variances).median())
    }
}

impl Default for NoiseAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use image::Luma;

    use super::*;

    /// Deterministic +-amplitude speckle.
    fn speckled(width: u32, height: u32, amplitude: i32) -> GrayImage {
        let mut state = 0x2545_f491u32;
        GrayImage::from_fn(width, height, |_, _| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let offset = (state % (2 * amplitude as u32 + 1)) as i32 - amplitude;
            Luma([(128 + offset) as u8])
        })
    }

    #[test]
    fn test_clean_render_is_quiet() {
        let gray = GrayImage::from_fn(64, 64, |x, y| {
            if y > 20 && y < 24 && x > 4 { Luma([0]) } else { Luma([255]) }
        });
        let noise = NoiseAnalyzer::new().median_block_variance(&gray).unwrap();
        assert_eq!(noise, 0.0);
    }

    #[test]
    fn test_speckle_raises_estimate() {
        let noise = NoiseAnalyzer::new()
            .median_block_variance(&speckled(64, 64, 40))
            .unwrap();
        assert!(noise > LOW_NOISE, "noise was {}", noise);
    }

    #[test]
    fn test_smaller_than_block_is_unavailable() {
        assert_eq!(NoiseAnalyzer::new().median_block_variance(&GrayImage::new(15, 40)), None);
    }
}
