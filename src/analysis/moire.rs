use std::f64::consts::PI;

use image::{GrayImage, imageops::{self, FilterType}};
use ndarray::{Array2, Axis};
use num_complex::Complex;
use rustfft::FftPlanner;

use crate::{
    image_utils::gray_to_array,
    metrics::{MetricName, MetricResult, MetricValue},
    sample::ImageSample,
};

const MAX_SIDE: u32 = 256;
const MIN_SIDE: u32 = 8;
/// Peak-to-mean spectral magnitude above which a periodic pattern is assumed.
const PEAK_RATIO_LIMIT: f64 = 25.0;

pub fn measure(sample: &ImageSample) -> MetricResult {
    let Some(score) = MoireAnalyzer::new().peak_ratio(sample.gray()) else {
        return MetricResult::unavailable(MetricName::MoireScore);
    };

    MetricResult::new(
        MetricName::MoireScore,
        MetricValue::Scalar(score),
        score < PEAK_RATIO_LIMIT,
        || format!("Low moiré: {:.2}", score),
    )
}

pub struct MoireAnalyzer {
    max_side: u32,
}

impl MoireAnalyzer {
    pub fn new() -> Self {
        Self { max_side: MAX_SIDE }
    }

    pub fn with_max_side(mut self, max_side: u32) -> Self {
        self.max_side = max_side.max(MIN_SIDE);
        self
    }

    /// Ratio of the strongest spectral component to the mean magnitude,
    /// ignoring everything within `min(h, w) / 8` of DC.
    pub fn peak_ratio(&self, gray: &GrayImage) -> Option<f64> {
        let small = self.downsample(gray);
        let (width, height) = small.dimensions();

        if width < MIN_SIDE || height < MIN_SIDE {
            return None;
        }

        let spectrum = self.magnitude_spectrum(&small);
        let radius = width.min(height) as f64 / 8.0;

        let mut outside = 0usize;
        let masked = Array2::from_shape_fn(spectrum.dim(), |(y, x)| {
            let fy = Self::frequency(y, height as usize);
            let fx = Self::frequency(x, width as usize);
            if (fy * fy + fx * fx).sqrt() <= radius {
                0.0
            } else {
                outside += 1;
                spectrum[[y, x]]
            }
        });

        if outside == 0 {
            return None;
        }

        let mean = masked.sum() / outside as f64;
        if mean < f64::EPSILON {
            return Some(0.0);
        }

        let peak = masked.fold(0.0f64, |acc, &v| acc.max(v));

        Some(peak / mean)
    }

    fn downsample(&self, gray: &GrayImage) -> GrayImage {
        let (width, height) = gray.dimensions();
        let long = width.max(height);

        if long <= self.max_side {
            return gray.clone();
        }

        let scale = self.max_side as f64 / long as f64;
        let new_width = ((width as f64 * scale).round() as u32).max(1);
        let new_height = ((height as f64 * scale).round() as u32).max(1);

        imageops::resize(gray, new_width, new_height, FilterType::Triangle)
    }

    fn magnitude_spectrum(&self, gray: &GrayImage) -> Array2<f64> {
        let pixels = gray_to_array(gray);
        let (height, width) = pixels.dim();
        let mean = pixels.mean().unwrap_or(0.0);

        let window_y = Self::hann(height);
        let window_x = Self::hann(width);

        let mut data = Array2::from_shape_fn((height, width), |(y, x)| {
            Complex::new((pixels[[y, x]] - mean) * window_y[y] * window_x[x], 0.0)
        });

        let mut planner = FftPlanner::new();
        Self::fft_lanes(&mut data, Axis(1), &mut planner);
        Self::fft_lanes(&mut data, Axis(0), &mut planner);

        data.mapv(|c| c.norm())
    }

    fn fft_lanes(data: &mut Array2<Complex<f64>>, axis: Axis, planner: &mut FftPlanner<f64>) {
        let len = data.len_of(axis);
        let fft = planner.plan_fft_forward(len);
        let mut buffer = vec![Complex::new(0.0, 0.0); len];

        for mut lane in data.lanes_mut(axis) {
            for (slot, value) in buffer.iter_mut().zip(lane.iter()) {
                *slot = *value;
            }
            fft.process(&mut buffer);
            for (value, slot) in lane.iter_mut().zip(buffer.iter()) {
                *value = *slot;
            }
        }
    }

    fn hann(n: usize) -> Vec<f64> {
        if n < 2 {
            return vec![1.0; n];
        }
        (0..n)
            .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / (n - 1) as f64).cos())
            .collect()
    }

    /// Distance from DC along one axis of an unshifted spectrum.
    fn frequency(index: usize, len: usize) -> f64 {
        index.min(len - index) as f64
    }
}

impl Default for MoireAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
