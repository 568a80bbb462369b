use image::GrayImage;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

use crate::{
    metrics::{MetricName, MetricResult, MetricValue},
    sample::ImageSample,
};

/// Minimum |Sobel y| for a horizontal edge pixel.
const EDGE_MAGNITUDE: i32 = 64;
/// |Sobel y| must exceed this multiple of |Sobel x|.
const DOMINANCE: i32 = 2;
const MIN_RUN: u32 = 8;
const HIGH_RATIO: f64 = 0.3;

pub fn measure(sample: &ImageSample) -> MetricResult {
    let Some(ratio) = long_run_ratio(sample.gray()) else {
        return MetricResult::unavailable(MetricName::HorizEdgeRatio);
    };

    MetricResult::new(
        MetricName::HorizEdgeRatio,
        MetricValue::Scalar(ratio),
        ratio > HIGH_RATIO,
        || format!("High horizontal edges: {:.2}", ratio),
    )
}

/// Share of horizontal-edge pixels that belong to a run of at least
/// `max(8, width / 20)` consecutive edge pixels on the same row. Rules,
/// toolbars and text baselines produce such runs; camera texture rarely does.
pub fn long_run_ratio(gray: &GrayImage) -> Option<f64> {
    let (width, height) = gray.dimensions();
    if width < 3 || height < 3 {
        return None;
    }

    let gx = horizontal_sobel(gray);
    let gy = vertical_sobel(gray);
    let min_run = MIN_RUN.max(width / 20);

    let mut edge_pixels = 0u64;
    let mut run_pixels = 0u64;

    for y in 0..height {
        let mut run = 0u32;
        for x in 0..width {
            let vy = (gy.get_pixel(x, y)[0] as i32).abs();
            let vx = (gx.get_pixel(x, y)[0] as i32).abs();

            if vy >= EDGE_MAGNITUDE && vy > DOMINANCE * vx {
                edge_pixels += 1;
                run += 1;
            } else {
                if run >= min_run {
                    run_pixels += run as u64;
                }
                run = 0;
            }
        }
        if run >= min_run {
            run_pixels += run as u64;
        }
    }

    if edge_pixels == 0 {
        return Some(0.0);
    }

    Some(run_pixels as f64 / edge_pixels as f64)
}

#[cfg(test)]
mod tests {
    use image::Luma;

    use super::*;

    #[test]
    fn test_flat_image_has_no_edges() {
        let gray = GrayImage::from_pixel(64, 64, Luma([128]));
        assert_eq!(long_run_ratio(&gray), Some(0.0));
    }

    #[test]
    fn test_horizontal_rules_form_long_runs() {
        let gray = GrayImage::from_fn(200, 120, |_, y| {
            if (y / 10) % 2 == 0 { Luma([250]) } else { Luma([20]) }
        });
        let ratio = long_run_ratio(&gray).unwrap();
        assert!(ratio > 0.95, "ratio was {}", ratio);
    }

    #[test]
    fn test_vertical_stripes_are_not_horizontal_edges() {
        let gray = GrayImage::from_fn(200, 120, |x, _| {
            if (x / 10) % 2 == 0 { Luma([250]) } else { Luma([20]) }
        });
        assert_eq!(long_run_ratio(&gray), Some(0.0));
    }

    #[test]
    fn test_checkerboard_specks_are_short() {
        let gray = GrayImage::from_fn(200, 120, |x, y| {
            if ((x / 3) + (y / 3)) % 2 == 0 { Luma([250]) } else { Luma([20]) }
        });
        let ratio = long_run_ratio(&gray).unwrap();
        assert!(ratio < HIGH_RATIO, "ratio was {}", ratio);
    }

    #[test]
    fn test_needs_interior() {
        assert_eq!(long_run_ratio(&GrayImage::new(2, 2)), None);
    }
}
