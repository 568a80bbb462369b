use image::{GrayImage, Luma, RgbImage};
use ndarray::Array2;
use statrs::statistics::Statistics;

pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

pub fn rgb_to_gray(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut gray = GrayImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels() {
        let lum = luminance(pixel[0], pixel[1], pixel[2]).round().min(255.0) as u8;
        gray.put_pixel(x, y, Luma([lum]));
    }

    gray
}

pub fn gray_to_array(image: &GrayImage) -> Array2<f64> {
    let (width, height) = image.dimensions();
    let mut arr = Array2::zeros((height as usize, width as usize));

    for (x, y, pixel) in image.enumerate_pixels() {
        arr[[y as usize, x as usize]] = pixel[0] as f64;
    }

    arr
}

/// Population variance of the gray values inside `[x0, x1) x [y0, y1)`.
pub fn region_variance(gray: &GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) -> f64 {
    let values = (y0..y1).flat_map(|y| (x0..x1).map(move |x| gray.get_pixel(x, y)[0] as f64));

    values.population_variance()
}

/// 4-neighbour Laplacian over interior pixels, row-major. Empty when the image
/// has no interior.
pub fn laplacian(gray: &GrayImage) -> Vec<f64> {
    let (width, height) = gray.dimensions();
    if width < 3 || height < 3 {
        return Vec::new();
    }

    let mut response = Vec::with_capacity(((width - 2) * (height - 2)) as usize);
    let p = |x: u32, y: u32| gray.get_pixel(x, y)[0] as f64;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            response.push(p(x - 1, y) + p(x + 1, y) + p(x, y - 1) + p(x, y + 1) - 4.0 * p(x, y));
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(255, 255, 255).round(), 255.0);
        assert_eq!(luminance(0, 0, 0), 0.0);
        assert!((luminance(255, 0, 0) - 76.245).abs() < 1e-9);
    }

    #[test]
    fn test_region_variance_of_flat_region_is_zero() {
        let gray = GrayImage::from_pixel(10, 10, Luma([77]));
        assert_eq!(region_variance(&gray, 0, 0, 10, 3), 0.0);
    }

    #[test]
    fn test_laplacian_of_flat_image_is_zero() {
        let gray = GrayImage::from_pixel(5, 4, Luma([200]));
        let response = laplacian(&gray);
        assert_eq!(response.len(), 3 * 2);
        assert!(response.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_laplacian_needs_interior() {
        assert!(laplacian(&GrayImage::new(2, 10)).is_empty());
    }
}
