use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image loading error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Invalid threshold {0} (expected 0..=13)")]
    InvalidThreshold(u8),
}

/// Failure reported by a text recognizer. Never escapes an evaluation; it only
/// marks the text confidence metric as unavailable.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),

    #[error("OCR failed: {0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
