//! Text recognition capability used by the text confidence heuristic.
//!
//! The scanner never links an OCR engine itself. Callers plug one in through
//! [`TextRecognizer`]; without one, text confidence is reported as unavailable.

use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    thread,
    time::Duration,
};

use crossbeam_channel::RecvTimeoutError;
use image::DynamicImage;
use log::warn;

use crate::error::OcrError;

pub trait TextRecognizer: Send + Sync {
    /// Engine identifier used in log messages.
    fn name(&self) -> &str;

    /// Average confidence, in `[0, 100]`, over the text regions recognized in
    /// `image`.
    fn text_confidence(&self, image: &DynamicImage) -> Result<f64, OcrError>;
}

/// Runs the recognizer, giving up after `timeout` when one is set. A timed-out
/// recognition keeps running on its own thread; its result is discarded. A
/// panicking recognizer degrades to `None` on either path.
pub fn recognize(
    recognizer: &Arc<dyn TextRecognizer>,
    image: Arc<DynamicImage>,
    timeout: Option<Duration>,
) -> Option<f64> {
    let outcome = match timeout {
        None => recognize_inline(recognizer, &image),
        Some(limit) => recognize_bounded(recognizer, image, limit),
    };

    match outcome {
        Ok(confidence) if (0.0..=100.0).contains(&confidence) => Some(confidence),
        Ok(confidence) => {
            warn!("{} reported out-of-range confidence {}", recognizer.name(), confidence);
            None
        }
        Err(e) => {
            warn!("{}: {}", recognizer.name(), e);
            None
        }
    }
}

fn recognize_inline(recognizer: &Arc<dyn TextRecognizer>, image: &DynamicImage) -> Result<f64, OcrError> {
    panic::catch_unwind(AssertUnwindSafe(|| recognizer.text_confidence(image)))
        .unwrap_or_else(|_| Err(OcrError::Failed("recognizer panicked".into())))
}

fn recognize_bounded(
    recognizer: &Arc<dyn TextRecognizer>,
    image: Arc<DynamicImage>,
    limit: Duration,
) -> Result<f64, OcrError> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    let worker = Arc::clone(recognizer);

    thread::Builder::new()
        .name("text-recognizer".into())
        .spawn(move || {
            let _ = tx.send(worker.text_confidence(&image));
        })
        .map_err(|e| OcrError::Unavailable(e.to_string()))?;

    match rx.recv_timeout(limit) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => Err(OcrError::Unavailable(format!(
            "timed out after {:?}",
            limit
        ))),
        Err(RecvTimeoutError::Disconnected) => {
            Err(OcrError::Failed("recognizer thread exited without a result".into()))
        }
    }
}
