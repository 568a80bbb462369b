use std::{fmt, path::Path, sync::Arc, time::Duration};

use log::info;
use rayon::iter::{IntoParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::{analysis::ScanContext, ocr::TextRecognizer};

pub mod analysis;
pub mod detection;
pub mod error;
pub mod image_utils;
pub mod metadata;
pub mod metrics;
pub mod ocr;
pub mod report;
pub mod sample;

pub use detection::DetectionResult;
pub use error::{OcrError, Result, ScanError};
pub use metrics::{MAX_SCORE, MetricName, MetricResult, MetricSet, MetricValue};
pub use sample::{ImageInput, ImageSample};

pub const DEFAULT_THRESHOLD: u8 = 5;

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Minimum score for a screenshot classification, `0..=13`.
    pub threshold: u8,
    /// Attach every raw metric value to the result.
    pub verbose: bool,
    /// Run the heuristics on the rayon pool.
    pub parallel: bool,
    /// Upper bound on a text recognition call; `None` waits indefinitely.
    pub ocr_timeout: Option<Duration>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            verbose: false,
            parallel: true,
            ocr_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.threshold > MAX_SCORE {
            return Err(ScanError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

/// Classifies images as screenshots or photographs. Holds configuration and
/// the optional text recognizer only; evaluations share no state.
#[derive(Clone)]
pub struct ScreenshotScanner {
    config: ScanConfig,
    recognizer: Option<Arc<dyn TextRecognizer>>,
}

impl ScreenshotScanner {
    pub fn new() -> Self {
        Self {
            config: ScanConfig::default(),
            recognizer: None,
        }
    }

    pub fn with_threshold(threshold: u8) -> Result<Self> {
        Self::with_config(ScanConfig {
            threshold,
            ..ScanConfig::default()
        })
    }

    pub fn with_config(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            recognizer: None,
        })
    }

    /// Plugs in a text recognizer for the text confidence metric. With
    /// `ocr_timeout` set, each call runs on its own thread and a call that
    /// exceeds the limit is left running detached, so a recognizer that hangs
    /// leaves one thread behind per evaluated image, including in
    /// `evaluate_many`.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn threshold(&self) -> u8 {
        self.config.threshold
    }

    /// Non-verbose evaluation of an image file.
    pub fn process<P: AsRef<Path>>(&self, path: P) -> Result<DetectionResult> {
        self.is_screenshot(path.as_ref(), false)
    }

    pub fn is_screenshot(&self, image: impl Into<ImageInput>, verbose: bool) -> Result<DetectionResult> {
        let sample = image.into().load()?;
        Ok(self.run(&sample, verbose))
    }

    /// Evaluates with the configured verbosity.
    pub fn evaluate(&self, image: impl Into<ImageInput>) -> Result<DetectionResult> {
        self.is_screenshot(image, self.config.verbose)
    }

    pub fn evaluate_sample(&self, sample: &ImageSample) -> DetectionResult {
        self.run(sample, self.config.verbose)
    }

    /// One result per input, in input order. A failing image does not affect
    /// the others.
    pub fn evaluate_many<P>(&self, paths: &[P]) -> Vec<Result<DetectionResult>>
    where
        P: AsRef<Path> + Sync,
    {
        if self.config.parallel {
            paths
                .par_iter()
                .map(|path| self.evaluate(path.as_ref()))
                .collect()
        } else {
            paths.iter().map(|path| self.evaluate(path.as_ref())).collect()
        }
    }

    fn run(&self, sample: &ImageSample, verbose: bool) -> DetectionResult {
        let ctx = ScanContext {
            recognizer: self.recognizer.as_ref(),
            ocr_timeout: self.config.ocr_timeout,
        };

        let results: Vec<MetricResult> = if self.config.parallel {
            MetricName::ALL
                .into_par_iter()
                .map(|name| analysis::measure(name, sample, &ctx))
                .collect()
        } else {
            MetricName::ALL
                .into_iter()
                .map(|name| analysis::measure(name, sample, &ctx))
                .collect()
        };

        let result = DetectionResult::from_votes(results, self.config.threshold, verbose);

        match sample.source() {
            Some(path) => info!("{}: {}", path.display(), result.summary()),
            None => info!("{}", result.summary()),
        }

        result
    }
}

impl Default for ScreenshotScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScreenshotScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenshotScanner")
            .field("config", &self.config)
            .field("recognizer", &self.recognizer.as_ref().map(|r| r.name().to_string()))
            .finish()
    }
}

/// Evaluates one image with a fresh scanner. The threshold is checked before
/// the image is loaded.
pub fn evaluate(image: impl Into<ImageInput>, threshold: u8, verbose: bool) -> Result<DetectionResult> {
    let scanner = ScreenshotScanner::with_config(ScanConfig {
        threshold,
        verbose,
        ..ScanConfig::default()
    })?;

    scanner.evaluate(image)
}
