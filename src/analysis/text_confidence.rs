use std::{sync::Arc, time::Duration};

use crate::{
    metrics::{MetricName, MetricResult, MetricValue},
    ocr::{TextRecognizer, recognize},
    sample::ImageSample,
};

const HIGH_CONFIDENCE: f64 = 70.0;

pub fn measure(
    sample: &ImageSample,
    recognizer: Option<&Arc<dyn TextRecognizer>>,
    timeout: Option<Duration>,
) -> MetricResult {
    let Some(recognizer) = recognizer else {
        return MetricResult::unavailable(MetricName::TextConf);
    };

    let Some(confidence) = recognize(recognizer, sample.shared_image(), timeout) else {
        return MetricResult::unavailable(MetricName::TextConf);
    };

    MetricResult::new(
        MetricName::TextConf,
        MetricValue::Scalar(confidence),
        confidence > HIGH_CONFIDENCE,
        || format!("High text confidence: {:.2}", confidence),
    )
}
