use crate::{
    metadata::Metadata,
    metrics::{MetricName, MetricResult, MetricValue},
    sample::ImageSample,
};

/// Tags only a camera pipeline writes.
pub const CAMERA_TAGS: [&str; 9] = [
    "Make",
    "Model",
    "ExposureTime",
    "FNumber",
    "PhotographicSensitivity",
    "ISOSpeedRatings",
    "FocalLength",
    "LensMake",
    "LensModel",
];

pub fn measure(sample: &ImageSample) -> MetricResult {
    let Some(count) = camera_tag_count(sample.metadata()) else {
        return MetricResult::unavailable(MetricName::ExifLevel);
    };

    MetricResult::new(
        MetricName::ExifLevel,
        MetricValue::Count(count),
        count == 0,
        || "No camera metadata".into(),
    )
}

/// `None` when a metadata block exists but could not be read.
pub fn camera_tag_count(metadata: &Metadata) -> Option<usize> {
    match metadata {
        Metadata::Absent => Some(0),
        Metadata::Unreadable(_) => None,
        Metadata::Tags(_) => Some(
            CAMERA_TAGS
                .iter()
                .filter(|tag| metadata.get(tag).is_some_and(|v| !v.trim().is_empty()))
                .count(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_absent_metadata_counts_as_no_camera() {
        assert_eq!(camera_tag_count(&Metadata::Absent), Some(0));
    }

    #[test]
    fn test_unreadable_metadata_is_unavailable() {
        assert_eq!(camera_tag_count(&Metadata::Unreadable("truncated IFD".into())), None);
    }

    #[test]
    fn test_software_only_tags_are_not_camera_tags() {
        let tags = BTreeMap::from([
            ("Software".to_string(), "screencaptureui".to_string()),
            ("DateTime".to_string(), "2024:01:01 10:00:00".to_string()),
        ]);
        assert_eq!(camera_tag_count(&Metadata::Tags(tags)), Some(0));
    }

    #[test]
    fn test_camera_tags_are_counted() {
        let tags = BTreeMap::from([
            ("Make".to_string(), "Canon".to_string()),
            ("Model".to_string(), "EOS R6".to_string()),
            ("ExposureTime".to_string(), "1/125 s".to_string()),
            ("LensModel".to_string(), " ".to_string()),
        ]);
        assert_eq!(camera_tag_count(&Metadata::Tags(tags)), Some(3));
    }
}
