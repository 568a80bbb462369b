use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};

/// Number of heuristics, and the denominator of every confidence value.
pub const MAX_SCORE: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    Alpha,
    AspectRatio,
    BorderVars,
    ElaStd,
    ExifLevel,
    HorizEdgeRatio,
    MoireScore,
    NoiseMedianVar,
    Sharpness,
    SolidColorRatio,
    StatusBar,
    TextConf,
    VertSymmetry,
}

impl MetricName {
    /// Evaluation and reporting order.
    pub const ALL: [MetricName; MAX_SCORE as usize] = [
        MetricName::Alpha,
        MetricName::AspectRatio,
        MetricName::BorderVars,
        MetricName::ElaStd,
        MetricName::ExifLevel,
        MetricName::HorizEdgeRatio,
        MetricName::MoireScore,
        MetricName::NoiseMedianVar,
        MetricName::Sharpness,
        MetricName::SolidColorRatio,
        MetricName::StatusBar,
        MetricName::TextConf,
        MetricName::VertSymmetry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::Alpha => "alpha",
            MetricName::AspectRatio => "aspect_ratio",
            MetricName::BorderVars => "border_vars",
            MetricName::ElaStd => "ela_std",
            MetricName::ExifLevel => "exif_level",
            MetricName::HorizEdgeRatio => "horiz_edge_ratio",
            MetricName::MoireScore => "moire_score",
            MetricName::NoiseMedianVar => "noise_median_var",
            MetricName::Sharpness => "sharpness",
            MetricName::SolidColorRatio => "solid_color_ratio",
            MetricName::StatusBar => "status_bar",
            MetricName::TextConf => "text_conf",
            MetricName::VertSymmetry => "vert_symmetry",
        }
    }

    pub fn position(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Raw value of a heuristic. `Unavailable` marks a metric whose precondition
/// did not hold for this image and serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Flag(bool),
    Count(usize),
    Scalar(f64),
    Pair(f64, f64),
    Unavailable,
}

impl MetricValue {
    pub fn is_available(&self) -> bool {
        !matches!(self, MetricValue::Unavailable)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            MetricValue::Scalar(v) => Some(v),
            MetricValue::Count(n) => Some(n as f64),
            _ => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Flag(b) => write!(f, "{}", b),
            MetricValue::Count(n) => write!(f, "{}", n),
            MetricValue::Scalar(v) => write!(f, "{:.2}", v),
            MetricValue::Pair(a, b) => write!(f, "({:.2}, {:.2})", a, b),
            MetricValue::Unavailable => f.write_str("n/a"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricResult {
    pub name: MetricName,
    pub value: MetricValue,
    pub vote: bool,
    pub reason: Option<String>,
}

impl MetricResult {
    /// Builds a result; the reason is only rendered for a positive vote.
    pub fn new(name: MetricName, value: MetricValue, vote: bool, reason: impl FnOnce() -> String) -> Self {
        let reason = vote.then(reason);
        Self {
            name,
            value,
            vote,
            reason,
        }
    }

    pub fn unavailable(name: MetricName) -> Self {
        Self {
            name,
            value: MetricValue::Unavailable,
            vote: false,
            reason: None,
        }
    }
}

/// All thirteen results of one evaluation, in `MetricName::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSet(Vec<MetricResult>);

impl MetricSet {
    pub(crate) fn new(results: Vec<MetricResult>) -> Self {
        Self(results)
    }

    pub fn get(&self, name: MetricName) -> Option<&MetricResult> {
        self.0.iter().find(|m| m.name == name)
    }

    pub fn value(&self, name: MetricName) -> Option<&MetricValue> {
        self.get(name).map(|m| &m.value)
    }

    pub fn vote(&self, name: MetricName) -> bool {
        self.get(name).is_some_and(|m| m.vote)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricResult> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for MetricSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for metric in &self.0 {
            map.serialize_entry(metric.name.as_str(), &metric.value)?;
        }
        map.end()
    }
}
