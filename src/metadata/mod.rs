pub mod exif;

use std::collections::BTreeMap;

/// Embedded capture metadata of an image, as far as it could be read.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Metadata {
    /// The container carries no metadata block at all.
    #[default]
    Absent,
    /// Tag name to display value, primary IFD only.
    Tags(BTreeMap<String, String>),
    /// A metadata block exists but could not be parsed.
    Unreadable(String),
}

impl Metadata {
    pub fn tags(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Metadata::Tags(tags) => Some(tags),
            _ => None,
        }
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.tags()?
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tag))
            .map(|(_, value)| value.as_str())
    }
}
