use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use image::{DynamicImage, GrayImage, RgbImage};

use crate::{
    error::{Result, ScanError},
    image_utils::rgb_to_gray,
    metadata::{Metadata, exif::ExifExtractor},
};

/// One decoded image together with its embedded metadata. Immutable once
/// built; clones share the pixel buffers.
#[derive(Debug, Clone)]
pub struct ImageSample {
    image: Arc<DynamicImage>,
    gray: Arc<GrayImage>,
    metadata: Metadata,
    source: Option<PathBuf>,
}

impl ImageSample {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScanError::ImageNotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        let mut sample = Self::from_bytes(&bytes)?;
        sample.source = Some(path.to_path_buf());

        Ok(sample)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        let metadata = ExifExtractor::read(bytes);

        Self::build(image, metadata)
    }

    /// Wraps an already-decoded raster. No metadata is attached.
    pub fn from_image(image: DynamicImage) -> Result<Self> {
        Self::build(image, Metadata::Absent)
    }

    pub fn with_metadata<K, V, I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let tags = tags
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.metadata = Metadata::Tags(tags);
        self
    }

    pub fn with_raw_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    fn build(image: DynamicImage, metadata: Metadata) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ScanError::EmptyImage);
        }

        let gray = rgb_to_gray(&image.to_rgb8());

        Ok(Self {
            image: Arc::new(image),
            gray: Arc::new(gray),
            metadata,
            source: None,
        })
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn shared_image(&self) -> Arc<DynamicImage> {
        Arc::clone(&self.image)
    }

    /// Luminance plane, alpha ignored.
    pub fn gray(&self) -> &GrayImage {
        &self.gray
    }

    pub fn rgb(&self) -> RgbImage {
        self.image.to_rgb8()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn channel_count(&self) -> u8 {
        self.image.color().channel_count()
    }

    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Anything `evaluate` accepts as an image.
#[derive(Debug, Clone)]
pub enum ImageInput {
    Path(PathBuf),
    Bytes(Vec<u8>),
    Raster(DynamicImage),
    Sample(ImageSample),
}

impl ImageInput {
    pub fn load(self) -> Result<ImageSample> {
        match self {
            ImageInput::Path(path) => ImageSample::open(path),
            ImageInput::Bytes(bytes) => ImageSample::from_bytes(&bytes),
            ImageInput::Raster(image) => ImageSample::from_image(image),
            ImageInput::Sample(sample) => Ok(sample),
        }
    }
}

impl From<&Path> for ImageInput {
    fn from(path: &Path) -> Self {
        ImageInput::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        ImageInput::Path(path)
    }
}

impl From<&str> for ImageInput {
    fn from(path: &str) -> Self {
        ImageInput::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for ImageInput {
    fn from(bytes: Vec<u8>) -> Self {
        ImageInput::Bytes(bytes)
    }
}

impl From<DynamicImage> for ImageInput {
    fn from(image: DynamicImage) -> Self {
        ImageInput::Raster(image)
    }
}

impl From<ImageSample> for ImageInput {
    fn from(sample: ImageSample) -> Self {
        ImageInput::Sample(sample)
    }
}
