use std::{collections::BTreeMap, io::Cursor};

use image::ImageFormat;
use log::{debug, warn};

use super::Metadata;

pub struct ExifExtractor;

impl ExifExtractor {
    /// Reads the EXIF block of an encoded image. Formats that cannot carry
    /// EXIF yield `Metadata::Absent`.
    pub fn read(bytes: &[u8]) -> Metadata {
        let format = match image::guess_format(bytes) {
            Ok(format) => format,
            Err(_) => return Metadata::Absent,
        };

        if !Self::may_carry_exif(format) {
            return Metadata::Absent;
        }

        let mut reader = Cursor::new(bytes);
        let exif_reader = exif::Reader::new();

        match exif_reader.read_from_container(&mut reader) {
            Ok(exif_data) => Self::parse_exif(exif_data),
            Err(exif::Error::NotFound(_)) => {
                debug!("no EXIF block in {:?} container", format);
                Metadata::Absent
            }
            Err(e) => {
                warn!("unreadable EXIF block: {}", e);
                Metadata::Unreadable(e.to_string())
            }
        }
    }

    fn may_carry_exif(format: ImageFormat) -> bool {
        matches!(
            format,
            ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Tiff | ImageFormat::WebP
        )
    }

    fn parse_exif(exif: exif::Exif) -> Metadata {
        let mut all_tags = BTreeMap::new();

        for field in exif.fields() {
            if field.ifd_num != exif::In::PRIMARY {
                continue;
            }
            let tag_name = format!("{}", field.tag);
            let value = field.display_value().to_string();
            all_tags.insert(tag_name, value.trim_matches('"').to_string());
        }

        debug!("read {} EXIF tags", all_tags.len());
        Metadata::Tags(all_tags)
    }
}

#[cfg(test)]
mod tests {
    use exif::{Field, In, Tag, Value, experimental::Writer};
    use image::{DynamicImage, RgbImage};

    use super::*;

    fn encode(format: ImageFormat) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::new(8, 8));
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    fn ascii(tag: Tag, text: &str) -> Field {
        Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![text.as_bytes().to_vec()]),
        }
    }

    /// JPEG with an APP1 segment carrying `tiff` right after SOI.
    fn jpeg_with_app1(tiff: &[u8]) -> Vec<u8> {
        let jpeg = encode(ImageFormat::Jpeg);
        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&((tiff.len() + 8) as u16).to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend_from_slice(tiff);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_jpeg_exif_tags_are_read() {
        let make = ascii(Tag::Make, "Canon");
        let model = ascii(Tag::Model, "EOS R6");
        let mut writer = Writer::new();
        writer.push_field(&make);
        writer.push_field(&model);
        let mut tiff = Cursor::new(Vec::new());
        writer.write(&mut tiff, false).unwrap();

        let metadata = ExifExtractor::read(&jpeg_with_app1(tiff.get_ref()));
        assert_eq!(metadata.get("Make"), Some("Canon"));
        assert_eq!(metadata.get("Model"), Some("EOS R6"));
    }

    #[test]
    fn test_truncated_ifd_is_unreadable() {
        let metadata = ExifExtractor::read(&jpeg_with_app1(b"II*\0\x08\0\0\0"));
        assert!(matches!(metadata, Metadata::Unreadable(_)), "got {:?}", metadata);
    }

    #[test]
    fn test_png_without_exif_is_absent() {
        assert_eq!(ExifExtractor::read(&encode(ImageFormat::Png)), Metadata::Absent);
    }

    #[test]
    fn test_format_without_exif_support_is_absent() {
        assert_eq!(ExifExtractor::read(&encode(ImageFormat::Bmp)), Metadata::Absent);
    }

    #[test]
    fn test_garbage_is_absent() {
        assert_eq!(ExifExtractor::read(b"definitely not an image"), Metadata::Absent);
    }
}
