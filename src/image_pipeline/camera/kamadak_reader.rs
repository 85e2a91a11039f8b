use std::io::Cursor;

use exif::{Exif, In, Tag, Value};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::camera::reader::CameraMetadataReader;
use crate::image_pipeline::camera::types::CameraMetadata;

/// Camera metadata reader backed by kamadak-exif.
pub struct ExifCameraReader;

impl CameraMetadataReader for ExifCameraReader {
    fn read_camera(&self, data: &[u8]) -> Result<CameraMetadata> {
        let exif = exif::Reader::new()
            .read_from_container(&mut Cursor::new(data))
            .map_err(|e| ConversionError::MetadataError(e.to_string()))?;

        debug!("Read {} EXIF fields", exif.fields().len());

        Ok(CameraMetadata {
            model: field_text(&exif, Tag::Model),
            iso: field_text(&exif, Tag::PhotographicSensitivity),
            shutter: field_text(&exif, Tag::ExposureTime),
            aperture: field_text(&exif, Tag::FNumber),
            focal: field_text(&exif, Tag::FocalLength),
            date: field_text(&exif, Tag::DateTimeOriginal),
        })
    }
}

/// ASCII fields are unquoted and trimmed; everything else uses the display form with units.
fn field_text(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let text = match &field.value {
        Value::Ascii(parts) => parts
            .iter()
            .map(|p| String::from_utf8_lossy(p).trim_end_matches('\0').trim().to_string())
            .collect::<Vec<_>>()
            .join(", "),
        _ => field.display_value().with_unit(exif).to_string(),
    };
    Some(text)
}
