//! Camera metadata module
//!
//! Reads acquisition settings (model, ISO, shutter, aperture, focal length, date)
//! from the EXIF block embedded in TIFF-based RAW containers.

mod reader;
mod kamadak_reader;
pub mod types;

pub use reader::CameraMetadataReader;
pub use kamadak_reader::ExifCameraReader;
pub use types::CameraMetadata;
