use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::camera::types::CameraMetadata;

pub trait CameraMetadataReader {
    fn read_camera(&self, data: &[u8]) -> Result<CameraMetadata>;
}
