//! Camera metadata types

/// Acquisition settings recorded by the camera.
///
/// Values are the display form of the EXIF field; `None` when the tag is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraMetadata {
    pub model: Option<String>,
    pub iso: Option<String>,
    /// Exposure time, e.g. "1/250 s"
    pub shutter: Option<String>,
    /// F-number, e.g. "f/2.8"
    pub aperture: Option<String>,
    /// Focal length, e.g. "50 mm"
    pub focal: Option<String>,
    /// DateTimeOriginal as recorded
    pub date: Option<String>,
}
