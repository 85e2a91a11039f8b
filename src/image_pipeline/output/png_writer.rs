use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::debayer::types::RgbFrame;
use crate::image_pipeline::output::types::ConversionConfig;
use crate::image_pipeline::output::writer::ImageWriter;

/// Writes RGB PNGs. Frames of 8 bits or less become 8-bit PNGs, anything else 16-bit.
///
/// Sample values are stored as-is, without scaling to the full range.
pub struct PngImageWriter;

impl ImageWriter for PngImageWriter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn write_rgb(&self, image: &RgbFrame, output: &mut dyn Write, _config: &ConversionConfig) -> Result<()> {
        debug!("Encoding PNG image: {}x{}", image.width, image.height);

        let (depth, bytes): (png::BitDepth, Vec<u8>) = if image.bits_per_sample <= 8 {
            (png::BitDepth::Eight, image.data.iter().map(|&v| v as u8).collect())
        } else {
            // PNG stores 16-bit samples big-endian
            (png::BitDepth::Sixteen, image.data.iter().flat_map(|&v| v.to_be_bytes()).collect())
        };

        let mut encoder = png::Encoder::new(output, image.width as u32, image.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(depth);

        let mut writer = encoder
            .write_header()
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        writer
            .write_image_data(&bytes)
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        debug!("PNG encoding complete");
        Ok(())
    }
}
