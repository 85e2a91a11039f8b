use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::debayer::types::RgbFrame;
use crate::image_pipeline::output::types::{ConversionConfig, TiffCompression};
use crate::image_pipeline::output::writer::ImageWriter;

pub struct StandardTiffWriter;

impl ImageWriter for StandardTiffWriter {
    fn extension(&self) -> &'static str {
        "tiff"
    }

    fn write_rgb(&self, image: &RgbFrame, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width, image.height);

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        let (width, height) = (image.width as u32, image.height as u32);
        let written = if image.bits_per_sample <= 8 {
            let bytes: Vec<u8> = image.data.iter().map(|&v| v as u8).collect();
            encoder.write_image::<tiff::encoder::colortype::RGB8>(width, height, &bytes)
        } else {
            encoder.write_image::<tiff::encoder::colortype::RGB16>(width, height, &image.data)
        };
        written.map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
