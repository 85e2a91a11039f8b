use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::debayer::types::RgbFrame;
use crate::image_pipeline::output::types::{ConversionConfig, OutputFormat};
use crate::image_pipeline::output::png_writer::PngImageWriter;
use crate::image_pipeline::output::standard_tiff_writer::StandardTiffWriter;

pub trait ImageWriter {
    /// File extension for images produced by this writer, without the dot
    fn extension(&self) -> &'static str;
    fn write_rgb(&self, image: &RgbFrame, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}

impl<T: ImageWriter + ?Sized> ImageWriter for Box<T> {
    fn extension(&self) -> &'static str {
        (**self).extension()
    }

    fn write_rgb(&self, image: &RgbFrame, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        (**self).write_rgb(image, output, config)
    }
}

pub fn writer_for(format: OutputFormat) -> Box<dyn ImageWriter> {
    match format {
        OutputFormat::Png => Box::new(PngImageWriter),
        OutputFormat::Tiff => Box::new(StandardTiffWriter),
    }
}
