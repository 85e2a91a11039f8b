use tracing::{info, warn, instrument};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    debayer::{CpuDebayer, RgbFrame},
    camera::{CameraMetadata, CameraMetadataReader, ExifCameraReader},
    output::{ConversionConfig, ImageWriter, write_raw_dump, writer_for},
    raw::{RawImage, RawImageReader, RawLoaderReader},
    report::MetadataReport,
};

/// Files written for one input
#[derive(Debug, Clone)]
pub struct FileOutputs {
    pub raw_path: PathBuf,
    pub image_path: PathBuf,
    pub report_path: Option<PathBuf>,
    pub report: MetadataReport,
}

/// Decodes a RAW file, dumps its samples, debayers it and writes the image and report.
pub struct RawExtractPipeline<R: RawImageReader, C: CameraMetadataReader, W: ImageWriter> {
    reader: R,
    camera_reader: C,
    writer: W,
    config: ConversionConfig,
}

impl RawExtractPipeline<RawLoaderReader, ExifCameraReader, Box<dyn ImageWriter>> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: RawLoaderReader,
            camera_reader: ExifCameraReader,
            writer: writer_for(config.format),
            config,
        }
    }
}

impl<R: RawImageReader, C: CameraMetadataReader, W: ImageWriter> RawExtractPipeline<R, C, W> {
    pub fn with_custom(reader: R, camera_reader: C, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            camera_reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Decodes sensor data and camera metadata. Missing EXIF is not fatal.
    fn decode(&self, input_data: &[u8]) -> Result<(RawImage, CameraMetadata)> {
        let raw_image = {
            let _span = tracing::info_span!("decode_raw").entered();
            self.reader.read_raw(input_data)?
        };

        let camera = {
            let _span = tracing::info_span!("read_camera").entered();
            self.camera_reader.read_camera(input_data).unwrap_or_else(|e| {
                warn!("No camera metadata: {}", e);
                CameraMetadata::default()
            })
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = raw_image.frame.width,
                height = raw_image.frame.height
            ).entered();
            self.validate_dimensions(raw_image.frame.width, raw_image.frame.height)?;
        }

        Ok((raw_image, camera))
    }

    fn reconstruct(&self, raw_image: &RawImage) -> Result<RgbFrame> {
        let _span = tracing::info_span!("debayer").entered();
        CpuDebayer::new(self.config.demosaic).process(&raw_image.frame, &raw_image.color, &raw_image.cfa)
    }

    fn encode(&self, rgb: &RgbFrame, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("encode_image", format = self.writer.extension()).entered();
        self.writer.write_rgb(rgb, output, &self.config)
    }

    /// In-memory variant of [`Self::process_file`]: the raw dump goes to `raw_output`,
    /// the reconstructed image to `image_output`.
    #[instrument(skip(self, input_data, raw_output, image_output), fields(input_size = input_data.len()))]
    pub fn convert(
        &self,
        input_data: &[u8],
        raw_output: &mut dyn Write,
        image_output: &mut dyn Write,
    ) -> Result<MetadataReport> {
        let (raw_image, camera) = self.decode(input_data)?;

        {
            let _span = tracing::info_span!("write_raw_dump").entered();
            write_raw_dump(&raw_image.frame, raw_output)?;
        }

        let rgb = self.reconstruct(&raw_image)?;
        self.encode(&rgb, image_output)?;

        info!(
            width = rgb.width,
            height = rgb.height,
            "Extraction complete"
        );
        Ok(MetadataReport::new(raw_image.info, camera))
    }

    /// Writes `<stem>.raw`, `<stem>.<ext>` and, with `save_info`, `<stem>.txt`
    /// next to the input file.
    #[instrument(skip(self, input_path))]
    pub fn process_file<P: AsRef<Path>>(&self, input_path: P) -> Result<FileOutputs> {
        let input_path = input_path.as_ref();
        let raw_path = input_path.with_extension("raw");
        let image_path = input_path.with_extension(self.writer.extension());

        info!(input = %input_path.display(), "Extracting file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let (raw_image, camera) = self.decode(&input_data)?;

        {
            let _span = tracing::info_span!("write_raw_dump").entered();
            let mut raw_file = create_output(&raw_path)?;
            write_raw_dump(&raw_image.frame, &mut raw_file)?;
            raw_file.flush()?;
        }

        let rgb = self.reconstruct(&raw_image)?;
        let mut image_file = create_output(&image_path)?;
        self.encode(&rgb, &mut image_file)?;
        image_file.flush()?;

        let report = MetadataReport::new(raw_image.info, camera);
        let report_path = if self.config.save_info {
            let _span = tracing::info_span!("write_report").entered();
            let path = input_path.with_extension("txt");
            std::fs::write(&path, report.render_text()).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", path.display(), e))
            })?;
            Some(path)
        } else {
            None
        };

        Ok(FileOutputs {
            raw_path,
            image_path,
            report_path,
            report,
        })
    }
}

fn create_output(path: &Path) -> Result<std::io::BufWriter<std::fs::File>> {
    std::fs::File::create(path)
        .map(std::io::BufWriter::new)
        .map_err(|e| ConversionError::OutputWriteError(format!("{}: {}", path.display(), e)))
}
