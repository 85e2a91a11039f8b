//! Output configuration types

use crate::image_pipeline::debayer::types::DemosaicMethod;

/// Encoding of the reconstructed image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 8/16-bit RGB PNG (default)
    #[default]
    Png,
    /// 8/16-bit RGB TIFF, honoring `compression` and `predictor`
    Tiff,
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

/// Configuration for RAW extraction
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Encoding of the reconstructed image
    pub format: OutputFormat,
    /// Compression method to use for TIFF output
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    /// Note: Predictor adds processing time, set to None for maximum speed
    pub predictor: Option<u16>,
    /// Interpolation used by the reconstruction routine
    pub demosaic: DemosaicMethod,
    /// Whether to write a `.txt` metadata report next to the input
    pub save_info: bool,
    /// Whether to validate image dimensions before conversion
    pub validate_dimensions: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            compression: TiffCompression::None,
            predictor: None,
            demosaic: DemosaicMethod::Linear,
            save_info: false,
            validate_dimensions: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    format: Option<OutputFormat>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    demosaic: Option<DemosaicMethod>,
    save_info: Option<bool>,
    validate_dimensions: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn demosaic(mut self, method: DemosaicMethod) -> Self {
        self.demosaic = Some(method);
        self
    }

    pub fn save_info(mut self, enable: bool) -> Self {
        self.save_info = Some(enable);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            format: self.format.unwrap_or(default.format),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            demosaic: self.demosaic.unwrap_or(default.demosaic),
            save_info: self.save_info.unwrap_or(default.save_info),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
        }
    }
}
