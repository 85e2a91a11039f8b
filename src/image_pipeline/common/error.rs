use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),
    
    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),
    
    #[error("Failed to decode RAW image: {0}")]
    DecodeError(String),
    
    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Failed to read camera metadata: {0}")]
    MetadataError(String),
    
    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),
    
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid CFA code {code} at row {row}, column {col} (expected 0..=3)")]
    InvalidCode { row: usize, col: usize, code: i32 },

    #[error("Unsupported color description: {0}. Must be raw tag bytes indicating a Bayer pattern")]
    UnsupportedColorSpace(String),

    #[error("Unsupported Bayer pattern: {0}")]
    UnsupportedBayerPattern(String),

    #[error("Demosaic failed: {0}")]
    DemosaicError(String),
    
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
