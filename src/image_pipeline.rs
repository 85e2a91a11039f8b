//! Image processing pipeline module
//!
//! This module provides a structured approach to RAW extraction, with separate modules
//! for RAW reading, camera metadata, debayering, output writing and orchestration.

pub mod raw;
pub mod camera;
pub mod debayer;
pub mod output;
pub mod report;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use raw::{
    CfaGrid,
    ColorDescriptor,
    RawImage,
    RawImageReader,
    RawLoaderReader,
    RawMetadata,
    SensorFrame,
};

pub use camera::{
    CameraMetadata,
    CameraMetadataReader,
    ExifCameraReader,
};

pub use debayer::{
    BayerLabel,
    CpuDebayer,
    DemosaicMethod,
    RgbFrame,
    debayer,
    infer_pattern,
};

pub use output::{
    ConversionConfig,
    ConversionConfigBuilder,
    ImageWriter,
    OutputFormat,
    PngImageWriter,
    StandardTiffWriter,
    TiffCompression,
};

pub use report::MetadataReport;

pub use conversions::{
    BatchSummary,
    FileOutputs,
    RawExtractPipeline,
    Verbosity,
    collect_inputs,
    run_batch,
};
