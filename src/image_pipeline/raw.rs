//! RAW image reading module
//!
//! This module provides format-agnostic RAW image reading capabilities.

mod reader;
mod rawloader_reader;
pub mod types;

pub use reader::RawImageReader;
pub use rawloader_reader::RawLoaderReader;
pub use types::{CfaGrid, ColorDescriptor, RawImage, RawMetadata, SensorFrame};
