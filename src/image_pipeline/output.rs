//! Output module
//!
//! This module writes the per-file artifacts: the reconstructed image (PNG or TIFF)
//! and the raw sensor dump.

mod writer;
mod png_writer;
mod standard_tiff_writer;
mod raw_dump;
pub mod types;

pub use writer::{ImageWriter, writer_for};
pub use png_writer::PngImageWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use raw_dump::write_raw_dump;
pub use types::{OutputFormat, TiffCompression, ConversionConfig, ConversionConfigBuilder};
