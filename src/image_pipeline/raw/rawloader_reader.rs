//! RAW image reader implementation using the rawloader library.
//!
//! This module provides support for reading various RAW image formats (ARW, CR2, NEF, DNG, etc.)
//! using the rawloader library. It decodes the sensor data, crops it to the visible area and
//! collects the sensor metadata needed for debayering and reporting.

use std::io::Cursor;

use tracing::debug;
use rawloader::RawImageData as RawloaderImageData;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::raw::types::{CfaGrid, ColorDescriptor, RawImage, RawMetadata, SensorFrame};
use crate::image_pipeline::raw::reader::RawImageReader;

/// RAW image reader that uses the rawloader library for decoding.
///
/// This reader supports any RAW format that rawloader can decode, including but not limited to:
/// - Canon CR2
/// - Nikon NEF
/// - Sony ARW
pub struct RawLoaderReader;

/// Default bit depth when no white level information is available from the RAW file.
const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

/// The bit width of the u16 data type, used for calculating actual bits per sample.
const U16_BITS: u32 = 16;

/// Tag bytes naming the color of CFA codes 0..=3.
const BAYER_COLOR_TAG: &[u8; 4] = b"RGBG";

impl RawImageReader for RawLoaderReader {
    /// Reads and decodes RAW image data from a byte array.
    ///
    /// This method:
    /// 1. Decodes the RAW file using rawloader
    /// 2. Converts the data to u16 format (handles both integer and float RAW data)
    /// 3. Crops the samples to the visible area and re-phases the CFA grid to match
    /// 4. Calculates the actual bits per sample from the sensor's white level metadata
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rawdump::image_pipeline::{RawImageReader, RawLoaderReader};
    ///
    /// let reader = RawLoaderReader;
    /// let raw_bytes = std::fs::read("image.nef").unwrap();
    /// let image = reader.read_raw(&raw_bytes).unwrap();
    /// ```
    fn read_raw(&self, data: &[u8]) -> Result<RawImage> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        debug!("Decoded image: {}x{} ({} cpp)", decoded.width, decoded.height, decoded.cpp);

        // Integer data is cast directly, float data (normalized 0.0-1.0) is scaled to u16 range
        let (samples, sample_type): (Vec<u16>, &'static str) = match &decoded.data {
            RawloaderImageData::Integer(values) => {
                (values.clone(), "uint16")
            }
            RawloaderImageData::Float(values) => {
                (values.iter().map(|&v| (v * u16::MAX as f32) as u16).collect(), "float32")
            }
        };

        let [top, right, bottom, left] = decoded.crops;
        let (samples, width, height) = crop_visible(
            &samples,
            decoded.width,
            decoded.height,
            decoded.cpp,
            [top, right, bottom, left],
        )?;

        let bits_per_sample = bits_per_sample(&decoded.whitelevels);
        debug!("Calculated bits_per_sample: {} (white levels: {:?})", bits_per_sample, decoded.whitelevels);

        let cfa = if decoded.cpp == 1 {
            cfa_grid(&decoded.cfa, top, left)
        } else {
            CfaGrid::empty()
        };
        let color = if decoded.cpp == 1 {
            ColorDescriptor::Tag(BAYER_COLOR_TAG.to_vec())
        } else {
            ColorDescriptor::Interleaved { channels: decoded.cpp }
        };

        debug!("Visible area {}x{}, CFA {} ({})", width, height, cfa, decoded.cfa.name);

        let info = RawMetadata {
            model: format!("{} {}", decoded.clean_make, decoded.clean_model)
                .trim()
                .to_string(),
            width,
            height,
            bits_per_sample,
            sample_type,
            color: color.clone(),
            pattern: cfa.clone(),
            white_levels: decoded.whitelevels,
            black_levels: decoded.blacklevels,
            color_matrix: decoded.xyz_to_cam,
        };

        Ok(RawImage {
            frame: SensorFrame {
                width,
                height,
                channels: decoded.cpp,
                data: samples,
                bits_per_sample,
            },
            cfa,
            color,
            info,
        })
    }
}

/// Calculates the minimum bits needed to represent the sensor's white level.
///
/// e.g. 4095 (0xFFF) -> 12 bits, 16383 (0x3FFF) -> 14 bits
fn bits_per_sample(whitelevels: &[u16]) -> u32 {
    let max_white_level = whitelevels.iter().max().copied().unwrap_or(u16::MAX);
    if max_white_level == 0 {
        DEFAULT_BITS_PER_SAMPLE
    } else {
        U16_BITS - max_white_level.leading_zeros()
    }
}

/// Crops row-major samples to the visible area. `crops` is `[top, right, bottom, left]`.
fn crop_visible(
    samples: &[u16],
    width: usize,
    height: usize,
    cpp: usize,
    crops: [usize; 4],
) -> Result<(Vec<u16>, usize, usize)> {
    let [top, right, bottom, left] = crops;
    if samples.len() != width * height * cpp {
        return Err(ConversionError::DecodeError(format!(
            "decoder returned {} samples for a {}x{}x{} image",
            samples.len(), width, height, cpp
        )));
    }
    let visible_width = width.saturating_sub(left + right);
    let visible_height = height.saturating_sub(top + bottom);
    if visible_width == 0 || visible_height == 0 {
        return Err(ConversionError::InvalidDimensions(visible_width, visible_height));
    }
    if crops == [0; 4] {
        return Ok((samples.to_vec(), width, height));
    }

    let row_len = width * cpp;
    let mut visible = Vec::with_capacity(visible_width * visible_height * cpp);
    for row in samples.chunks_exact(row_len).skip(top).take(visible_height) {
        visible.extend_from_slice(&row[left * cpp..(left + visible_width) * cpp]);
    }
    Ok((visible, visible_width, visible_height))
}

/// Reads the decoder's CFA as a code grid whose origin is the crop corner.
fn cfa_grid(cfa: &rawloader::CFA, top: usize, left: usize) -> CfaGrid {
    if cfa.width == 0 || cfa.height == 0 {
        return CfaGrid::empty();
    }
    let rows: Vec<Vec<i32>> = (0..cfa.height)
        .map(|row| {
            (0..cfa.width)
                .map(|col| cfa.color_at(row + top, col + left) as i32)
                .collect()
        })
        .collect();
    CfaGrid::from_rows(&rows).unwrap_or_else(CfaGrid::empty)
}
