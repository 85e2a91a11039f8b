use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::pattern::{infer_pattern, BayerLabel};
use crate::image_pipeline::debayer::types::{DemosaicMethod, RgbFrame};
use crate::image_pipeline::raw::types::{CfaGrid, ColorDescriptor, SensorFrame};

/// Debayers with the default bilinear routine.
pub fn debayer(frame: &SensorFrame, color: &ColorDescriptor, cfa: &CfaGrid) -> Result<RgbFrame> {
    CpuDebayer::default().process(frame, color, cfa)
}

/// Picks the `bayer` crate routine matching the sensor's CFA alignment and runs it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuDebayer {
    method: DemosaicMethod,
}

impl CpuDebayer {
    pub fn new(method: DemosaicMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> DemosaicMethod {
        self.method
    }

    pub fn process(
        &self,
        frame: &SensorFrame,
        color: &ColorDescriptor,
        cfa: &CfaGrid,
    ) -> Result<RgbFrame> {
        // Only the raw tag representation counts as a Bayer sensor
        if !matches!(color, ColorDescriptor::Tag(_)) {
            return Err(ConversionError::UnsupportedColorSpace(color.to_string()));
        }

        let inferred = infer_pattern(cfa)?;
        let label = BayerLabel::from_label(&inferred)
            .ok_or(ConversionError::UnsupportedBayerPattern(inferred))?;

        if frame.width == 0
            || frame.height == 0
            || frame.channels != 1
            || frame.data.len() != frame.pixel_count()
        {
            return Err(ConversionError::InvalidDimensions(frame.width, frame.height));
        }

        self.reconstruct(frame, label)
    }

    fn reconstruct(&self, frame: &SensorFrame, label: BayerLabel) -> Result<RgbFrame> {
        let width = frame.width;
        let height = frame.height;
        debug!("Debayering {}x{} as {} ({:?})", width, height, label, self.method);

        // bayer crate only supports 8 and 16 bit
        let (bayer_depth, raster_depth, bytes_per_pixel) = if frame.bits_per_sample <= 8 {
            (BayerDepth::Depth8, RasterDepth::Depth8, 1)
        } else {
            (BayerDepth::Depth16LE, RasterDepth::Depth16, 2)
        };

        let bayer_bytes: Vec<u8> = if bytes_per_pixel == 1 {
            frame.data.iter().map(|&val| val as u8).collect()
        } else {
            frame.data.iter().flat_map(|&val| val.to_le_bytes()).collect()
        };

        let mut output_buf = vec![0u8; width * height * RgbFrame::CHANNELS * bytes_per_pixel];
        let mut output_raster = RasterMut::new(width, height, raster_depth, &mut output_buf);

        bayer::run_demosaic(
            &mut Cursor::new(&bayer_bytes[..]),
            bayer_depth,
            routine(label),
            algorithm(self.method),
            &mut output_raster,
        )
        .map_err(|e| ConversionError::DemosaicError(format!("{:?}", e)))?;

        // 16-bit rasters are written in native byte order
        let data: Vec<u16> = if bytes_per_pixel == 1 {
            output_buf.iter().map(|&v| v as u16).collect()
        } else {
            output_buf
                .chunks_exact(2)
                .map(|b| u16::from_ne_bytes([b[0], b[1]]))
                .collect()
        };

        Ok(RgbFrame {
            width,
            height,
            data,
            bits_per_sample: frame.bits_per_sample,
        })
    }
}

fn routine(label: BayerLabel) -> CFA {
    match label {
        BayerLabel::Rggb => CFA::RGGB,
        BayerLabel::Bggr => CFA::BGGR,
        BayerLabel::Grbg => CFA::GRBG,
        BayerLabel::Gbrg => CFA::GBRG,
    }
}

fn algorithm(method: DemosaicMethod) -> Demosaic {
    match method {
        DemosaicMethod::NearestNeighbour => Demosaic::NearestNeighbour,
        DemosaicMethod::Linear => Demosaic::Linear,
        DemosaicMethod::Cubic => Demosaic::Cubic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mosaics a flat color through the given alignment.
    fn flat_mosaic(
        label: BayerLabel,
        width: usize,
        height: usize,
        rgb: [u16; 3],
        bits: u32,
    ) -> SensorFrame {
        let data = (0..height)
            .flat_map(|row| (0..width).map(move |col| rgb[label.channel_at(row, col)]))
            .collect();
        SensorFrame::new(width, height, data, bits)
    }

    fn bayer_tag() -> ColorDescriptor {
        ColorDescriptor::Tag(b"RGBG".to_vec())
    }

    #[test]
    fn test_each_label_reconstructs_flat_color() {
        let rgb = [1000, 2000, 3000];
        for label in BayerLabel::ALL {
            let frame = flat_mosaic(label, 8, 8, rgb, 14);
            let out = debayer(&frame, &bayer_tag(), &label.grid()).unwrap();
            assert_eq!(out.pixel(3, 3), Some(rgb), "{label}");
            assert_eq!(out.pixel(4, 5), Some(rgb), "{label}");
        }
    }

    #[test]
    fn test_eight_bit_frames() {
        let rgb = [10, 20, 30];
        let frame = flat_mosaic(BayerLabel::Grbg, 8, 6, rgb, 8);
        let out = debayer(&frame, &bayer_tag(), &BayerLabel::Grbg.grid()).unwrap();
        assert_eq!(out.bits_per_sample, 8);
        assert_eq!(out.pixel(2, 3), Some(rgb));
    }

    #[test]
    fn test_shape_is_preserved() {
        let frame = flat_mosaic(BayerLabel::Rggb, 10, 6, [1, 2, 3], 12);
        let out = debayer(&frame, &bayer_tag(), &BayerLabel::Rggb.grid()).unwrap();
        assert_eq!((out.width, out.height), (10, 6));
        assert_eq!(out.data.len(), 10 * 6 * RgbFrame::CHANNELS);
        assert_eq!(out.bits_per_sample, 12);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let data = (0..64u16).map(|v| v * 97 % 4096).collect();
        let frame = SensorFrame::new(8, 8, data, 12);
        let cfa = BayerLabel::Bggr.grid();
        let first = debayer(&frame, &bayer_tag(), &cfa).unwrap();
        let second = debayer(&frame, &bayer_tag(), &cfa).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_input_frame_untouched() {
        let frame = flat_mosaic(BayerLabel::Gbrg, 8, 8, [5, 6, 7], 16);
        let before = frame.clone();
        debayer(&frame, &bayer_tag(), &BayerLabel::Gbrg.grid()).unwrap();
        assert_eq!(frame, before);
    }

    #[test]
    fn test_non_tag_color_descriptors_rejected() {
        let frame = flat_mosaic(BayerLabel::Rggb, 8, 8, [1, 2, 3], 14);
        let cfa = BayerLabel::Rggb.grid();
        for color in [
            ColorDescriptor::Named("RGBG".into()),
            ColorDescriptor::Named("sRGB".into()),
            ColorDescriptor::Interleaved { channels: 3 },
        ] {
            let err = debayer(&frame, &color, &cfa).unwrap_err();
            assert!(matches!(err, ConversionError::UnsupportedColorSpace(_)));
        }

        // rejected before anything else is looked at
        let bad_cfa = CfaGrid::from_rows(&[[7, 7], [7, 7]]).unwrap();
        let empty = SensorFrame::new(0, 0, Vec::new(), 14);
        let err = debayer(&empty, &ColorDescriptor::Named("sRGB".into()), &bad_cfa).unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedColorSpace(_)));
    }

    #[test]
    fn test_unsupported_patterns() {
        let frame = flat_mosaic(BayerLabel::Rggb, 9, 9, [1, 2, 3], 14);
        let three_by_three = CfaGrid::from_rows(&[[0, 1, 0], [3, 2, 3], [0, 1, 0]]).unwrap();
        let err = debayer(&frame, &bayer_tag(), &three_by_three).unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedBayerPattern(ref l) if l == "RGRGBGRGR"));

        let all_green = CfaGrid::from_rows(&[[1, 3], [3, 1]]).unwrap();
        let err = debayer(&frame, &bayer_tag(), &all_green).unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedBayerPattern(ref l) if l == "GGGG"));
    }

    #[test]
    fn test_invalid_code_before_reconstruction() {
        // frame is inconsistent on purpose; the code check must fail first
        let frame = SensorFrame::new(8, 8, vec![0; 3], 14);
        for code in [4, -1] {
            let cfa = CfaGrid::from_rows(&[[0, 1], [code, 2]]).unwrap();
            let err = debayer(&frame, &bayer_tag(), &cfa).unwrap_err();
            assert!(matches!(err, ConversionError::InvalidCode { code: c, .. } if c == code));
        }
    }

    #[test]
    fn test_mismatched_buffer_rejected() {
        let frame = SensorFrame::new(8, 8, vec![0; 10], 14);
        let err = debayer(&frame, &bayer_tag(), &BayerLabel::Rggb.grid()).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidDimensions(8, 8)));
    }

    #[test]
    fn test_empty_frame_rejected() {
        let empty = SensorFrame::new(0, 0, Vec::new(), 14);
        for method in [
            DemosaicMethod::NearestNeighbour,
            DemosaicMethod::Linear,
            DemosaicMethod::Cubic,
        ] {
            let err = CpuDebayer::new(method)
                .process(&empty, &bayer_tag(), &BayerLabel::Rggb.grid())
                .unwrap_err();
            assert!(matches!(err, ConversionError::InvalidDimensions(0, 0)));
        }

        let no_rows = SensorFrame::new(8, 0, Vec::new(), 14);
        let err = debayer(&no_rows, &bayer_tag(), &BayerLabel::Rggb.grid()).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidDimensions(8, 0)));
    }

    #[test]
    fn test_undersized_frame_reports_demosaic_error() {
        for (width, height) in [(1, 1), (1, 8), (8, 1)] {
            let frame = flat_mosaic(BayerLabel::Rggb, width, height, [1, 2, 3], 14);
            let err = debayer(&frame, &bayer_tag(), &BayerLabel::Rggb.grid()).unwrap_err();
            assert!(matches!(err, ConversionError::DemosaicError(_)), "{width}x{height}");
        }
    }

    #[test]
    fn test_selectable_method() {
        let rgb = [400, 800, 1200];
        let frame = flat_mosaic(BayerLabel::Rggb, 8, 8, rgb, 12);
        let debayer = CpuDebayer::new(DemosaicMethod::NearestNeighbour);
        assert_eq!(debayer.method(), DemosaicMethod::NearestNeighbour);
        let out = debayer.process(&frame, &bayer_tag(), &BayerLabel::Rggb.grid()).unwrap();
        assert_eq!(out.pixel(3, 3), Some(rgb));
    }
}
