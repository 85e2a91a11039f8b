//! RAW image data types

use std::fmt;

/// Single-plane sensor readout, as delivered by the RAW decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorFrame {
    /// Width of the visible area in pixels
    pub width: usize,
    /// Height of the visible area in pixels
    pub height: usize,
    /// Samples per pixel; Bayer sensors have exactly one
    pub channels: usize,
    /// Raw samples, row-major, `width * height * channels` long
    pub data: Vec<u16>,
    /// Actual bits per sample from the sensor (e.g., 12, 14, or 16)
    pub bits_per_sample: u32,
}

impl SensorFrame {
    pub fn new(width: usize, height: usize, data: Vec<u16>, bits_per_sample: u32) -> Self {
        Self {
            width,
            height,
            channels: 1,
            data,
            bits_per_sample,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// Repeating color filter index grid, row-major.
///
/// Codes are kept signed so that out-of-range values survive until
/// pattern inference rejects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfaGrid {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl CfaGrid {
    /// Builds a grid from nested rows. Returns `None` for ragged input.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Option<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if rows.iter().any(|r| r.as_ref().len() != cols) {
            return None;
        }
        Some(Self {
            rows: rows.len(),
            cols,
            cells: rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect(),
        })
    }

    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
        }
    }

    /// Iterates `(row, col, code)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &code)| (i / self.cols, i % self.cols, code))
    }
}

/// Single-line rendering, e.g. `[[0 1] [1 2]]`.
impl fmt::Display for CfaGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for row in 0..self.rows {
            if row > 0 {
                f.write_str(" ")?;
            }
            f.write_str("[")?;
            for col in 0..self.cols {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.cells[row * self.cols + col])?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}

/// How the decoder describes the sensor's native color encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorDescriptor {
    /// Raw tag bytes naming the color of each CFA code, e.g. `b"RGBG"`
    Tag(Vec<u8>),
    /// A symbolic color space name such as "sRGB"
    Named(String),
    /// Already full-color data with the given samples per pixel
    Interleaved { channels: usize },
}

impl fmt::Display for ColorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(bytes) => write!(f, "b'{}'", String::from_utf8_lossy(bytes)),
            Self::Named(name) => f.write_str(name),
            Self::Interleaved { channels } => write!(f, "interleaved({channels})"),
        }
    }
}

/// Sensor metadata carried alongside the frame, used by the report.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMetadata {
    /// Make and model as normalized by the decoder, e.g. "Nikon D750"
    pub model: String,
    pub width: usize,
    pub height: usize,
    pub bits_per_sample: u32,
    /// Sample type as decoded: "uint16" or "float32"
    pub sample_type: &'static str,
    pub color: ColorDescriptor,
    pub pattern: CfaGrid,
    pub white_levels: [u16; 4],
    pub black_levels: [u16; 4],
    /// XYZ to camera matrix, one row per CFA color
    pub color_matrix: [[f32; 3]; 4],
}

/// Everything the reader extracts from a RAW file
#[derive(Debug, Clone)]
pub struct RawImage {
    pub frame: SensorFrame,
    pub cfa: CfaGrid,
    pub color: ColorDescriptor,
    pub info: RawMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rejects_ragged_rows() {
        let rows: Vec<Vec<i32>> = vec![vec![0, 1], vec![2]];
        assert!(CfaGrid::from_rows(&rows).is_none());
    }

    #[test]
    fn test_grid_cells_row_major() {
        let grid = CfaGrid::from_rows(&[[0, 1], [3, 2]]).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells, vec![(0, 0, 0), (0, 1, 1), (1, 0, 3), (1, 1, 2)]);
    }

    #[test]
    fn test_grid_display_is_single_line() {
        let grid = CfaGrid::from_rows(&[[0, 1], [3, 2]]).unwrap();
        assert_eq!(grid.to_string(), "[[0 1] [3 2]]");
        assert_eq!(CfaGrid::empty().to_string(), "[]");
    }

    #[test]
    fn test_color_descriptor_display() {
        assert_eq!(ColorDescriptor::Tag(b"RGBG".to_vec()).to_string(), "b'RGBG'");
        assert_eq!(ColorDescriptor::Named("sRGB".into()).to_string(), "sRGB");
        assert_eq!(
            ColorDescriptor::Interleaved { channels: 3 }.to_string(),
            "interleaved(3)"
        );
    }
}
