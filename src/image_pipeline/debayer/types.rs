//! Types for debayering operations

/// RGB image data after debayering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbFrame {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...]
    pub data: Vec<u16>,
    /// Bits per sample carried over from the sensor frame
    pub bits_per_sample: u32,
}

impl RgbFrame {
    pub const CHANNELS: usize = 3;

    /// `[R, G, B]` at the given pixel.
    pub fn pixel(&self, row: usize, col: usize) -> Option<[u16; 3]> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let i = (row * self.width + col) * Self::CHANNELS;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }
}

/// Interpolation used by the reconstruction routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemosaicMethod {
    /// Nearest neighbour copy (fastest, blocky)
    NearestNeighbour,
    /// Bilinear interpolation (default)
    #[default]
    Linear,
    /// Bicubic interpolation
    Cubic,
}
