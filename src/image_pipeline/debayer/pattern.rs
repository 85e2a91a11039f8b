//! Bayer pattern inference from CFA index grids

use std::fmt;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::types::CfaGrid;

/// Letter for each CFA code. Codes 1 and 3 are both green.
const COLOR_LETTERS: [char; 4] = ['R', 'G', 'B', 'G'];

/// Reads the grid row-major and spells each code through [`COLOR_LETTERS`].
///
/// The result is `rows * cols` letters long and is not checked against the
/// canonical Bayer labels; see [`BayerLabel::from_label`].
pub fn infer_pattern(cfa: &CfaGrid) -> Result<String> {
    cfa.cells()
        .map(|(row, col, code)| {
            usize::try_from(code)
                .ok()
                .and_then(|index| COLOR_LETTERS.get(index).copied())
                .ok_or(ConversionError::InvalidCode { row, col, code })
        })
        .collect()
}

/// The four 2x2 Bayer alignments, named by their colors in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BayerLabel {
    Rggb,
    Bggr,
    Grbg,
    Gbrg,
}

impl BayerLabel {
    pub const ALL: [BayerLabel; 4] = [Self::Rggb, Self::Bggr, Self::Grbg, Self::Gbrg];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "RGGB" => Some(Self::Rggb),
            "BGGR" => Some(Self::Bggr),
            "GRBG" => Some(Self::Grbg),
            "GBRG" => Some(Self::Gbrg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rggb => "RGGB",
            Self::Bggr => "BGGR",
            Self::Grbg => "GRBG",
            Self::Gbrg => "GBRG",
        }
    }

    /// CFA grid with this alignment, using code 3 for the second green.
    pub fn grid(&self) -> CfaGrid {
        let rows: [[i32; 2]; 2] = match self {
            Self::Rggb => [[0, 1], [3, 2]],
            Self::Bggr => [[2, 1], [3, 0]],
            Self::Grbg => [[1, 0], [2, 3]],
            Self::Gbrg => [[1, 2], [0, 3]],
        };
        CfaGrid::from_rows(&rows).unwrap_or_else(CfaGrid::empty)
    }

    /// Color channel (0 = R, 1 = G, 2 = B) filtered at `(row, col)` of a frame.
    pub fn channel_at(&self, row: usize, col: usize) -> usize {
        match self.as_str().as_bytes()[(row % 2) * 2 + col % 2] {
            b'R' => 0,
            b'G' => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for BayerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[i32]]) -> CfaGrid {
        CfaGrid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_canonical_patterns() {
        assert_eq!(infer_pattern(&grid(&[&[0, 1], &[3, 2]])).unwrap(), "RGGB");
        assert_eq!(infer_pattern(&grid(&[&[2, 1], &[3, 0]])).unwrap(), "BGGR");
        assert_eq!(infer_pattern(&grid(&[&[1, 0], &[2, 3]])).unwrap(), "GRBG");
        assert_eq!(infer_pattern(&grid(&[&[1, 2], &[0, 3]])).unwrap(), "GBRG");
    }

    #[test]
    fn test_all_2x2_grids_spell_four_letters() {
        for code in 0..256 {
            let cells = [code & 3, (code >> 2) & 3, (code >> 4) & 3, (code >> 6) & 3];
            let label = infer_pattern(&grid(&[&cells[..2], &cells[2..]])).unwrap();
            assert_eq!(label.len(), 4);
            for (letter, &c) in label.chars().zip(cells.iter()) {
                assert_eq!(letter, COLOR_LETTERS[c as usize]);
            }
        }
    }

    #[test]
    fn test_non_canonical_labels_are_not_rejected_here() {
        assert_eq!(infer_pattern(&grid(&[&[0, 0], &[0, 0]])).unwrap(), "RRRR");
        assert_eq!(
            infer_pattern(&grid(&[&[0, 1, 2], &[1, 2, 0], &[2, 0, 1]])).unwrap(),
            "RGBGBRBRG"
        );
        assert_eq!(infer_pattern(&CfaGrid::empty()).unwrap(), "");
    }

    #[test]
    fn test_out_of_range_codes() {
        let err = infer_pattern(&grid(&[&[0, 1], &[4, 2]])).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidCode { row: 1, col: 0, code: 4 }));

        let err = infer_pattern(&grid(&[&[-1, 1], &[3, 2]])).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidCode { row: 0, col: 0, code: -1 }));
    }

    #[test]
    fn test_label_round_trip() {
        for label in BayerLabel::ALL {
            assert_eq!(BayerLabel::from_label(label.as_str()), Some(label));
            assert_eq!(infer_pattern(&label.grid()).unwrap(), label.to_string());
        }
        assert_eq!(BayerLabel::from_label("RGBG"), None);
        assert_eq!(BayerLabel::from_label("RGGBR"), None);
    }

    #[test]
    fn test_channel_at() {
        assert_eq!(BayerLabel::Rggb.channel_at(0, 0), 0);
        assert_eq!(BayerLabel::Rggb.channel_at(1, 1), 2);
        assert_eq!(BayerLabel::Bggr.channel_at(2, 2), 2);
        assert_eq!(BayerLabel::Grbg.channel_at(0, 1), 0);
        assert_eq!(BayerLabel::Gbrg.channel_at(3, 2), 0);
        assert_eq!(BayerLabel::Gbrg.channel_at(0, 0), 1);
    }
}
