//! Debayering module for converting Bayer pattern RAW images to RGB
//!
//! The demosaic routines themselves come from the `bayer` crate; this module
//! works out which one matches the sensor's CFA alignment.

pub mod dispatch;
pub mod pattern;
pub mod types;

pub use dispatch::{debayer, CpuDebayer};
pub use pattern::{infer_pattern, BayerLabel};
pub use types::{DemosaicMethod, RgbFrame};
