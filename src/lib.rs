//! Extracts sensor data and metadata from camera RAW files (CR2, NEF, ARW) and
//! reconstructs a viewable RGB image by picking the demosaic routine that matches
//! the sensor's Bayer alignment.

pub mod cli;
pub mod image_pipeline;
pub mod logger;
