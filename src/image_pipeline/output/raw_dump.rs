use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::SensorFrame;

/// Dumps the visible sensor samples as headerless native-endian u16, row-major.
pub fn write_raw_dump(frame: &SensorFrame, output: &mut dyn Write) -> Result<()> {
    debug!("Dumping {} raw samples", frame.data.len());

    let bytes: Vec<u8> = frame.data.iter().flat_map(|&v| v.to_ne_bytes()).collect();
    output.write_all(&bytes)?;
    Ok(())
}
