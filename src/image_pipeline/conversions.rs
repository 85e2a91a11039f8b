//! Pipeline conversions module
//!
//! This module contains the per-file extraction pipeline and the batch driver on top of it.

mod raw_extract;
mod batch;


pub use raw_extract::{FileOutputs, RawExtractPipeline};
pub use batch::{BatchSummary, RAW_EXTENSIONS, Verbosity, collect_inputs, is_raw_file, run_batch};
