use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    conversions::raw_extract::RawExtractPipeline,
    camera::CameraMetadataReader,
    output::ImageWriter,
    raw::RawImageReader,
};

/// Extensions treated as RAW input, compared case-insensitively.
pub const RAW_EXTENSIONS: [&str; 3] = ["CR2", "NEF", "ARW"];

/// What the batch driver reports while it runs.
///
/// Level 1 logs progress, 2 prints each file's metadata, 3 does both.
/// Level 3 follows the `--verbose` help text; 0 runs silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verbosity(pub u8);

impl Verbosity {
    pub fn shows_progress(&self) -> bool {
        matches!(self.0, 1 | 3)
    }

    pub fn prints_info(&self) -> bool {
        matches!(self.0, 2 | 3)
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self(1)
    }
}

pub fn is_raw_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RAW_EXTENSIONS.iter().any(|raw| raw.eq_ignore_ascii_case(ext)))
}

/// Resolves a file or directory into the RAW files to process, sorted by name.
///
/// Directories are listed one level deep; sub-directories and other extensions are skipped.
pub fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    let candidates = if path.is_dir() {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry_path = entry?.path();
            if entry_path.is_dir() {
                debug!("Skipping directory {}", entry_path.display());
                continue;
            }
            entries.push(entry_path);
        }
        entries.sort();
        entries
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        return Err(ConversionError::InputReadError(format!(
            "{}: file does not exist",
            path.display()
        )));
    };

    Ok(candidates
        .into_iter()
        .filter(|p| {
            let keep = is_raw_file(p);
            if !keep {
                debug!("Skipping non-RAW file {}", p.display());
            }
            keep
        })
        .collect())
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, ConversionError)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs the pipeline on every input. A failing file is logged and the batch moves on.
pub fn run_batch<R, C, W>(
    pipeline: &RawExtractPipeline<R, C, W>,
    inputs: &[PathBuf],
    verbosity: Verbosity,
) -> BatchSummary
where
    R: RawImageReader,
    C: CameraMetadataReader,
    W: ImageWriter,
{
    let mut summary = BatchSummary::default();
    if inputs.is_empty() {
        warn!("No RAW files (CR2, NEF, ARW) found");
        return summary;
    }

    for (index, input) in inputs.iter().enumerate() {
        let name = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if verbosity.shows_progress() {
            info!("[{}/{}] Processing {}", index + 1, inputs.len(), name);
        } else {
            debug!("[{}/{}] Processing {}", index + 1, inputs.len(), name);
        }

        match pipeline.process_file(input) {
            Ok(outputs) => {
                if verbosity.prints_info() {
                    print!("{}", outputs.report.render_terminal());
                }
                summary.processed.push(input.clone());
            }
            Err(e) => {
                error!("{}: {}", input.display(), e);
                summary.failed.push((input.clone(), e));
            }
        }
    }

    if verbosity.shows_progress() {
        info!(
            "Processed {} of {} files ({} failed)",
            summary.processed.len(),
            summary.total(),
            summary.failed.len()
        );
    }
    summary
}
