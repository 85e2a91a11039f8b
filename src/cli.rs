//! Command-line front-end: parse arguments, resolve inputs, run the batch.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tracing::info;

use crate::image_pipeline::{
    ConversionConfig, DemosaicMethod, OutputFormat, RawExtractPipeline, TiffCompression, Verbosity,
    collect_inputs, run_batch,
};

#[derive(Parser, Debug)]
#[command(
    name = "rawdump",
    about = "Restore raw sensor data, a debayered image and metadata from CR2/NEF/ARW files.",
    after_help = "Examples:\n  rawdump -f ./test.CR2 -i -v 3\n  rawdump -f ./test/ -i -v 3"
)]
pub struct CliArgs {
    /// RAW file or folder of RAW files; outputs are written next to each input
    #[arg(short = 'f', long = "file", value_name = "PATH", default_value = "demo")]
    pub path: PathBuf,

    /// Save the image information to <name>.txt
    #[arg(short, long)]
    pub info: bool,

    /// 1: progress only, 2: print image information only, 3: both
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub verbose: u8,

    /// Encoding of the debayered image
    #[arg(long, value_enum, default_value = "png")]
    pub format: FormatArg,

    /// TIFF compression (ignored for PNG)
    #[arg(long, value_enum, default_value = "none")]
    pub compression: CompressionArg,

    /// Interpolation used for demosaicing
    #[arg(long, value_enum, default_value = "linear")]
    pub demosaic: DemosaicArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Png,
    Tiff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemosaicArg {
    Nearest,
    Linear,
    Cubic,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Tiff => OutputFormat::Tiff,
        }
    }
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::DeflateFast => TiffCompression::DeflateFast,
            CompressionArg::DeflateBalanced => TiffCompression::DeflateBalanced,
            CompressionArg::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

impl From<DemosaicArg> for DemosaicMethod {
    fn from(arg: DemosaicArg) -> Self {
        match arg {
            DemosaicArg::Nearest => DemosaicMethod::NearestNeighbour,
            DemosaicArg::Linear => DemosaicMethod::Linear,
            DemosaicArg::Cubic => DemosaicMethod::Cubic,
        }
    }
}

impl CliArgs {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity(self.verbose)
    }

    /// Log level used when `RUST_LOG` is unset; progress lines are logged at info.
    pub fn default_log_level(&self) -> &'static str {
        if self.verbosity().shows_progress() {
            "info"
        } else {
            "warn"
        }
    }

    pub fn config(&self) -> ConversionConfig {
        ConversionConfig::builder()
            .format(self.format.into())
            .compression(self.compression.into())
            .demosaic(self.demosaic.into())
            .save_info(self.info)
            .build()
    }
}

pub fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = args.config();
    info!("Format: {:?}, demosaic: {:?}, save info: {}", config.format, config.demosaic, config.save_info);

    let inputs = collect_inputs(&args.path)
        .with_context(|| format!("cannot read input {}", args.path.display()))?;

    let pipeline = RawExtractPipeline::new(config);
    let summary = run_batch(&pipeline, &inputs, args.verbosity());

    if !summary.is_success() {
        bail!("{} of {} files failed", summary.failed.len(), summary.total());
    }
    Ok(())
}
