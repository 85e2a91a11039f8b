use clap::Parser;
use rawdump::{cli, logger};

fn main() -> anyhow::Result<()> {
    let args = cli::CliArgs::parse();
    logger::init(args.default_log_level());
    cli::run(args)
}
