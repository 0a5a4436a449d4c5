//! Customer Segmentation CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use customer_segmentation::cli::Cli;
use customer_segmentation::fetch::KaggleSource;
use customer_segmentation::{logging, run};
use tracing::info;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init_logging(cli.verbosity.tracing_level_filter()) {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }

    let config = cli.to_config();
    let source = KaggleSource::new(config.dataset.clone());
    match run(&config, &source) {
        Ok(matrix) => {
            info!(size = matrix.size(), "analysis complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
