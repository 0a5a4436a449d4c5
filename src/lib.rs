//! Customer Segmentation - dataset fetch, normalization & correlation analysis
//!
//! Downloads the customer age group transactions dataset on request, loads
//! it into a typed polars table and correlates its numeric columns.

pub mod cli;
pub mod config;
pub mod data;
pub mod fetch;
pub mod logging;
pub mod stats;

use anyhow::Context;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::fetch::DatasetSource;
use crate::stats::CorrelationMatrix;

/// Fetch, load and analyze in sequence. Any failure ends the run.
pub fn run(config: &AppConfig, source: &dyn DatasetSource) -> anyhow::Result<CorrelationMatrix> {
    let path = fetch::fetch_dataset(
        source,
        &config.data_dir,
        &config.file_name,
        config.force_download,
    )
    .context("fetching dataset")?;

    let table = data::load_file(&path, &config.load_options())
        .with_context(|| format!("loading {}", path.display()))?;
    info!(rows = table.height(), columns = table.width(), "loaded {}", path.display());

    let matrix = stats::customer_age_analysis(&table).context("correlation analysis")?;
    debug!("correlation matrix:\n{matrix}");
    Ok(matrix)
}
