//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use crate::config::{AppConfig, DatasetId, DEFAULT_DATASET, DEFAULT_FILE_NAME};
use crate::data::DEFAULT_DATE_FORMAT;

#[derive(Parser, Debug)]
#[command(
    name = "customer-segmentation",
    version,
    about = "Fetch the customer age group dataset, normalize it and correlate its numeric columns"
)]
pub struct Cli {
    /// Download the dataset even if a local copy exists.
    #[arg(long)]
    pub download: bool,

    /// Name of the dataset CSV inside the data directory.
    #[arg(long = "file", value_name = "NAME", default_value = DEFAULT_FILE_NAME)]
    pub file_name: String,

    /// Directory holding (or receiving) the dataset.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Remote dataset identifier.
    #[arg(long, value_name = "OWNER/NAME", default_value = DEFAULT_DATASET)]
    pub dataset: DatasetId,

    /// chrono format of the `date` column.
    #[arg(long = "date-format", value_name = "FMT", default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

impl Cli {
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            dataset: self.dataset.clone(),
            data_dir: self.data_dir.clone(),
            file_name: self.file_name.clone(),
            force_download: self.download,
            date_format: self.date_format.clone(),
        }
    }
}
