//! Runtime configuration for a single fetch → load → analyze run.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::data::{LoadOptions, DEFAULT_DATE_FORMAT};

pub const DEFAULT_FILE_NAME: &str = "PRODUCT SALES.csv";
pub const DEFAULT_DATASET: &str = "kanyianalyst/customer-age-group-segmentation";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Dataset must be given as <owner>/<name>, got {0:?}")]
    InvalidDataset(String),
}

/// Remote dataset identifier, `<owner>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetId {
    pub owner: String,
    pub name: String,
}

impl FromStr for DatasetId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ConfigError::InvalidDataset(s.to_string())),
        }
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Snapshot of the values driving a run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset: DatasetId,
    pub data_dir: PathBuf,
    pub file_name: String,
    /// Download even if the file is present. Off unless asked for.
    pub force_download: bool,
    pub date_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetId {
                owner: "kanyianalyst".to_string(),
                name: "customer-age-group-segmentation".to_string(),
            },
            data_dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
            force_download: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            date_format: self.date_format.clone(),
        }
    }
}
