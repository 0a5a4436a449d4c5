//! Kaggle dataset download.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use super::archive::unpack_archive;
use super::{DatasetSource, FetchError};
use crate::config::DatasetId;

const API_BASE: &str = "https://www.kaggle.com/api/v1";

/// API token, as stored in `kaggle.json`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct KaggleCredentials {
    pub username: String,
    pub key: String,
}

impl KaggleCredentials {
    /// `KAGGLE_USERNAME` and `KAGGLE_KEY`, when both are set.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            username: env::var("KAGGLE_USERNAME").ok()?,
            key: env::var("KAGGLE_KEY").ok()?,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, FetchError> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| FetchError::CredentialsFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `$KAGGLE_CONFIG_DIR/kaggle.json`, else `~/.kaggle/kaggle.json`.
    pub fn config_file() -> Option<PathBuf> {
        let dir = env::var_os("KAGGLE_CONFIG_DIR")
            .map(PathBuf::from)
            .or_else(|| {
                env::var_os("HOME")
                    .or_else(|| env::var_os("USERPROFILE"))
                    .map(|home| PathBuf::from(home).join(".kaggle"))
            })?;
        Some(dir.join("kaggle.json"))
    }

    /// Environment first, then the config file.
    pub fn discover() -> Result<Self, FetchError> {
        if let Some(credentials) = Self::from_env() {
            return Ok(credentials);
        }
        match Self::config_file() {
            Some(path) if path.is_file() => Self::from_file(&path),
            Some(path) => Err(FetchError::Credentials(format!(
                "set KAGGLE_USERNAME/KAGGLE_KEY or create {}",
                path.display()
            ))),
            None => Err(FetchError::Credentials(
                "set KAGGLE_USERNAME/KAGGLE_KEY or KAGGLE_CONFIG_DIR".to_string(),
            )),
        }
    }
}

/// Downloads a dataset archive from Kaggle and unpacks it.
pub struct KaggleSource {
    dataset: DatasetId,
    api_base: String,
    credentials: Option<KaggleCredentials>,
    client: Option<Client>,
}

impl KaggleSource {
    pub fn new(dataset: DatasetId) -> Self {
        Self {
            dataset,
            api_base: API_BASE.to_string(),
            credentials: None,
            client: None,
        }
    }

    /// Source against another API root with fixed credentials and client.
    #[cfg(test)]
    pub(crate) fn with_endpoint(
        dataset: DatasetId,
        api_base: &str,
        credentials: KaggleCredentials,
        client: Client,
    ) -> Self {
        Self {
            dataset,
            api_base: api_base.trim_end_matches('/').to_string(),
            credentials: Some(credentials),
            client: Some(client),
        }
    }

    pub fn download_url(&self) -> String {
        format!(
            "{}/datasets/download/{}/{}",
            self.api_base, self.dataset.owner, self.dataset.name
        )
    }
}

impl DatasetSource for KaggleSource {
    fn describe(&self) -> String {
        format!("kaggle:{}", self.dataset)
    }

    fn retrieve(&self, dest_dir: &Path) -> Result<Vec<PathBuf>, FetchError> {
        let credentials = match &self.credentials {
            Some(credentials) => credentials.clone(),
            None => KaggleCredentials::discover()?,
        };
        // No request timeout.
        let client = match &self.client {
            Some(client) => client.clone(),
            None => Client::builder().timeout(None::<Duration>).build()?,
        };

        let url = self.download_url();
        info!(url = %url, "requesting archive");
        let resp = client
            .get(&url)
            .basic_auth(&credentials.username, Some(&credentials.key))
            .send()?
            .error_for_status()?;
        let bytes = resp.bytes()?;
        info!(bytes = bytes.len(), "downloaded archive");

        unpack_archive(&bytes, dest_dir)
    }
}
