//! Fetch module - ensures a local copy of the dataset exists

mod archive;
mod kaggle;

pub use archive::unpack_archive;
pub use kaggle::{KaggleCredentials, KaggleSource};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to unpack archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("Kaggle credentials not found: {0}")]
    Credentials(String),
    #[error("Invalid credentials file {path}: {source}")]
    CredentialsFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} is not present after download")]
    MissingAfterDownload(PathBuf),
}

/// Where a dataset comes from when a download is requested.
pub trait DatasetSource {
    /// Short label for logs.
    fn describe(&self) -> String;

    /// Download the dataset and unpack it into `dest_dir`.
    fn retrieve(&self, dest_dir: &Path) -> Result<Vec<PathBuf>, FetchError>;
}

/// Return the path of `file_name` under `data_dir`, downloading first only
/// when `force_download` is set.
///
/// Without `force_download` nothing touches the network, whether or not
/// the file exists.
pub fn fetch_dataset(
    source: &dyn DatasetSource,
    data_dir: &Path,
    file_name: &str,
    force_download: bool,
) -> Result<PathBuf, FetchError> {
    let target = data_dir.join(file_name);

    if !force_download {
        if target.exists() {
            info!(path = %target.display(), "skipping download, file already exists");
        } else {
            warn!(path = %target.display(), "file not present and download not requested");
        }
        return Ok(target);
    }

    info!(source = %source.describe(), dest = %data_dir.display(), "starting download");
    fs::create_dir_all(data_dir)?;
    let written = source.retrieve(data_dir)?;
    info!(files = written.len(), "download complete");

    if !target.is_file() {
        return Err(FetchError::MissingAfterDownload(target));
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counts retrievals and writes `produces` into the destination.
    struct StubSource {
        calls: Cell<usize>,
        produces: &'static str,
    }

    impl StubSource {
        fn new(produces: &'static str) -> Self {
            Self {
                calls: Cell::new(0),
                produces,
            }
        }
    }

    impl DatasetSource for StubSource {
        fn describe(&self) -> String {
            "stub".to_string()
        }

        fn retrieve(&self, dest_dir: &Path) -> Result<Vec<PathBuf>, FetchError> {
            self.calls.set(self.calls.get() + 1);
            let path = dest_dir.join(self.produces);
            fs::write(&path, "downloaded")?;
            Ok(vec![path])
        }
    }

    /// Fails every retrieval, as an unreachable host would.
    struct FailingSource {
        calls: Cell<usize>,
    }

    impl DatasetSource for FailingSource {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        fn retrieve(&self, _dest_dir: &Path) -> Result<Vec<PathBuf>, FetchError> {
            self.calls.set(self.calls.get() + 1);
            Err(FetchError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        }
    }

    const NAME: &str = "PRODUCT SALES.csv";

    #[test]
    fn existing_file_without_force_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join(NAME);
        fs::write(&existing, "local").unwrap();
        let source = StubSource::new(NAME);

        let path = fetch_dataset(&source, dir.path(), NAME, false).unwrap();

        assert_eq!(path, existing);
        assert_eq!(source.calls.get(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "local");
    }

    #[test]
    fn missing_file_without_force_does_not_download() {
        let dir = tempfile::tempdir().unwrap();
        let source = StubSource::new(NAME);

        let path = fetch_dataset(&source, dir.path(), NAME, false).unwrap();

        assert_eq!(path, dir.path().join(NAME));
        assert_eq!(source.calls.get(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_with_force_downloads_once() {
        let dir = tempfile::tempdir().unwrap();
        let source = StubSource::new(NAME);

        let path = fetch_dataset(&source, dir.path(), NAME, true).unwrap();

        assert_eq!(source.calls.get(), 1);
        assert!(path.is_file());
    }

    #[test]
    fn force_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(NAME), "local").unwrap();
        let source = StubSource::new(NAME);

        let path = fetch_dataset(&source, dir.path(), NAME, true).unwrap();

        assert_eq!(source.calls.get(), 1);
        assert_eq!(fs::read_to_string(path).unwrap(), "downloaded");
    }

    #[test]
    fn download_without_target_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = StubSource::new("other.csv");

        let err = fetch_dataset(&source, dir.path(), NAME, true).unwrap_err();

        assert_eq!(source.calls.get(), 1);
        assert!(matches!(err, FetchError::MissingAfterDownload(p) if p == dir.path().join(NAME)));
    }

    #[test]
    fn creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let source = StubSource::new(NAME);

        let path = fetch_dataset(&source, &data_dir, NAME, true).unwrap();

        assert_eq!(path, data_dir.join(NAME));
        assert!(path.is_file());
    }

    #[test]
    fn retrieval_error_is_returned_without_retry() {
        let dir = tempfile::tempdir().unwrap();
        let source = FailingSource {
            calls: Cell::new(0),
        };

        let err = fetch_dataset(&source, dir.path(), NAME, true).unwrap_err();

        assert_eq!(source.calls.get(), 1);
        assert!(matches!(
            err,
            FetchError::Io(ref e) if e.kind() == std::io::ErrorKind::ConnectionRefused
        ));
        assert!(!dir.path().join(NAME).exists());
    }
}
