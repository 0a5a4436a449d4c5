//! Unpacking of downloaded dataset archives.

use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::ZipArchive;

use super::FetchError;

/// Extract every file of a zip archive into `dest_dir`, overwriting files
/// that already exist. Returns the paths written.
pub fn unpack_archive(bytes: &[u8], dest_dir: &Path) -> Result<Vec<PathBuf>, FetchError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut written = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            warn!(name = entry.name(), "skipping archive entry outside destination");
            continue;
        };
        let out_path = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&out_path)?;
        let bytes = io::copy(&mut entry, &mut out)?;
        debug!(path = %out_path.display(), bytes, "extracted");
        written.push(out_path);
    }

    Ok(written)
}
