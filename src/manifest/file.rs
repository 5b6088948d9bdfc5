//! Manifest source backed by a JSON file on disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Manifest, ManifestResult, ManifestSource, decode_manifest};

/// Reads a manifest endpoint response saved to disk.
///
/// The file is re-read on every fetch so edits show up on the next reload.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Source reading `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// File this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ManifestSource for JsonFileSource {
    fn fetch(&mut self) -> ManifestResult<Manifest> {
        let body = std::fs::read(&self.path)?;
        debug!(path = %self.path.display(), bytes = body.len(), "read manifest file");
        decode_manifest(&body)
    }
}
